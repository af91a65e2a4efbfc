//! # 错误类型模块
//!
//! 定义核心编解码过程中的各类错误。每种错误对应一条独立的用户可读消息。
//! 文件与图像 I/O 错误不在此列，由上层通过 `anyhow` 附加上下文后统一呈现。

use thiserror::Error;

/// 核心编解码错误。任何一种错误都会中止当前操作，不存在部分写入或重试。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 编码位数不在合法区间内。
    #[error("Encoding unit {unit} is out of range: must be at least 1 and below the channel bit depth (8).")]
    InvalidUnit { unit: u32 },

    /// 解码遇到既非灰度也非 RGB 的颜色模式。
    #[error("Unsupported color mode `{mode}`: only grayscale and RGB images can be decoded.")]
    UnsupportedMode { mode: String },

    /// 负载位数超过图像可提供的容量。
    #[error("Not enough space in the image to hide the text. Required: {required} bits, Available: {available} bits.")]
    InsufficientCapacity { required: usize, available: usize },

    /// 低位数据中找不到终止符，图像不包含有效终止的消息。
    #[error("No terminator byte found: the image does not contain a validly-terminated message.")]
    MalformedPayload,

    /// 终止符之前的字节不是合法的 UTF-8。
    #[error("Recovered bytes are not valid UTF-8.")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
