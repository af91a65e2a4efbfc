//! # 编码配置模块
//!
//! 定义隐写编码的可配置参数：每个通道用于负载的低位位数、通道位深和
//! 终止符字节。参数在构造时校验并随实例传递，不依赖可变全局状态，
//! 因此不同配置可以在同一进程 (如并行测试) 中共存。

use crate::error::StegoError;

/// 每个像素通道的位深 (8 位通道取值 0–255)。
pub const CHANNEL_BIT_DEPTH: u32 = 8;

/// 默认每个通道用于携带负载的最低有效位数。
pub const DEFAULT_ENCODING_UNIT: u32 = 2;

/// 消息终止符：全 1 字节 (0xFF)。
/// 解码时把字节流中第一个等于该值的字节视为消息结束，
/// 因此原始消息本身不能包含 0xFF 字节 (没有转义机制)。
pub const TERMINATOR: u8 = 0xFF;

/// 一次编码或解码操作的完整配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StegoConfig {
    /// 每个通道用于负载的低位位数，满足 `1 <= encoding_unit < CHANNEL_BIT_DEPTH`。
    pub encoding_unit: u32,
    /// 终止符字节值。
    pub terminator: u8,
}

impl StegoConfig {
    /// 使用指定的编码位数构造配置，其余参数取默认值。
    ///
    /// # Errors
    ///
    /// 当 `unit` 不满足 `1 <= unit < CHANNEL_BIT_DEPTH` 时返回
    /// [`StegoError::InvalidUnit`]。
    pub fn with_unit(unit: u32) -> Result<Self, StegoError> {
        if unit == 0 || unit >= CHANNEL_BIT_DEPTH {
            return Err(StegoError::InvalidUnit { unit });
        }

        Ok(Self {
            encoding_unit: unit,
            terminator: TERMINATOR,
        })
    }
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            encoding_unit: DEFAULT_ENCODING_UNIT,
            terminator: TERMINATOR,
        }
    }
}
