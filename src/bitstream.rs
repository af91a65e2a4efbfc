//! # 位流编解码模块
//!
//! 负责字节序列与位序列之间的转换：按大端 (最高位在前) 顺序把每个
//! 字节展开为 8 个位，并支持按固定宽度读写位组。位数据以紧凑的字节
//! 缓冲加显式位长度存储，不做任何字符串形式的位操作。

use crate::config::StegoConfig;
use crate::error::StegoError;

/// 一段有序的位序列，每个字节内按最高位在前的顺序紧凑存储。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence {
    /// 紧凑存储的位数据，末尾字节可能只有部分位有效。
    data: Vec<u8>,
    /// 有效位数。
    len: usize,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预分配能容纳 `bits` 个位的缓冲。
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// 由字节序列构造：每个字节按最高位在前展开为 8 位，保持输入顺序。
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }

    /// 有效位数。
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 追加 `value` 的低 `width` 位，最高位在前。
    pub fn push_group(&mut self, value: u8, width: u32) {
        debug_assert!((1..=8).contains(&width));

        for shift in (0..width).rev() {
            self.push_bit((value >> shift) & 1);
        }
    }

    /// 读取从 `start` 开始的 `width` 个位，按最高位在前组装为无符号整数。
    /// 超出序列末尾的位按 0 读取。
    pub fn group_at(&self, start: usize, width: u32) -> u8 {
        debug_assert!((1..=8).contains(&width));

        let mut value = 0u8;
        for i in 0..width as usize {
            value = (value << 1) | self.bit_at(start + i);
        }
        value
    }

    /// 追加零位，直到长度为 `width` 的整数倍。
    pub fn pad_to_multiple(&mut self, width: u32) {
        while self.len % width as usize != 0 {
            self.push_bit(0);
        }
    }

    /// 按 8 位一组重组为字节序列，丢弃末尾不足 8 位的部分。
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data[..self.len / 8].to_vec()
    }

    fn push_bit(&mut self, bit: u8) {
        if self.len % 8 == 0 {
            self.data.push(0);
        }
        if bit != 0 {
            self.data[self.len / 8] |= 1 << (7 - self.len % 8);
        }
        self.len += 1;
    }

    fn bit_at(&self, index: usize) -> u8 {
        if index >= self.len {
            return 0;
        }
        (self.data[index / 8] >> (7 - index % 8)) & 1
    }
}

/// 文本与位序列之间的编解码器。
#[derive(Debug, Clone, Copy, Default)]
pub struct BitCodec {
    config: StegoConfig,
}

impl BitCodec {
    pub fn new(config: StegoConfig) -> Self {
        Self { config }
    }

    /// 把文本编码为位序列，并在末尾追加一个完整的终止符字节。
    ///
    /// 任何字节序列都可表示，因此编码本身不会失败；但消息中若出现与
    /// 终止符相同的字节 (0xFF)，解码时会被误认为消息结束。
    pub fn encode(&self, text: &str) -> BitSequence {
        let mut bits = BitSequence::from_bytes(text.as_bytes());
        bits.push_group(self.config.terminator, 8);
        bits
    }

    /// 从位序列恢复文本。
    ///
    /// 按 8 位一组重组为字节 (丢弃不足 8 位的尾部)，截取第一个终止符
    /// 之前的内容并按 UTF-8 解码。
    ///
    /// # Errors
    ///
    /// * 字节流中找不到终止符时返回 [`StegoError::MalformedPayload`]。
    /// * 终止符之前的字节不是合法 UTF-8 时返回 [`StegoError::InvalidUtf8`]。
    pub fn decode(&self, bits: &BitSequence) -> Result<String, StegoError> {
        let bytes = bits.to_bytes();
        let end = bytes
            .iter()
            .position(|&byte| byte == self.config.terminator)
            .ok_or(StegoError::MalformedPayload)?;

        Ok(String::from_utf8(bytes[..end].to_vec())?)
    }
}
