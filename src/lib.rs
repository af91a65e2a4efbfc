//! # bitveil 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：位流编解码、像素通道打包，
//! 以及围绕它们的配置、错误类型和命令处理层。

// 声明库包含的所有模块。

pub mod bitstream;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod packer;
