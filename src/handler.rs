//! # 命令处理逻辑模块
//!
//! 包含处理编码和解码命令的高级业务逻辑。
//! 本模块负责协调文件与图像 I/O、调用核心编解码算法以及向用户报告结果。
//! 整个过程只在内存副本上修改像素，磁盘上的源图像始终保持不变，
//! 结果图像仅在全部步骤成功后一次性写出。

use crate::bitstream::BitCodec;
use crate::config::StegoConfig;
use crate::packer::ChannelPacker;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 根据输入图像路径推导输出路径：同目录下的 `encoded_<原文件名主干>.png`。
/// 统一保存为 PNG，保证像素逐位无损。
fn encoded_output_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    let file_name = format!("encoded_{stem}.png");

    match image.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

/// 处理编码命令的执行逻辑。
///
/// 读取文本文件和图像文件，把文本位流 (含终止符) 写入像素通道低位，
/// 将结果保存为同目录下的 `encoded_<原文件名主干>.png`，在标准输出
/// 打印生成的文件路径，并返回该路径。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的文本文件，或其内容不是合法 UTF-8。
/// * 无法打开输入的图像文件。
/// * 图像容量不足以容纳全部负载位。
/// * 无法写入结果图像文件。
pub fn handle_encode(text_path: &Path, image_path: &Path) -> Result<PathBuf> {
    let text = fs::read_to_string(text_path).with_context(|| {
        format!(
            "Unable to read text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;

    let mut image = image::open(image_path).with_context(|| {
        format!(
            "Unable to open image file: {}",
            image_path.to_string_lossy().red().bold()
        )
    })?;

    let config = StegoConfig::default();
    let bits = BitCodec::new(config).encode(&text);

    ChannelPacker::new(config)
        .encode(&mut image, &bits)
        .with_context(|| {
            format!(
                "Failed to hide the text from '{}' in the image.",
                text_path.to_string_lossy().red().bold()
            )
        })?;

    let output = encoded_output_path(image_path);
    image.save(&output).with_context(|| {
        format!(
            "Unable to write encoded image file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    println!("{}", output.to_string_lossy());
    eprintln!(
        "The text has been successfully hidden and saved: {}",
        output.to_string_lossy().green().bold()
    );

    Ok(output)
}

/// 从图像中恢复隐藏的文本，不向标准输出打印任何内容。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法打开输入的图像文件。
/// * 图像的颜色模式既非灰度也非 RGB。
/// * 低位数据中没有终止符，或终止符之前的字节不是合法 UTF-8。
pub fn recover_text(image_path: &Path) -> Result<String> {
    let image = image::open(image_path).with_context(|| {
        format!(
            "Unable to open image file: {}",
            image_path.to_string_lossy().red().bold()
        )
    })?;

    let config = StegoConfig::default();
    let bits = ChannelPacker::new(config).decode(&image).with_context(|| {
        format!(
            "Failed to read hidden data from '{}'.",
            image_path.to_string_lossy().red().bold()
        )
    })?;

    BitCodec::new(config).decode(&bits).with_context(|| {
        format!(
            "Failed to recover a message from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            image_path.to_string_lossy().red().bold()
        )
    })
}

/// 处理解码命令的执行逻辑：恢复文本并打印到标准输出。
///
/// # Errors
///
/// 错误条件与 [`recover_text`] 相同。
pub fn handle_decode(image_path: &Path) -> Result<()> {
    let text = recover_text(image_path)?;
    println!("{text}");
    Ok(())
}
