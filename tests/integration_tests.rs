use bitveil::handler::{handle_decode, handle_encode, recover_text};
use image::{ImageBuffer, Luma, Rgb};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的 RGB 测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut raw_pixels = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    let img_buf: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, raw_pixels).expect("buffer size must match");

    img_buf.save(path).expect("Failed to create test image.");
}

/// 验证从编码到解码的完整流程，并检查输出路径的推导规则
#[test]
fn test_encode_and_decode_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("original.png");
    let text_path = dir.path().join("source.txt");

    create_test_image(&image_path, 100, 100);
    let original_bytes = fs::read(&image_path)?;
    let original_text = "This is a test message for the handler! 这是一个给处理器的测试信息！";
    fs::write(&text_path, original_text)?;

    // 2. 测试 handle_encode
    let output = handle_encode(&text_path, &image_path)?;
    let expected_output = dir.path().join("encoded_original.png");
    assert_eq!(
        output, expected_output,
        "Output must be `encoded_<stem>.png` next to the input image."
    );
    assert!(output.exists(), "Encoded image should be created.");

    // 3. 源图像在磁盘上保持原样
    assert_eq!(
        fs::read(&image_path)?,
        original_bytes,
        "Source image file must never be modified."
    );

    // 4. 验证恢复结果
    let recovered_text = recover_text(&output)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text must match the original."
    );

    // handle_decode 走同一条路径，只是额外打印到标准输出
    handle_decode(&output)?;

    Ok(())
}

/// 验证灰度图像的完整回环
#[test]
fn test_encode_and_decode_grayscale() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("gray.png");
    let text_path = dir.path().join("source.txt");

    let img_buf: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_fn(64, 64, |x, y| Luma([(x * 5 + y * 3) as u8]));
    img_buf.save(&image_path)?;

    let original_text = "Grayscale carries one channel per pixel.";
    fs::write(&text_path, original_text)?;

    // 2. 编码后恢复
    let output = handle_encode(&text_path, &image_path)?;
    let recovered_text = recover_text(&output)?;
    assert_eq!(original_text, recovered_text);

    Ok(())
}

/// 验证空间不足时的错误处理，以及失败后不产生输出文件
#[test]
fn test_encode_not_enough_space() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let text_path = dir.path().join("large.txt");

    // 创建一个非常小的图片
    create_test_image(&image_path, 10, 10);
    // 创建一个非常大的文本
    let large_text = "a".repeat(5000);
    fs::write(&text_path, large_text)?;

    // 2. 执行并断言错误
    let result = handle_encode(&text_path, &image_path);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(format!("{:#}", e).contains("Not enough space"));
    }
    assert!(
        !dir.path().join("encoded_small.png").exists(),
        "No output file may be written on failure."
    );

    Ok(())
}

/// 验证没有隐藏消息的图像在解码时报缺少终止符
#[test]
fn test_decode_without_hidden_message() -> anyhow::Result<()> {
    // 1. 准备环境：低位全零的纯黑图像不含任何终止符字节
    let dir = tempdir()?;
    let image_path = dir.path().join("blank.png");
    let img_buf: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_pixel(32, 32, Luma([0]));
    img_buf.save(&image_path)?;

    // 2. 执行并断言错误
    let result = recover_text(&image_path);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(format!("{:#}", e).contains("terminator"));
    }

    Ok(())
}
