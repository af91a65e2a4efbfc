//! # 像素通道打包模块
//!
//! 把位序列按固定宽度写入像素通道的最低有效位，或从中提取回来。
//! 编码与解码必须共用同一套遍历约定：像素按列优先顺序访问 (外层 x、
//! 内层 y)，通道按 R、G、B 顺序访问。两端约定一旦不一致，数据会在
//! 不报任何错误的情况下损坏，因此该约定由专门的测试覆盖。

use crate::bitstream::BitSequence;
use crate::config::StegoConfig;
use crate::error::StegoError;
use image::{DynamicImage, ImageBuffer, Pixel};

/// 每个像素中携带负载的通道布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// 灰度图：每像素 1 个通道。
    Grayscale,
    /// RGB 图：每像素 3 个通道。
    Rgb,
}

impl ChannelLayout {
    /// 每像素携带负载的通道数。
    pub fn channels(self) -> u32 {
        match self {
            Self::Grayscale => 1,
            Self::Rgb => 3,
        }
    }
}

/// 位组与像素通道之间的打包器。
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelPacker {
    config: StegoConfig,
}

impl ChannelPacker {
    pub fn new(config: StegoConfig) -> Self {
        Self { config }
    }

    /// 图像可携带的总位数：`宽 × 高 × 通道数 × 编码位数`。
    pub fn capacity(&self, width: u32, height: u32, layout: ChannelLayout) -> usize {
        width as usize
            * height as usize
            * layout.channels() as usize
            * self.config.encoding_unit as usize
    }

    /// 把负载位 (已含终止符) 写入图像通道的最低有效位。
    ///
    /// 灰度图与 RGB 图直接写入；其他颜色模式先整体转换为 RGB 再写入，
    /// 这是一次格式归一化，不改变负载本身。负载先补零至编码位数的
    /// 整数倍；若超出容量则不做任何写入。负载耗尽后剩余像素保持原样。
    ///
    /// # Errors
    ///
    /// 补零后的负载位数超过图像容量时返回
    /// [`StegoError::InsufficientCapacity`]，此时图像未被修改。
    pub fn encode(&self, image: &mut DynamicImage, bits: &BitSequence) -> Result<(), StegoError> {
        let mut payload = bits.clone();
        payload.pad_to_multiple(self.config.encoding_unit);

        match image {
            DynamicImage::ImageLuma8(buf) => {
                self.embed(buf, ChannelLayout::Grayscale, &payload)?;
            }
            DynamicImage::ImageRgb8(buf) => {
                self.embed(buf, ChannelLayout::Rgb, &payload)?;
            }
            other => {
                let mut rgb = other.to_rgb8();
                self.embed(&mut rgb, ChannelLayout::Rgb, &payload)?;
                *other = DynamicImage::ImageRgb8(rgb);
            }
        }

        Ok(())
    }

    /// 提取图像中每个通道的最低有效位，拼接为完整的位序列。
    ///
    /// 解码端不做颜色模式转换：对已转换的图像再转换只会读出无意义的
    /// 数据，因此不支持的模式在这里是硬错误。本层不负责检测消息结束，
    /// 返回覆盖全部像素通道的序列，终止符的识别由位流编解码器完成。
    ///
    /// # Errors
    ///
    /// 颜色模式既非灰度也非 RGB 时返回 [`StegoError::UnsupportedMode`]。
    pub fn decode(&self, image: &DynamicImage) -> Result<BitSequence, StegoError> {
        match image {
            DynamicImage::ImageLuma8(buf) => Ok(self.extract(buf, ChannelLayout::Grayscale)),
            DynamicImage::ImageRgb8(buf) => Ok(self.extract(buf, ChannelLayout::Rgb)),
            other => Err(StegoError::UnsupportedMode {
                mode: format!("{:?}", other.color()),
            }),
        }
    }

    /// 按列优先顺序写入：清除通道低位后按最高位在前并入下一个位组。
    fn embed<P>(
        &self,
        buf: &mut ImageBuffer<P, Vec<u8>>,
        layout: ChannelLayout,
        payload: &BitSequence,
    ) -> Result<(), StegoError>
    where
        P: Pixel<Subpixel = u8>,
    {
        let (width, height) = buf.dimensions();
        let available = self.capacity(width, height, layout);
        if payload.len() > available {
            return Err(StegoError::InsufficientCapacity {
                required: payload.len(),
                available,
            });
        }

        let unit = self.config.encoding_unit;
        let mut cursor = 0;

        'pixels: for x in 0..width {
            for y in 0..height {
                let pixel = buf.get_pixel_mut(x, y);
                for value in pixel
                    .channels_mut()
                    .iter_mut()
                    .take(layout.channels() as usize)
                {
                    if cursor >= payload.len() {
                        break 'pixels;
                    }
                    *value = ((*value >> unit) << unit) | payload.group_at(cursor, unit);
                    cursor += unit as usize;
                }
            }
        }

        Ok(())
    }

    /// 按与写入相同的列优先顺序读取每个通道的低位。
    fn extract<P>(&self, buf: &ImageBuffer<P, Vec<u8>>, layout: ChannelLayout) -> BitSequence
    where
        P: Pixel<Subpixel = u8>,
    {
        let (width, height) = buf.dimensions();
        let unit = self.config.encoding_unit;
        let mask = (1u8 << unit) - 1;
        let mut bits = BitSequence::with_capacity(self.capacity(width, height, layout));

        for x in 0..width {
            for y in 0..height {
                let pixel = buf.get_pixel(x, y);
                for &value in pixel.channels().iter().take(layout.channels() as usize) {
                    bits.push_group(value & mask, unit);
                }
            }
        }

        bits
    }
}
