//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构。编码与解码通过互斥的 `-e` 和
//! `-d` 标志触发，两者必须提供其一；参数缺失或标志错误时 `clap` 会
//! 打印用法并以状态码 2 退出，`-h`/`--help` 则以 0 退出。

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文本。",
    group(ArgGroup::new("action").required(true).args(["encode", "decode"]))
)]
pub struct Cli {
    /// 编码：隐藏文本文件内容，生成 `encoded_<原文件名主干>.png` 并打印其路径。
    #[arg(
        short = 'e',
        long = "encode",
        num_args = 2,
        value_names = ["TEXT_FILE", "IMAGE_FILE"]
    )]
    pub encode: Option<Vec<PathBuf>>,

    /// 解码：从图像中恢复隐藏的文本并打印到标准输出。
    #[arg(short = 'd', long = "decode", value_name = "IMAGE_FILE")]
    pub decode: Option<PathBuf>,
}
