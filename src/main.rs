use clap::Parser;

use bitveil::{
    cli::Cli,
    handler::{handle_decode, handle_encode},
};

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的标志（`-e` 或 `-d`）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 根据标志调用相应的处理函数
    match (cli.encode.as_deref(), cli.decode) {
        (Some([text, image]), _) => handle_encode(text, image).map(|_| ()),
        (_, Some(image)) => handle_decode(&image),
        // clap 的必选参数组保证至少命中上面其中一个分支
        _ => anyhow::bail!("No action specified. Use -e or -d (see --help)."),
    }
}
