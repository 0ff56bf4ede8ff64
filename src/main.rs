use anyhow::{Context, Result};
use cryptobench::{BenchConfig, BenchmarkSuite};
use tracing::error;

/// 初始化日志系统（输出到 stderr，报告独占 stdout）
fn init_logging() {
    // 如果已经初始化则跳过
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_logging();

    let suite = BenchmarkSuite::new(BenchConfig::default()).context("创建基准测试套件失败")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = suite.run(&mut out) {
        error!("基准测试中止: {}", e);
        return Err(e).context("基准测试中止");
    }
    Ok(())
}
