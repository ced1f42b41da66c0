use reservoir_sample::config::Tunables;
use reservoir_sample::core::make_rng;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use tracing::{debug, info};

mod cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse_args();

    // 初始化日志, stdout 留给采样输出
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .init();

    // 加载配置
    let config = match Tunables::from_env().and_then(|tunables| cli.into_config(&tunables)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid configuration: {:#}", e);
            return ExitCode::from(2);
        }
    };
    info!("Configuration: {:?}", config);

    let mut rng = make_rng(config.seed);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match reservoir_sample::run(&config, &mut rng, &mut out) {
        Ok(report) => {
            info!(
                "Sampling finished: {}",
                serde_json::to_string(&report).unwrap_or_default()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Fast-fail: 直接返回错误，不做降级
            debug!(kind = ?e.kind(), "run aborted");
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
