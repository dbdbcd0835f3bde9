// src/main.rs
use msg_cache::core::config::Config;
use msg_cache::Result;
use std::io::Write;

#[tokio::main]
async fn main() {
    if let Err(e) = start().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn start() -> Result<()> {
    let config = Config::load_with_messages(false).await?;
    init_logger(&config.log_level);
    config.log_startup();
    if let Some(info) = &config.debug_info {
        log::info!("{}", info);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    msg_cache::run_with_config(config, &args).await
}

/// Logs to stderr at the configured level; `RUST_LOG` overrides it.
fn init_logger(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder
        .parse_filters(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {:5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    if builder.try_init().is_err() {
        eprintln!("Logger already initialized");
    }
}
