// src/logger.rs
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: compact stdout output, plus a daily
/// rolling file under `log_dir` when given. RUST_LOG overrides the default
/// `info` filter. Keep the returned guards alive for the life of the process.
pub fn setup_logger(log_dir: Option<&str>) -> Vec<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let mut guards = vec![stdout_guard];

    let file_layer = log_dir.map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, "sma_signal_bot.log");
        let (file_writer, file_guard) = tracing_appender::non_blocking(appender);
        guards.push(file_guard);
        fmt::layer().with_ansi(false).with_writer(file_writer)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .compact()
                .with_writer(stdout_writer),
        )
        .with(file_layer)
        .init();

    guards
}
