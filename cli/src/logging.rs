use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Log to stderr, `RUST_LOG` taking precedence over the level picked on the command line.
pub fn setup_logger(default_level: &str) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_owned());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
