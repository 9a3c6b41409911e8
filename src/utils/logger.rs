use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// One JSON object per event, for hosts that ship logs to a collector.
    Json,
}

/// `RUST_LOG` wins; otherwise cart events at info, or debug with `verbose`
/// (which also surfaces dependency logs at info).
pub fn cart_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "cart_sync=debug,info"
    } else {
        "cart_sync=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Logs go to stderr so stdout only carries the printed cart.
pub fn init_logger(format: LogFormat, verbose: bool) {
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(cart_filter(verbose));
    match format {
        LogFormat::Compact => registry.with(base.compact()).init(),
        LogFormat::Json => registry.with(base.json()).init(),
    }
}
