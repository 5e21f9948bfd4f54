use tracing_subscriber::{filter::Directive, fmt::format::FmtSpan, prelude::*, EnvFilter};

const QUIET_TARGETS: [&str; 5] = ["hyper", "h2", "rustls", "reqwest", "actix_server"];

/// Initialize logging. `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: &str) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    for target in QUIET_TARGETS {
        if let Ok(directive) = format!("{}=off", target).parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}
