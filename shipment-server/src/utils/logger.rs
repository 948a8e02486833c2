//! Logging Infrastructure
//!
//! Structured logging setup via tracing-subscriber.

/// Initialize the logger
///
/// Log level comes from `RUST_LOG` when set, otherwise defaults to info for
/// the server and the HTTP trace layer.
pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shipment_server=info,tower_http=info".into()),
        )
        .with_target(false)
        .init();
}
