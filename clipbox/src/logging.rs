//! Subscriber setup for demos and tests
//!
//! Hosts with their own subscriber never need this module. The clipbox crates
//! only emit events; these helpers install a compact `fmt` subscriber so a
//! small tool can see them.

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "clipbox=info,clipbox_winit=info,warn";

#[cfg(feature = "tracing")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}

/// Install a global subscriber, honouring `RUST_LOG` over [`DEFAULT_FILTER`]
///
/// Leaves an already installed subscriber in place.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if !install(filter) {
        crate::clip_debug!("global subscriber already set, keeping it");
    }
}

/// Install a global subscriber with an explicit filter such as `"clipbox=trace"`
///
/// Returns `false` if the filter does not parse or a subscriber is already set.
#[cfg(feature = "tracing")]
pub fn init_tracing_with_filter(filter: &str) -> bool {
    match tracing_subscriber::EnvFilter::try_new(filter) {
        Ok(filter) => install(filter),
        Err(_) => false,
    }
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing() {
    eprintln!("clipbox: built without the `tracing` feature, no log output");
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing_with_filter(_filter: &str) -> bool {
    eprintln!("clipbox: built without the `tracing` feature, no log output");
    false
}
