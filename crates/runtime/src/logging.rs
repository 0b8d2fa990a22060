//! Logging setup for hosts embedding the interpreter.
//!
//! The interpreter itself only emits `tracing` events; nothing is printed
//! unless a subscriber is installed. Collector events are gated by the
//! `tracegc` flag before they reach the subscriber (`> 1` per-collection
//! debug events, `> 2` info summaries, `> 5` per-step engine traces).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` plus a
/// `joy_runtime=info` directive.
///
/// Returns `false` if a global subscriber was already set, so hosts and
/// tests may call this more than once.
pub fn init() -> bool {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "joy_runtime=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        assert!(!init());
    }
}
