// SPDX-License-Identifier: MIT
//
// Log setup. Everything goes to stderr; stdout carries only rendered
// output, so `glint render -v file.py > out.txt` stays clean.
//
// RUST_LOG, when set, wins over -v (e.g. RUST_LOG=glint_docs=trace).

use tracing_subscriber::EnvFilter;

/// The filter directive for a `-v` count.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .without_time()
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(3), "trace");
        assert_eq!(level_for(200), "trace");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(0);
        init(3);
    }
}
