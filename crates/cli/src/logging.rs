//! Logging setup
//!
//! `-v` lowers the minimum level of the s3cp crates from info to debug.
//! Dependencies stay at warn. `RUST_LOG`, when set, replaces both.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Crates whose level follows `--verbose`
const CRATES: [&str; 3] = ["s3cp", "s3cp_core", "s3cp_s3"];

/// Filter directives for the given verbosity
pub fn directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    std::iter::once("warn".to_string())
        .chain(CRATES.iter().map(|krate| format!("{krate}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbose)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            directives(false),
            "warn,s3cp=info,s3cp_core=info,s3cp_s3=info"
        );
    }

    #[test]
    fn test_verbose_directives() {
        let directives = directives(true);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("s3cp_core=debug"));
        assert!(!directives.contains("=info"));
    }
}
