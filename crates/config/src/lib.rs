//! Ambient configuration for the bloom-filter command surface, loaded
//! entirely from the environment (no config file, no CLI flags), the same
//! way the host's own process entry points are configured.

/// Environment-driven defaults for a running `cli` process.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// Default target error rate for newly created chains that don't
    /// specify `ERROR` explicitly. Overridden by `BLOOM_DEFAULT_ERROR`.
    pub default_error: f64,
    /// `tracing-subscriber` filter directive. Overridden by `BLOOM_LOG`
    /// (falling back to `RUST_LOG` if that's unset, then `info`).
    pub log_filter: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            default_error: bloom::DEFAULT_ERROR,
            log_filter: "info".to_string(),
        }
    }
}

impl HostConfig {
    /// Loads configuration from the environment, falling back to the
    /// compiled-in defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let default_error = env_or("BLOOM_DEFAULT_ERROR", &bloom::DEFAULT_ERROR.to_string())
            .parse()
            .unwrap_or(bloom::DEFAULT_ERROR);

        let log_filter = std::env::var("BLOOM_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());

        Self {
            default_error,
            log_filter,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
