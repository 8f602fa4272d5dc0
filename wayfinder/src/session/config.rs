//! Search session configuration.

/// Configuration parameters for a search session.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Maximum number of results to surface. `None` keeps everything the
    /// provider returns.
    pub max_results: Option<usize>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_results: Option<usize>) -> Self {
        Self { max_results }
    }

    /// Cap the number of surfaced results.
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = Some(n);
        self
    }
}
