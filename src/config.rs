//! Runner configuration.

use serde::{Deserialize, Serialize};

/// How report output is rendered for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Plain lines for a terminal or log file. Markup is stripped.
    #[default]
    Text,
    /// Markup fragments for a page that styles the report.
    Html,
}

/// Configuration for a [`Runner`](crate::runner::Runner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub render_mode: RenderMode,
    /// Colorize text-mode lines written to a terminal console.
    pub use_colors: bool,
    /// Seed for the random utilities; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Text,
            use_colors: atty::is(atty::Stream::Stdout),
            seed: None,
        }
    }
}

impl RunnerConfig {
    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
