use serde::{Deserialize, Serialize};

/// Configuration from gtdwiki.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WikiConfig {
    #[serde(default)]
    pub gtd: GtdConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GtdConfig {
    /// Run the consistency repair after every toggle
    #[serde(default = "default_true")]
    pub auto_repair: bool,
    /// Promote plain-list ancestors when a single item is promoted to a task
    #[serde(default)]
    pub promote_ancestors: bool,
}

impl Default for GtdConfig {
    fn default() -> Self {
        GtdConfig {
            auto_repair: true,
            promote_ancestors: false,
        }
    }
}

/// How progress annotations are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStyle {
    /// `50%`
    #[default]
    Percent,
    /// `[#####-----]`
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressConfig {
    #[serde(default)]
    pub style: ProgressStyle,
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
    /// Show progress for leaf nodes too, not only nodes with children
    #[serde(default)]
    pub show_all: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        ProgressConfig {
            style: ProgressStyle::Percent,
            bar_width: default_bar_width(),
            show_all: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_bar_width() -> usize {
    10
}
