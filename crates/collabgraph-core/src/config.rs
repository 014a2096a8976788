use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::interaction::{InteractionKind, InteractionWeights};

/// File looked up in the working directory when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "collabgraph.toml";

/// Tolerance used to treat two weighted shortest-path lengths as equal.
pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub pagerank: PageRankSettings,
    #[serde(default)]
    pub eigenvector: EigenvectorSettings,
    #[serde(default)]
    pub community: CommunitySettings,
    #[serde(default)]
    pub betweenness: BetweennessSettings,
    #[serde(default)]
    pub interactions: InteractionSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankSettings {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorSettings {
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for EigenvectorSettings {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunitySettings {
    #[serde(default = "default_max_splits")]
    pub max_splits: usize,
    #[serde(default)]
    pub target_communities: Option<usize>,
}

impl Default for CommunitySettings {
    fn default() -> Self {
        Self {
            max_splits: default_max_splits(),
            target_communities: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetweennessSettings {
    #[serde(default = "default_tie_tolerance")]
    pub tie_tolerance: f64,
}

impl Default for BetweennessSettings {
    fn default() -> Self {
        Self {
            tie_tolerance: default_tie_tolerance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionSettings {
    #[serde(default = "default_enabled_kinds")]
    pub enabled: Vec<InteractionKind>,
    #[serde(default)]
    pub weights: InteractionWeights,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled_kinds(),
            weights: InteractionWeights::default(),
        }
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_splits() -> usize {
    5
}

const fn default_tie_tolerance() -> f64 {
    DEFAULT_TIE_TOLERANCE
}

fn default_enabled_kinds() -> Vec<InteractionKind> {
    InteractionKind::ALL.to_vec()
}

impl AnalysisConfig {
    /// Reject settings the engines cannot run with.
    ///
    /// # Errors
    ///
    /// Describes the first offending setting.
    pub fn validate(&self) -> Result<()> {
        let damping = self.pagerank.damping;
        if !(0.0..=1.0).contains(&damping) {
            bail!("pagerank.damping must be within [0, 1], got {damping}");
        }
        for (name, value) in [
            ("pagerank.tolerance", self.pagerank.tolerance),
            ("eigenvector.tolerance", self.eigenvector.tolerance),
            ("betweenness.tie_tolerance", self.betweenness.tie_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} must be a non-negative number, got {value}");
            }
        }
        for kind in &self.interactions.enabled {
            let weight = self.interactions.weights.weight(*kind);
            if !weight.is_finite() || weight <= 0.0 {
                bail!(
                    "interactions.weights.{} must be positive, got {weight}",
                    kind.as_str()
                );
            }
        }
        Ok(())
    }
}

/// Parse and validate a configuration document.
///
/// # Errors
///
/// TOML syntax errors or invalid settings.
pub fn parse_config(content: &str) -> Result<AnalysisConfig> {
    let config: AnalysisConfig = toml::from_str(content).context("invalid configuration")?;
    config.validate()?;
    Ok(config)
}

/// Resolve the configuration path: an explicit path wins, otherwise
/// [`CONFIG_FILE_NAME`] in `working_dir` if it exists.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>, working_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = working_dir.join(CONFIG_FILE_NAME);
    candidate.exists().then_some(candidate)
}

/// Load the analysis configuration.
///
/// With no explicit path and no `collabgraph.toml` in `working_dir`, the
/// defaults are returned.
///
/// # Errors
///
/// An explicit path that cannot be read, or a file that fails to parse or
/// validate.
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<AnalysisConfig> {
    let Some(path) = resolve_config_path(explicit, working_dir) else {
        return Ok(AnalysisConfig::default());
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
