use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::providers::github::{DEFAULT_COMMIT_LIMIT, DEFAULT_RUN_LIMIT};

/// Configuration file structure for ci-stats.
///
/// Lets users keep the repository, API endpoint and output location in a file
/// instead of repeating them on every run. Command-line flags take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// GitHub API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Repository to query (e.g., 'owner/repo')
    pub repo: Option<String>,

    /// Maximum number of commits to list
    #[serde(default = "default_commit_limit")]
    pub commit_limit: usize,

    /// Maximum number of runs recorded per workflow
    #[serde(default = "default_run_limit")]
    pub run_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving the JSON result files
    #[serde(default = "default_result_dir")]
    pub result_dir: PathBuf,

    /// Skip banner, progress and summary output
    #[serde(default)]
    pub quiet: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            repo: None,
            commit_limit: default_commit_limit(),
            run_limit: default_run_limit(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            result_dir: default_result_dir(),
            quiet: false,
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_commit_limit() -> usize {
    DEFAULT_COMMIT_LIMIT
}

fn default_run_limit() -> usize {
    DEFAULT_RUN_LIMIT
}

fn default_result_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./ci-stats.toml
    /// 3. ./ci-stats.json
    /// 4. ./ci-stats.yaml
    /// 5. ./ci-stats.yml
    ///
    /// Returns default configuration if no file is found. An explicitly given
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let candidates = [
            "ci-stats.toml",
            "ci-stats.json",
            "ci-stats.yaml",
            "ci-stats.yml",
        ];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => {
                // Try TOML first, then JSON, then YAML
                toml::from_str(&contents)
                    .or_else(|_| serde_json::from_str(&contents))
                    .or_else(|_| serde_yaml::from_str(&contents))
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))
            }
        }
    }
}
