use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use crate::auth::Credentials;
use crate::config::Config;
use crate::output::{self, PhaseProgress};
use crate::providers::RepoHandle;
use crate::records::Collection;
use crate::store::ResultStore;

#[derive(Parser, Debug)]
#[command(name = "ci-stats")]
#[command(
    author,
    version,
    about = "Collect GitHub commit, check run and workflow run metadata",
    long_about = None
)]
pub struct Cli {
    /// Repository to query, as owner/repo
    #[arg(long, value_name = "OWNER/REPO")]
    url: Option<String>,

    /// Directory receiving the JSON results
    #[arg(long, value_name = "PATH")]
    result_dir: Option<PathBuf>,

    /// Which metadata to collect
    #[arg(short, long, value_enum, default_value_t = Strategy::Workflows)]
    strategy: Strategy,

    /// Commit to inspect with the commits and checks strategies
    #[arg(long)]
    sha: Option<String>,

    /// Read previously saved results instead of querying GitHub
    #[arg(long, overrides_with = "no_load")]
    load: bool,

    /// Query GitHub and save the results (default)
    #[arg(long, overrides_with = "load")]
    no_load: bool,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Maximum number of commits to list
    #[arg(long)]
    commit_limit: Option<usize>,

    /// Maximum number of runs recorded per workflow
    #[arg(long)]
    run_limit: Option<usize>,

    /// Configuration file (defaults to ./ci-stats.{toml,json,yaml,yml})
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suppress banner, progress and summary output
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    Commits,
    Checks,
    Workflows,
}

impl Strategy {
    fn as_str(self) -> &'static str {
        match self {
            Self::Commits => "commits",
            Self::Checks => "check runs",
            Self::Workflows => "workflow runs",
        }
    }
}

/// Flags merged with the configuration file.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    repo: Option<String>,
    api_url: String,
    result_dir: PathBuf,
    commit_limit: usize,
    run_limit: usize,
    quiet: bool,
}

impl Cli {
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    fn load_requested(&self) -> bool {
        self.load && !self.no_load
    }

    fn settings(&self, config: Config) -> Settings {
        Settings {
            repo: self.url.clone().or(config.github.repo),
            api_url: self.api_url.clone().unwrap_or(config.github.api_url),
            result_dir: self
                .result_dir
                .clone()
                .unwrap_or(config.output.result_dir),
            commit_limit: self.commit_limit.unwrap_or(config.github.commit_limit),
            run_limit: self.run_limit.unwrap_or(config.github.run_limit),
            quiet: self.quiet || config.output.quiet,
        }
    }

    fn load_cached(&self, store: &ResultStore) -> Result<Collection> {
        let collection = match self.strategy {
            Strategy::Commits => Collection::Commits(store.load()?),
            Strategy::Checks => Collection::Checks(store.load()?),
            Strategy::Workflows => Collection::Workflows(store.load()?),
        };
        Ok(collection)
    }

    async fn collect(&self, repo: &RepoHandle, settings: &Settings) -> Result<Collection> {
        let sha = self.sha.as_deref();
        let collection = match self.strategy {
            Strategy::Commits => {
                Collection::Commits(repo.collect_commits(settings.commit_limit, sha).await?)
            }
            Strategy::Checks => Collection::Checks(repo.collect_checks(sha).await?),
            Strategy::Workflows => {
                Collection::Workflows(repo.collect_workflows(settings.run_limit).await?)
            }
        };
        Ok(collection)
    }

    async fn collect_and_save(&self, settings: &Settings, store: &ResultStore) -> Result<Collection> {
        let identifier = settings
            .repo
            .as_deref()
            .context("No repository given: pass --url owner/repo or set github.repo in the config file")?;

        let credentials = Credentials::from_env()?;

        let progress = PhaseProgress::start_phase_1(identifier, !settings.quiet);

        let repo = RepoHandle::resolve(&settings.api_url, identifier, credentials)
            .await
            .with_context(|| format!("Failed to resolve repository {identifier}"))?;

        let progress = progress.finish_phase_1_start_phase_2(self.strategy.as_str());

        let collection = self
            .collect(&repo, settings)
            .await
            .with_context(|| format!("Failed to collect {}", self.strategy.as_str()))?;

        let progress = progress.finish_phase_2_start_phase_3(collection.record_count());

        let path = store.save_collection(&collection)?;
        info!("Results written to: {}", path.display());

        progress.finish_phase_3(&path.display().to_string());

        Ok(collection)
    }

    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let settings = self.settings(config);
        let store = ResultStore::new(&settings.result_dir);

        let (collection, source) = if self.load_requested() {
            info!("Loading saved {} from {}", self.strategy.as_str(), settings.result_dir.display());
            (self.load_cached(&store)?, settings.result_dir.display().to_string())
        } else {
            let collection = self.collect_and_save(&settings, &store).await?;
            (collection, settings.repo.clone().unwrap_or_default())
        };

        if !settings.quiet {
            output::print_summary(&collection, &source);
        }

        Ok(())
    }
}
