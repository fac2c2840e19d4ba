use indexmap::IndexMap;
use log::{debug, info, warn};
use serde_json::Value;
use url::Url;

use crate::error::{CiStatsError, Result};
use crate::records::{
    CheckCollection, CheckRunRecord, CheckSuiteRecord, CommitCollection, CommitRecord,
    CommitSummary, FileRecord, WorkflowRunRecord, WorkflowRuns, WorkflowsCollection,
};

use super::repository::RepoHandle;
use super::types::{
    CheckRunsResponse, CheckSuitesResponse, GitHubCommit, GitHubCommitListItem,
    WorkflowRunsResponse, WorkflowsResponse,
};

pub const DEFAULT_COMMIT_LIMIT: usize = 100;
pub const DEFAULT_RUN_LIMIT: usize = 10;

impl RepoHandle {
    /// Lists the newest commits on the default branch and expands one of them.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of commits to list
    /// * `sha` - Commit to expand; defaults to the newest listed commit
    ///
    /// # Returns
    ///
    /// The commit listing plus the expanded commit, or no expanded commit when
    /// the branch has no commits and no `sha` was given.
    pub async fn collect_commits(&self, limit: usize, sha: Option<&str>) -> Result<CommitCollection> {
        let branch = self.default_branch().to_string();
        info!("Fetching up to {limit} commits on {branch}...");

        let commits: Vec<CommitSummary> = self
            .list_commits(&branch, limit)
            .await?
            .into_iter()
            .map(commit_summary)
            .collect();

        info!("Fetched {} commits", commits.len());

        let selected_sha = sha
            .map(ToString::to_string)
            .or_else(|| commits.first().map(|commit| commit.sha.clone()));

        let selected = match selected_sha {
            Some(sha) => Some(self.fetch_commit_record(&sha).await?),
            None => {
                warn!("No commits found on branch {branch}");
                None
            }
        };

        Ok(CommitCollection {
            branch,
            commits,
            selected,
        })
    }

    /// Enumerates check suites of a commit and the check runs inside each suite.
    ///
    /// Without `sha` the newest commit on the default branch is used.
    pub async fn collect_checks(&self, sha: Option<&str>) -> Result<CheckCollection> {
        let sha = match sha {
            Some(sha) => sha.to_string(),
            None => self.latest_commit_sha().await?,
        };

        info!("Fetching check suites for commit {sha}...");

        let suites = self
            .client()
            .get_pages(
                &self.repo_path(&format!("commits/{sha}/check-suites")),
                &[],
                None,
                |page: CheckSuitesResponse| page.check_suites,
            )
            .await?;

        let mut check_suites = Vec::with_capacity(suites.len());
        for suite in suites {
            let app = suite.app.map(|app| app.slug.unwrap_or(app.name));

            let runs = self
                .client()
                .get_pages(
                    &self.repo_path(&format!("check-suites/{}/check-runs", suite.id)),
                    &[],
                    None,
                    |page: CheckRunsResponse| page.check_runs,
                )
                .await?;

            let check_runs: Vec<CheckRunRecord> = runs
                .into_iter()
                .map(|run| {
                    info!("{}: {}", app.as_deref().unwrap_or("unknown app"), run.name);
                    CheckRunRecord {
                        id: run.id,
                        name: run.name,
                        status: run.status,
                        conclusion: run.conclusion,
                    }
                })
                .collect();

            check_suites.push(CheckSuiteRecord {
                id: suite.id,
                app,
                status: suite.status,
                conclusion: suite.conclusion,
                check_runs,
            });
        }

        Ok(CheckCollection { sha, check_suites })
    }

    /// Collects recent runs of every workflow in the repository.
    ///
    /// For each workflow the newest `run_limit` runs are kept. Each run's jobs
    /// listing is fetched from its `jobs_url` and stored as-is. Requests run
    /// strictly one after another and the first failure aborts collection.
    ///
    /// # Arguments
    ///
    /// * `run_limit` - Maximum number of runs recorded per workflow
    ///
    /// # Returns
    ///
    /// Run records keyed by workflow id, each with a `MostRecentWorkflow`
    /// pointer to the run listed first.
    pub async fn collect_workflows(&self, run_limit: usize) -> Result<WorkflowsCollection> {
        info!("Fetching workflows...");

        let workflows = self
            .client()
            .get_pages(
                &self.repo_path("actions/workflows"),
                &[],
                None,
                |page: WorkflowsResponse| page.workflows,
            )
            .await?;

        info!("Fetched {} workflows", workflows.len());

        let mut collection = WorkflowsCollection::default();
        for workflow in workflows {
            let runs = self
                .client()
                .get_pages(
                    &self.repo_path(&format!("actions/workflows/{}/runs", workflow.id)),
                    &[],
                    Some(run_limit),
                    |page: WorkflowRunsResponse| page.workflow_runs,
                )
                .await?;

            debug!("Workflow '{}' ({}): {} runs", workflow.name, workflow.id, runs.len());

            let mut umbrella = WorkflowRuns::default();
            umbrella.most_recent = runs.first().map(|run| run.id);

            for run in runs {
                let jobs: Value = self.client().get_json(Url::parse(&run.jobs_url)?).await?;
                umbrella.insert(
                    run.id,
                    WorkflowRunRecord {
                        event: run.event,
                        head_branch: run.head_branch,
                        head_sha: run.head_sha,
                        jobs,
                    },
                );
            }

            collection.workflows.insert(workflow.id, umbrella);
        }

        info!("Collected {} workflow runs", collection.run_count());

        Ok(collection)
    }

    async fn list_commits(&self, branch: &str, limit: usize) -> Result<Vec<GitHubCommitListItem>> {
        self.client()
            .get_pages(
                &self.repo_path("commits"),
                &[("sha", branch)],
                Some(limit),
                std::convert::identity,
            )
            .await
    }

    async fn latest_commit_sha(&self) -> Result<String> {
        let branch = self.default_branch();
        self.list_commits(branch, 1)
            .await?
            .into_iter()
            .next()
            .map(|commit| commit.sha)
            .ok_or_else(|| CiStatsError::NoCommits(branch.to_string()))
    }

    async fn fetch_commit_record(&self, sha: &str) -> Result<CommitRecord> {
        let commit: GitHubCommit = self
            .client()
            .get_json(self.client().endpoint(&self.repo_path(&format!("commits/{sha}")))?)
            .await?;

        let mut files = IndexMap::with_capacity(commit.files.len());
        for file in commit.files {
            let Some(blob_sha) = file.sha else {
                debug!("Skipping {} without blob sha", file.filename);
                continue;
            };
            files.insert(
                blob_sha,
                FileRecord {
                    filename: file.filename,
                    raw_url: file.raw_url,
                },
            );
        }

        Ok(CommitRecord {
            sha: commit.sha,
            files,
            author: commit.author,
        })
    }
}

fn commit_summary(item: GitHubCommitListItem) -> CommitSummary {
    let signature = item.commit.author;
    let message = item
        .commit
        .message
        .lines()
        .next()
        .unwrap_or_default()
        .to_string();

    CommitSummary {
        sha: item.sha,
        message,
        author: item
            .author
            .map(|user| user.login)
            .or_else(|| signature.as_ref().and_then(|s| s.name.clone())),
        committed_at: signature.and_then(|s| s.date),
    }
}
