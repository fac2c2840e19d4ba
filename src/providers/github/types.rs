use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::records::UserRef;

/// Repository metadata returned by `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepository {
    pub full_name: String,
    pub default_branch: String,
}

/// Entry of the commit listing.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitListItem {
    pub sha: String,
    pub commit: GitCommit,
    /// GitHub account linked to the commit author, if any
    pub author: Option<UserRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitCommit {
    pub message: String,
    pub author: Option<GitSignature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitSignature {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// Single commit with its changed files.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommit {
    pub sha: String,
    #[serde(default)]
    pub files: Vec<GitHubFile>,
    pub author: Option<UserRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubFile {
    /// Blob sha; absent for submodule changes
    pub sha: Option<String>,
    pub filename: String,
    pub raw_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckSuitesResponse {
    pub check_suites: Vec<GitHubCheckSuite>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCheckSuite {
    pub id: u64,
    pub app: Option<GitHubApp>,
    pub status: Option<String>,
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubApp {
    pub slug: Option<String>,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckRunsResponse {
    pub check_runs: Vec<GitHubCheckRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCheckRun {
    pub id: u64,
    pub name: String,
    pub status: Option<String>,
    pub conclusion: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowsResponse {
    pub workflows: Vec<GitHubWorkflow>,
}

/// Workflow definition, as listed under `actions/workflows`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubWorkflow {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowRunsResponse {
    pub workflow_runs: Vec<GitHubWorkflowRun>,
}

/// GitHub Actions workflow run.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubWorkflowRun {
    /// Unique identifier for the workflow run
    pub id: u64,
    /// Event that triggered the run
    pub event: String,
    /// Head branch or tag name
    pub head_branch: Option<String>,
    /// SHA of the head commit
    pub head_sha: String,
    /// Absolute URL listing the jobs of this run
    pub jobs_url: String,
}
