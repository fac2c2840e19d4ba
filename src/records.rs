use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reference to a GitHub user as embedded in commit payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    pub raw_url: Option<String>,
}

/// Flattened view of a single commit: changed files keyed by blob sha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub files: IndexMap<String, FileRecord>,
    pub author: Option<UserRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
    pub author: Option<String>,
    pub committed_at: Option<DateTime<Utc>>,
}

/// Output of the commit strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitCollection {
    pub branch: String,
    pub commits: Vec<CommitSummary>,
    pub selected: Option<CommitRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunRecord {
    pub id: u64,
    pub name: String,
    pub status: Option<String>,
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSuiteRecord {
    pub id: u64,
    pub app: Option<String>,
    pub status: Option<String>,
    pub conclusion: Option<String>,
    pub check_runs: Vec<CheckRunRecord>,
}

/// Output of the check strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCollection {
    pub sha: String,
    pub check_suites: Vec<CheckSuiteRecord>,
}

impl CheckCollection {
    pub fn check_run_count(&self) -> usize {
        self.check_suites.iter().map(|s| s.check_runs.len()).sum()
    }
}

/// One workflow run. `jobs` is the unmodified body returned by the run's jobs URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRunRecord {
    pub event: String,
    pub head_branch: Option<String>,
    pub head_sha: String,
    pub jobs: Value,
}

/// Runs of a single workflow keyed by run id, next to the `MostRecentWorkflow`
/// pointer holding the id of the newest run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRuns {
    #[serde(flatten)]
    runs: IndexMap<String, WorkflowRunRecord>,
    #[serde(rename = "MostRecentWorkflow", default)]
    pub most_recent: Option<u64>,
}

impl WorkflowRuns {
    pub fn insert(&mut self, run_id: u64, record: WorkflowRunRecord) {
        self.runs.insert(run_id.to_string(), record);
    }

    pub fn get(&self, run_id: u64) -> Option<&WorkflowRunRecord> {
        self.runs.get(&run_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WorkflowRunRecord)> {
        self.runs.iter().map(|(id, record)| (id.as_str(), record))
    }
}

/// Output of the workflow strategy: umbrella per workflow id, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowsCollection {
    pub workflows: IndexMap<u64, WorkflowRuns>,
}

impl WorkflowsCollection {
    pub fn run_count(&self) -> usize {
        self.workflows.values().map(WorkflowRuns::len).sum()
    }
}

/// Whatever a single invocation collected or loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    Commits(CommitCollection),
    Checks(CheckCollection),
    Workflows(WorkflowsCollection),
}

impl Collection {
    pub fn record_count(&self) -> usize {
        match self {
            Self::Commits(commits) => commits.commits.len(),
            Self::Checks(checks) => checks.check_run_count(),
            Self::Workflows(workflows) => workflows.run_count(),
        }
    }
}
