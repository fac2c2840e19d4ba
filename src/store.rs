use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{CiStatsError, Result};
use crate::records::{CheckCollection, Collection, CommitCollection, WorkflowsCollection};

/// A collection that has a fixed file name inside the result directory.
pub trait Persisted: Serialize + DeserializeOwned {
    const FILE_NAME: &'static str;
}

impl Persisted for WorkflowsCollection {
    const FILE_NAME: &'static str = "workflows.json";
}

impl Persisted for CommitCollection {
    const FILE_NAME: &'static str = "commits.json";
}

impl Persisted for CheckCollection {
    const FILE_NAME: &'static str = "checks.json";
}

/// Writes collected results to `<result-dir>/<file>` and reads them back.
///
/// A saved file doubles as a cache: a later run can `load` it instead of
/// talking to GitHub again. Saving always replaces the whole file.
pub struct ResultStore {
    result_dir: PathBuf,
}

impl ResultStore {
    pub fn new(result_dir: impl Into<PathBuf>) -> Self {
        Self {
            result_dir: result_dir.into(),
        }
    }

    pub fn path_for<T: Persisted>(&self) -> PathBuf {
        self.result_dir.join(T::FILE_NAME)
    }

    /// Serializes `value` as 4-space indented JSON, overwriting any previous file.
    ///
    /// # Errors
    ///
    /// Returns an error if the result directory cannot be created or the file
    /// cannot be written.
    pub fn save<T: Persisted>(&self, value: &T) -> Result<PathBuf> {
        let path = self.path_for::<T>();

        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut serializer)?;
        buffer.push(b'\n');

        fs::create_dir_all(&self.result_dir)?;
        fs::write(&path, buffer)?;

        debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Reads a previously saved collection.
    ///
    /// # Errors
    ///
    /// Returns [`CiStatsError::Cache`] if the file is missing and a JSON error
    /// if it cannot be parsed.
    pub fn load<T: Persisted>(&self) -> Result<T> {
        let path = self.path_for::<T>();
        let content = read_existing(&path)?;
        let value = serde_json::from_str(&content)?;

        info!("Loaded cached results from: {}", path.display());
        Ok(value)
    }

    pub fn save_collection(&self, collection: &Collection) -> Result<PathBuf> {
        match collection {
            Collection::Commits(commits) => self.save(commits),
            Collection::Checks(checks) => self.save(checks),
            Collection::Workflows(workflows) => self.save(workflows),
        }
    }
}

fn read_existing(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CiStatsError::Cache(format!(
            "no saved results at {}; run without --load first",
            path.display()
        )));
    }
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{CommitRecord, CommitSummary, FileRecord, WorkflowRunRecord, WorkflowRuns};
    use indexmap::IndexMap;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_workflows(run_ids: &[u64]) -> WorkflowsCollection {
        let mut runs = WorkflowRuns::default();
        for id in run_ids {
            runs.insert(
                *id,
                WorkflowRunRecord {
                    event: "push".to_string(),
                    head_branch: Some("main".to_string()),
                    head_sha: format!("sha-{id}"),
                    jobs: json!({"total_count": 2, "jobs": [{"id": 1}, {"id": 2}]}),
                },
            );
        }
        runs.most_recent = run_ids.first().copied();

        let mut collection = WorkflowsCollection::default();
        collection.workflows.insert(1234, runs);
        collection
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = ResultStore::new(temp_dir.path());
        let workflows = create_test_workflows(&[30, 20, 10]);

        let path = store.save(&workflows).unwrap();
        let loaded: WorkflowsCollection = store.load().unwrap();

        assert_eq!(path, temp_dir.path().join("workflows.json"));
        assert_eq!(loaded, workflows);
        assert_eq!(loaded.workflows[&1234].most_recent, Some(30));
    }

    #[test]
    fn test_commit_collection_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = ResultStore::new(temp_dir.path());

        let mut files = IndexMap::new();
        files.insert(
            "blob1".to_string(),
            FileRecord {
                filename: "src/lib.rs".to_string(),
                raw_url: Some("https://example.com/raw/src/lib.rs".to_string()),
            },
        );
        let commits = CommitCollection {
            branch: "main".to_string(),
            commits: vec![CommitSummary {
                sha: "c1".to_string(),
                message: "Initial commit".to_string(),
                author: None,
                committed_at: None,
            }],
            selected: Some(CommitRecord {
                sha: "c1".to_string(),
                files,
                author: None,
            }),
        };

        store.save(&commits).unwrap();
        let loaded: CommitCollection = store.load().unwrap();

        assert!(temp_dir.path().join("commits.json").exists());
        assert_eq!(loaded, commits);
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = ResultStore::new(temp_dir.path());

        store.save(&create_test_workflows(&[1, 2, 3, 4, 5])).unwrap();
        store.save(&create_test_workflows(&[9])).unwrap();

        let loaded: WorkflowsCollection = store.load().unwrap();
        let runs = &loaded.workflows[&1234];
        assert_eq!(runs.len(), 1);
        assert!(runs.get(9).is_some());
        assert!(runs.get(1).is_none());
    }

    #[test]
    fn test_save_uses_four_space_indent() {
        let temp_dir = TempDir::new().unwrap();
        let store = ResultStore::new(temp_dir.path());

        let path = store.save(&create_test_workflows(&[7])).unwrap();
        let content = fs::read_to_string(path).unwrap();

        assert!(content.starts_with("{\n    \"1234\": {\n        \"7\": {"));
        assert!(content.contains("\"MostRecentWorkflow\": 7"));
    }

    #[test]
    fn test_save_creates_result_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("out").join("ci");
        let store = ResultStore::new(&nested);

        store.save(&create_test_workflows(&[1])).unwrap();

        assert!(nested.join("workflows.json").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = ResultStore::new(temp_dir.path());

        let result = store.load::<WorkflowsCollection>();

        assert!(matches!(result, Err(CiStatsError::Cache(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("workflows.json"), "{ not json").unwrap();
        let store = ResultStore::new(temp_dir.path());

        let result = store.load::<WorkflowsCollection>();

        assert!(matches!(result, Err(CiStatsError::Json(_))));
    }
}
