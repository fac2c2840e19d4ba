use log::info;
use url::Url;

use crate::auth::Credentials;
use crate::error::{CiStatsError, Result};

use super::client::GitHubClient;
use super::types::GitHubRepository;

/// Handle bound to one GitHub repository.
///
/// Created by [`RepoHandle::resolve`], which checks that the repository is
/// reachable with the supplied credentials. Immutable afterwards.
pub struct RepoHandle {
    client: GitHubClient,
    owner: String,
    name: String,
    default_branch: String,
}

impl RepoHandle {
    /// Resolves a repository identifier into a handle.
    ///
    /// # Arguments
    ///
    /// * `base_url` - GitHub API base URL (e.g., "https://api.github.com")
    /// * `identifier` - Repository in format "owner/name"; a `https://github.com/owner/name`
    ///   URL is accepted too
    /// * `credentials` - Token or basic-auth pair used for every request
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The identifier is not of the form "owner/name" (no request is sent)
    /// - The repository does not exist or is not accessible
    /// - Network or parsing errors occur
    pub async fn resolve(base_url: &str, identifier: &str, credentials: Credentials) -> Result<Self> {
        let (owner, name) = parse_identifier(identifier)?;
        let client = GitHubClient::new(base_url, credentials)?;

        let repository: GitHubRepository = client
            .get_json(client.endpoint(&format!("repos/{owner}/{name}"))?)
            .await?;

        info!(
            "Resolved repository {} (default branch: {})",
            repository.full_name, repository.default_branch
        );

        Ok(Self {
            client,
            owner,
            name,
            default_branch: repository.default_branch,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    pub(super) fn client(&self) -> &GitHubClient {
        &self.client
    }

    /// API path below this repository, e.g. `repo_path("commits")`.
    pub(super) fn repo_path(&self, suffix: &str) -> String {
        format!("repos/{}/{}/{suffix}", self.owner, self.name)
    }
}

/// Splits "owner/name" into its two segments.
pub(super) fn parse_identifier(identifier: &str) -> Result<(String, String)> {
    let trimmed = identifier.trim();

    let path = match Url::parse(trimmed) {
        Ok(url) if url.has_host() => url.path().trim_matches('/').to_string(),
        _ => trimmed.to_string(),
    };
    let path = path.strip_suffix(".git").unwrap_or(&path);

    match path.split('/').collect::<Vec<_>>().as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => {
            Ok(((*owner).to_string(), (*name).to_string()))
        }
        _ => Err(CiStatsError::InvalidRepository(identifier.to_string())),
    }
}
