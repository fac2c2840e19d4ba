mod client;
mod collector;
mod repository;
mod types;

#[cfg(test)]
mod tests;

pub use collector::{DEFAULT_COMMIT_LIMIT, DEFAULT_RUN_LIMIT};
pub use repository::RepoHandle;
