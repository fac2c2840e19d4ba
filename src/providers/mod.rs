pub mod github;

pub use github::RepoHandle;
