use std::fmt;

use reqwest::RequestBuilder;

use crate::error::{CiStatsError, Result};

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const USERNAME_VAR: &str = "GITHUB_USERNAME";
pub const PASSWORD_VAR: &str = "GITHUB_PASSWORD";

/// Secret string that never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// How requests to the GitHub API are authenticated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Token(Token),
    Basic { username: String, password: Token },
}

impl Credentials {
    /// Reads credentials from the process environment.
    ///
    /// `GITHUB_TOKEN` takes precedence. Otherwise both `GITHUB_USERNAME` and
    /// `GITHUB_PASSWORD` must be set. Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`CiStatsError::MissingCredentials`] when no usable combination is set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = non_empty(TOKEN_VAR) {
            return Ok(Self::Token(Token::from(token)));
        }

        match (non_empty(USERNAME_VAR), non_empty(PASSWORD_VAR)) {
            (Some(username), Some(password)) => Ok(Self::Basic {
                username,
                password: Token::from(password),
            }),
            _ => Err(CiStatsError::MissingCredentials),
        }
    }

    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Token(token) => request.bearer_auth(token.as_str()),
            Self::Basic { username, password } => {
                request.basic_auth(username, Some(password.as_str()))
            }
        }
    }
}
