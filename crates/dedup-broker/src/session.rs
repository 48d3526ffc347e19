//! Account credentials and session tokens.

use crate::error::{BrokerError, BrokerResult};
use std::fmt;

/// Environment variable holding the IG API key.
pub const ENV_API_KEY: &str = "IG_API_KEY";
/// Environment variable holding the account identifier.
pub const ENV_USERNAME: &str = "IG_USERNAME";
/// Environment variable holding the account password.
pub const ENV_PASSWORD: &str = "IG_PASSWORD";

/// Account credentials, sourced from the environment.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Read credentials from `IG_API_KEY`, `IG_USERNAME`, `IG_PASSWORD`.
    pub fn from_env() -> BrokerResult<Self> {
        Ok(Self {
            api_key: require_env(ENV_API_KEY)?,
            username: require_env(ENV_USERNAME)?,
            password: require_env(ENV_PASSWORD)?,
        })
    }
}

// Secrets must never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

fn require_env(name: &'static str) -> BrokerResult<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(BrokerError::MissingCredential(name))
}

/// Session token pair returned by IG on login.
///
/// Both tokens are opaque and must accompany every subsequent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// `CST` response header.
    pub cst: String,
    /// `X-SECURITY-TOKEN` response header.
    pub security_token: String,
}
