//! Deployment environments and the credentials used against them.
//!
//! Each named environment maps to a versioned base endpoint, an unversioned
//! "raw" endpoint, and the environment variables holding its API keys.
//! Resolution takes an explicit variable map so it can be exercised without
//! touching the process environment.

use crate::error::{FixrunError, Result};
use std::collections::HashMap;

/// Endpoint and credential variable names for one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentProfile {
    /// Environment name as given on the command line.
    pub name: &'static str,
    /// Base URL for versioned API calls.
    pub base_url: &'static str,
    /// Base URL for raw calls.
    pub raw_base_url: &'static str,
    /// Version segment appended to `base_url`.
    pub api_path: &'static str,
    /// Variable holding the primary API key.
    pub key_var: &'static str,
    /// Variable holding the alternate API key.
    pub alt_key_var: &'static str,
}

/// Known environments.
pub const ENVIRONMENTS: &[EnvironmentProfile] = &[
    EnvironmentProfile {
        name: "local",
        base_url: "https://khk-local.wss.daily.co:8080/",
        raw_base_url: "https://khk-local.wss.daily.co:8080/",
        api_path: "api/v1/",
        key_var: "DAILY_API_KEY",
        alt_key_var: "DAILY_API_KEY_ALT",
    },
    EnvironmentProfile {
        name: "staging",
        base_url: "https://staging.daily.co/",
        raw_base_url: "https://staging.daily.co/",
        api_path: "api/v1/",
        key_var: "DAILY_API_KEY",
        alt_key_var: "DAILY_API_KEY_ALT",
    },
    EnvironmentProfile {
        name: "blue",
        base_url: "https://qa-ks.pluot.blue/",
        raw_base_url: "https://qa-ks.pluot.blue/",
        api_path: "api/v1/",
        key_var: "DAILY_API_KEY",
        alt_key_var: "DAILY_API_KEY_ALT",
    },
    EnvironmentProfile {
        name: "prod",
        base_url: "https://api.daily.co/",
        raw_base_url: "https://daily.co/",
        api_path: "v1/",
        key_var: "DAILY_API_KEY_PROD",
        alt_key_var: "DAILY_API_KEY_PROD_ALT",
    },
];

/// Variable holding the login-flow token.
pub const LOGIN_TOKEN_VAR: &str = "DAILY_LOGIN_TOKEN";

/// Variable holding the alternate login-flow token.
pub const LOGIN_TOKEN_ALT_VAR: &str = "DAILY_LOGIN_TOKEN_ALT";

/// Look up an environment profile by name.
///
/// # Errors
///
/// Returns `UnknownEnvironment` listing the valid names.
pub fn profile(name: &str) -> Result<&'static EnvironmentProfile> {
    ENVIRONMENTS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| FixrunError::UnknownEnvironment {
            name: name.to_string(),
            known: ENVIRONMENTS
                .iter()
                .map(|p| p.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Load environment variables from the process.
pub fn load_system_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Base URLs for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base URL for versioned calls.
    pub base_url: String,
    /// Base URL for raw calls.
    pub raw_base_url: String,
    /// Version segment between `base_url` and the fixture path.
    pub api_path: String,
}

impl Endpoints {
    /// Endpoints straight from a profile.
    pub fn from_profile(profile: &EnvironmentProfile) -> Self {
        Self {
            base_url: profile.base_url.to_string(),
            raw_base_url: profile.raw_base_url.to_string(),
            api_path: profile.api_path.to_string(),
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, overrides: &EndpointOverrides) -> Self {
        if let Some(base) = &overrides.base_url {
            self.base_url = base.clone();
        }
        if let Some(raw) = &overrides.raw_base_url {
            self.raw_base_url = raw.clone();
        }
        if let Some(api_path) = &overrides.api_path {
            self.api_path = api_path.clone();
        }
        self
    }

    /// Prefix for a fixture path: raw base, or base plus version segment.
    pub fn prefix(&self, raw: bool) -> String {
        if raw {
            self.raw_base_url.clone()
        } else {
            format!("{}{}", self.base_url, self.api_path)
        }
    }
}

/// Optional replacements for a profile's endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointOverrides {
    pub base_url: Option<String>,
    pub raw_base_url: Option<String>,
    pub api_path: Option<String>,
}

/// A bearer credential, remembering where it came from for diagnostics.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Variable the value was read from.
    pub source: String,
    value: String,
}

impl Credential {
    /// Wrap a credential value.
    pub fn new(source: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            value: value.into(),
        }
    }

    /// The raw token.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("source", &self.source)
            .field("value", &"***")
            .finish()
    }
}

/// Endpoints and bearer credentials for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSet {
    pub endpoints: Endpoints,
    pub api_key: Credential,
    pub api_key_alt: Option<Credential>,
    pub login_token: Option<Credential>,
    pub login_token_alt: Option<Credential>,
}

impl CredentialSet {
    /// Resolve credentials for `profile` from an environment map.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` if the primary API key is not set.
    pub fn from_env(profile: &EnvironmentProfile, env: &HashMap<String, String>) -> Result<Self> {
        let read = |var: &str| {
            env.get(var)
                .filter(|v| !v.is_empty())
                .map(|v| Credential::new(var, v.clone()))
        };

        let api_key = read(profile.key_var).ok_or_else(|| FixrunError::MissingCredential {
            name: profile.key_var.to_string(),
            reason: format!("required for environment '{}'", profile.name),
        })?;

        Ok(Self {
            endpoints: Endpoints::from_profile(profile),
            api_key,
            api_key_alt: read(profile.alt_key_var),
            login_token: read(LOGIN_TOKEN_VAR),
            login_token_alt: read(LOGIN_TOKEN_ALT_VAR),
        })
    }

    /// Credentials with a single API key against fixed endpoints.
    pub fn new(endpoints: Endpoints, api_key: impl Into<String>) -> Self {
        Self {
            endpoints,
            api_key: Credential::new("api_key", api_key),
            api_key_alt: None,
            login_token: None,
            login_token_alt: None,
        }
    }

    /// Replace the endpoints.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}
