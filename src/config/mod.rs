//! Run configuration.
//!
//! - [`environment`] - Named deployment environments, endpoints and credentials
//!
//! # Example
//!
//! ```
//! use fixrun::config::{profile, CredentialSet};
//! use std::collections::HashMap;
//!
//! let mut env = HashMap::new();
//! env.insert("DAILY_API_KEY".to_string(), "secret".to_string());
//!
//! let creds = CredentialSet::from_env(profile("staging").unwrap(), &env).unwrap();
//! assert_eq!(creds.endpoints.prefix(false), "https://staging.daily.co/api/v1/");
//! ```

pub mod environment;

pub use environment::{
    load_system_env, profile, Credential, CredentialSet, EndpointOverrides, Endpoints,
    EnvironmentProfile, ENVIRONMENTS, LOGIN_TOKEN_ALT_VAR, LOGIN_TOKEN_VAR,
};
