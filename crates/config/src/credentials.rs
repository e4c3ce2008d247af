// crates/config/src/credentials.rs
//! FTP credential retrieval
//!
//! Credentials are never taken on the command line (they would end up in
//! shell history); the device's FTP user and password come from the
//! `MCP2_USER` and `MCP2_PWD` environment variables. Absence of either is
//! a fatal precondition failure, checked before any network activity.

use crate::error::{ConfigError, ConfigResult};
use std::fmt;

/// Environment variable holding the FTP user name
pub const USER_VAR: &str = "MCP2_USER";
/// Environment variable holding the FTP password
pub const PASSWORD_VAR: &str = "MCP2_PWD";

/// FTP credentials for the device
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Reads credentials from the standard environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_vars(USER_VAR, PASSWORD_VAR)
    }

    /// Reads credentials from a specific pair of environment variables.
    pub fn from_env_vars(user_var: &str, password_var: &str) -> ConfigResult<Self> {
        match (std::env::var(user_var), std::env::var(password_var)) {
            (Ok(user), Ok(password)) => Ok(Self { user, password }),
            _ => Err(ConfigError::MissingCredential {
                user_var: user_var.to_string(),
                password_var: password_var.to_string(),
            }),
        }
    }
}

// The password must not leak through debug formatting of settings or errors.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"****")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_vars_present() {
        std::env::set_var("MCSYNC_TEST_CRED_USER", "card-reader");
        std::env::set_var("MCSYNC_TEST_CRED_PWD", "hunter2");

        let creds =
            Credentials::from_env_vars("MCSYNC_TEST_CRED_USER", "MCSYNC_TEST_CRED_PWD").unwrap();
        assert_eq!(creds.user, "card-reader");
        assert_eq!(creds.password, "hunter2");
    }

    #[test]
    fn test_from_env_vars_user_missing() {
        std::env::set_var("MCSYNC_TEST_ONLY_PWD", "hunter2");

        let err = Credentials::from_env_vars("MCSYNC_TEST_ABSENT_USER", "MCSYNC_TEST_ONLY_PWD")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }

    #[test]
    fn test_from_env_vars_password_missing() {
        std::env::set_var("MCSYNC_TEST_ONLY_USER", "card-reader");

        let err = Credentials::from_env_vars("MCSYNC_TEST_ONLY_USER", "MCSYNC_TEST_ABSENT_PWD")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials {
            user: "card-reader".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("card-reader"));
    }
}
