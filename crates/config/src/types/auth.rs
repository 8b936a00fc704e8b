//! Administrative credential types for cluster configuration.
//!
//! Responsibilities:
//! - Define the administrative username/password pair of a cluster.
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - Deciding when credentials are applied to a connection (see client crate).
//!
//! Invariants:
//! - Passwords use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization includes secrets for config file persistence; secrecy is for runtime safety.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Username/password pair provisioned for the cluster administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    #[serde(with = "secret_string")]
    pub password: SecretString,
}

impl AdminCredentials {
    /// Create a credential pair.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self::new(
            DEFAULT_ADMIN_USERNAME,
            SecretString::new(DEFAULT_ADMIN_PASSWORD.to_string().into()),
        )
    }
}

impl PartialEq for AdminCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

impl Eq for AdminCredentials {}
