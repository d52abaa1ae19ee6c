use serde::{Deserialize, Serialize};
use std::path::Path;

use sentinel_core::AccountId;

use crate::error::{ServerError, ServerResult};

/// Top-level configuration for the Sentinel server.
///
/// Loaded from a TOML file. Identities are hex-encoded account ids
/// (`0x`-prefixed or bare). The owner must be set before the server can
/// initialize; signer and validators may also be seeded at startup or set
/// later through the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentinelConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Port for the HTTP listener.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Administrative owner identity (hex account id).
    #[serde(default)]
    pub owner: String,

    /// Trusted signer identity to configure at startup, if any.
    #[serde(default)]
    pub signer: Option<String>,

    /// Validator identities to grant at startup.
    #[serde(default)]
    pub validators: Vec<String>,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            owner: String::new(),
            signer: None,
            validators: Vec::new(),
        }
    }
}

impl SentinelConfig {
    /// Load configuration from a TOML file. If the file does not exist,
    /// returns a default configuration (owner unset — it must be provided
    /// before `initialize`).
    pub fn load(path: &Path) -> ServerResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(ServerError::Io)?;
        let config: SentinelConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> ServerResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ServerError::Config(format!("TOML serialize error: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ServerError::Io)?;
        }
        std::fs::write(path, contents).map_err(ServerError::Io)?;
        Ok(())
    }

    /// Validate configuration values: the port must be non-zero and every
    /// configured identity must parse to a concrete (non-null) account id.
    pub fn validate(&self) -> ServerResult<()> {
        if self.port == 0 {
            return Err(ServerError::Config("port must be non-zero".into()));
        }
        if !self.owner.is_empty() {
            Self::parse_identity("owner", &self.owner)?;
        }
        if let Some(signer) = &self.signer {
            Self::parse_identity("signer", signer)?;
        }
        for v in &self.validators {
            Self::parse_identity("validator", v)?;
        }
        Ok(())
    }

    fn parse_identity(field: &str, s: &str) -> ServerResult<AccountId> {
        let id = AccountId::from_hex(s)
            .map_err(|e| ServerError::Config(format!("invalid {} identity '{}': {}", field, s, e)))?;
        if id.is_zero() {
            return Err(ServerError::Config(format!(
                "{} identity must not be the null account",
                field
            )));
        }
        Ok(id)
    }

    /// The parsed owner identity. Errors if the owner is unset or invalid.
    pub fn owner_account(&self) -> ServerResult<AccountId> {
        if self.owner.is_empty() {
            return Err(ServerError::Config(
                "owner is not set; provide it in the config file or via --owner".into(),
            ));
        }
        Self::parse_identity("owner", &self.owner)
    }

    pub fn signer_account(&self) -> ServerResult<Option<AccountId>> {
        match &self.signer {
            Some(s) => Ok(Some(Self::parse_identity("signer", s)?)),
            None => Ok(None),
        }
    }

    pub fn validator_accounts(&self) -> ServerResult<Vec<AccountId>> {
        self.validators
            .iter()
            .map(|v| Self::parse_identity("validator", v))
            .collect()
    }
}
