//! Application configuration.
//!
//! # Responsibility
//! - Collect the composition-time choices: save policy, create flow, host
//!   platform and database location.
//! - Resolve them from `POCKETNOTE_*` environment variables.
//!
//! # Invariants
//! - Blank variables fall back to defaults.
//! - `Live` saving is only valid together with `StoreFirst` creation.

use crate::confirm::HostPlatform;
use crate::screen::editor::SavePolicy;
use crate::store::memory::MemoryNoteStore;
use crate::store::note_store::{NoteStore, StoreResult};
use crate::store::sqlite::SqliteNoteStore;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_SAVE_POLICY: &str = "POCKETNOTE_SAVE_POLICY";
pub const ENV_CREATE_FLOW: &str = "POCKETNOTE_CREATE_FLOW";
pub const ENV_PLATFORM: &str = "POCKETNOTE_PLATFORM";
pub const ENV_DB_PATH: &str = "POCKETNOTE_DB_PATH";

/// How the new-note control reaches the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreateFlow {
    /// Open an empty draft immediately; the store sees it on submit.
    #[default]
    LocalDraft,
    /// Add an empty note first, then edit it under its assigned id.
    StoreFirst,
}

impl CreateFlow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LocalDraft => "local_draft",
            Self::StoreFirst => "store_first",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Live saving cannot start from an unsaved draft.
    LiveRequiresStoreFirst,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid {key} `{value}`; expected {expected}"),
            Self::LiveRequiresStoreFirst => write!(
                f,
                "live save policy requires the store_first create flow"
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub save_policy: SavePolicy,
    pub create_flow: CreateFlow,
    pub platform: HostPlatform,
    /// `None` keeps notes in memory for the process lifetime.
    pub db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_policy: SavePolicy::Buffered,
            create_flow: CreateFlow::LocalDraft,
            platform: HostPlatform::Android,
            db_path: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, validating the result.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = Self::default();
        if let Some(raw) = value(ENV_SAVE_POLICY) {
            config.save_policy = parse_save_policy(&raw)?;
        }
        if let Some(raw) = value(ENV_CREATE_FLOW) {
            config.create_flow = parse_create_flow(&raw)?;
        }
        if let Some(raw) = value(ENV_PLATFORM) {
            config.platform =
                HostPlatform::parse(&raw).map_err(|err| ConfigError::InvalidValue {
                    key: ENV_PLATFORM,
                    value: err.0,
                    expected: "web|ios|android",
                })?;
        }
        config.db_path = value(ENV_DB_PATH).map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.save_policy == SavePolicy::Live && self.create_flow == CreateFlow::LocalDraft {
            return Err(ConfigError::LiveRequiresStoreFirst);
        }
        Ok(())
    }
}

/// Opens the store selected by `config`.
pub fn open_store(config: &AppConfig) -> StoreResult<Box<dyn NoteStore>> {
    match &config.db_path {
        Some(path) => Ok(Box::new(SqliteNoteStore::open(path)?)),
        None => Ok(Box::new(MemoryNoteStore::new())),
    }
}

fn parse_save_policy(raw: &str) -> Result<SavePolicy, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "buffered" => Ok(SavePolicy::Buffered),
        "live" => Ok(SavePolicy::Live),
        _ => Err(ConfigError::InvalidValue {
            key: ENV_SAVE_POLICY,
            value: raw.to_string(),
            expected: "buffered|live",
        }),
    }
}

fn parse_create_flow(raw: &str) -> Result<CreateFlow, ConfigError> {
    match raw.to_ascii_lowercase().replace('-', "_").as_str() {
        "local_draft" => Ok(CreateFlow::LocalDraft),
        "store_first" => Ok(CreateFlow::StoreFirst),
        _ => Err(ConfigError::InvalidValue {
            key: ENV_CREATE_FLOW,
            value: raw.to_string(),
            expected: "local_draft|store_first",
        }),
    }
}
