use anyhow::Context;
use serde::Deserialize;
use tracing::{
  debug,
  error
};

pub const DEFAULT_STORAGE_KEY: &str =
  "todos";
pub const DEFAULT_BACKUP_SUFFIX: &str =
  ".corrupt";

/// What to do when the stored snapshot
/// cannot be parsed at startup. Both
/// variants start from an empty list.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CorruptSnapshotPolicy {
  Empty,
  #[default]
  Backup
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default)]
pub struct PopupConfig {
  pub storage_key:         String,
  pub on_corrupt_snapshot:
    CorruptSnapshotPolicy,
  pub backup_suffix:       String
}

impl Default for PopupConfig {
  fn default() -> Self {
    Self {
      storage_key:         DEFAULT_STORAGE_KEY
        .to_string(),
      on_corrupt_snapshot:
        CorruptSnapshotPolicy::default(),
      backup_suffix:
        DEFAULT_BACKUP_SUFFIX.to_string()
    }
  }
}

impl PopupConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config: PopupConfig =
      toml::from_str(raw).context(
        "failed to parse popup config"
      )?;

    if config.storage_key.trim().is_empty()
    {
      config.storage_key =
        DEFAULT_STORAGE_KEY.to_string();
    }
    if config.backup_suffix.is_empty() {
      config.backup_suffix =
        DEFAULT_BACKUP_SUFFIX.to_string();
    }

    debug!(
      storage_key = %config.storage_key,
      policy = ?config.on_corrupt_snapshot,
      "loaded popup config"
    );
    Ok(config)
  }

  /// Parses embedded config text, logging
  /// and falling back to defaults on error.
  pub fn from_toml_or_default(
    raw: &str
  ) -> Self {
    match Self::from_toml_str(raw) {
      | Ok(config) => config,
      | Err(error) => {
        error!(
          error = ?error,
          "invalid popup config; using \
           defaults"
        );
        Self::default()
      }
    }
  }

  pub fn backup_key(&self) -> String {
    format!(
      "{}{}",
      self.storage_key, self.backup_suffix
    )
  }
}
