use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::selector::DialogPolicy;

#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct SelectorConfig {
    #[serde(default)]
    pub dialog_policy: DialogPolicy,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct KitConfig {
    #[serde(default)]
    pub selector: SelectorConfig,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KitConfigOverrides {
    pub dialog_policy: Option<DialogPolicy>,
}

impl KitConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("Config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: &KitConfigOverrides) {
        if let Some(policy) = overrides.dialog_policy {
            self.selector.dialog_policy = policy;
        }
    }
}

impl KitConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.dialog_policy.is_none()
    }
}
