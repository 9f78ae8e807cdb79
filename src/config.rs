// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where and under which filename stem the TLS identity is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionConfig {
    /// Destination directory. Not created or checked before writing.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Filename stem; empty falls back to [`ProvisionConfig::DEFAULT_PREFIX`].
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_prefix() -> String {
    ProvisionConfig::DEFAULT_PREFIX.to_string()
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            prefix: default_prefix(),
        }
    }
}

impl ProvisionConfig {
    /// Stem used when no prefix is given.
    pub const DEFAULT_PREFIX: &'static str = "kube-oidc-proxy";

    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
        }
    }

    pub fn effective_prefix(&self) -> &str {
        if self.prefix.is_empty() {
            Self::DEFAULT_PREFIX
        } else {
            &self.prefix
        }
    }

    /// `<directory>/<prefix>-ca.pem`
    pub fn cert_path(&self) -> PathBuf {
        self.directory.join(format!("{}-ca.pem", self.effective_prefix()))
    }

    /// `<directory>/<prefix>-key.pem`
    pub fn key_path(&self) -> PathBuf {
        self.directory.join(format!("{}-key.pem", self.effective_prefix()))
    }

    /// Load from a TOML file, or return defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| Error::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Provision a TLS identity with the default self-signed generator.
    pub fn provision(&self) -> Result<crate::bundle::KeyBundle> {
        crate::bundle::provision_with(self, &crate::generate::SelfSignedGenerator::default())
    }
}
