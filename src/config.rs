// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Configuration loading.

use serde::Deserialize;

use crate::archive::DEFAULT_MEMBER_PREFIX;
use crate::parser::ImportOptions;

/// Upper bound for decode threads accepted from configuration.
const MAX_WORKERS: usize = 256;

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Archive members holding transactions start with this prefix
    #[serde(default = "default_member_prefix")]
    pub member_prefix: String,

    /// Decode threads; 1 decodes inline while reading the archive
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_member_prefix() -> String {
    DEFAULT_MEMBER_PREFIX.to_string()
}

fn default_workers() -> usize {
    1
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            member_prefix: default_member_prefix(),
            workers: default_workers(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExportConfig {
    /// Path to write imported entries as JSONL
    #[serde(default)]
    pub captures: Option<String>,

    /// Directory to write raw `.http` request/response files
    #[serde(default)]
    pub dump_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// `[general]`
    /// member_prefix = "request_"
    /// workers = 4
    ///
    /// `[export]`
    /// captures = "entries.jsonl"
    /// dump_dir = "raw"
    pub async fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let s = tokio::fs::read_to_string(path_ref).await?;
        let cfg: Self = toml::from_str(&s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.general.member_prefix.is_empty() {
            anyhow::bail!("Invalid 'member_prefix' in [general]: must not be empty");
        }
        if self.general.workers > MAX_WORKERS {
            anyhow::bail!(
                "Invalid 'workers' in [general]: {} exceeds the maximum of {}",
                self.general.workers,
                MAX_WORKERS
            );
        }
        Ok(())
    }

    /// Library options derived from the `[general]` table.
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            member_prefix: self.general.member_prefix.clone(),
            workers: self.general.workers,
        }
    }
}
