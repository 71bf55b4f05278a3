//! Runtime configuration for tala.
//!
//! Resolution order: **env var > `~/.tala/config` file > hardcoded default**.
//!
//! ```text
//! Field       Env Var     Config Key    Default
//! ─────────── ─────────── ───────────── ──────────────────
//! tala_dir    TALA_DIR    —             ~/.tala
//! data_file   TALA_FILE   data_file     <tala_dir>/tala.txt
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::{env, fs};

/// Where the task store lives.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for tala state (`~/.tala` by default).
    pub tala_dir: PathBuf,
    /// Path of the flat-file task store (`TALA_FILE`; default `<tala_dir>/tala.txt`).
    pub data_file: PathBuf,
}

impl Config {
    /// Load config from env vars, the `<tala_dir>/config` file, and defaults.
    pub fn load() -> Result<Self> {
        Self::load_with_env(|k| env::var(k).ok())
    }

    fn load_with_env(get_env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let tala_dir = match get_env("TALA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_tala_dir(&get_env),
        };
        let mut cfg = Self {
            data_file: tala_dir.join("tala.txt"),
            tala_dir,
        };

        // 1. Apply config file overrides
        let config_file = cfg.tala_dir.join("config");
        if config_file.exists() {
            parse_config_file(&config_file, |key, value| {
                if key == "data_file" {
                    cfg.data_file = PathBuf::from(value);
                }
            })?;
        }

        // 2. Apply env var overrides (env wins over file)
        if let Some(file) = get_env("TALA_FILE") {
            cfg.data_file = PathBuf::from(file);
        }

        Ok(cfg)
    }
}

fn default_tala_dir(get_env: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(home) = get_env("HOME") {
        return PathBuf::from(home).join(".tala");
    }
    PathBuf::from(".tala")
}

/// Parse a `key=value` config file, ignoring blank lines and `#` comments.
fn parse_config_file(path: &Path, mut apply: impl FnMut(&str, &str)) -> Result<()> {
    let content = fs::read_to_string(path)?;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            apply(key.trim(), value.trim());
        }
    }
    Ok(())
}
