use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_donghang_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerSection,
    pub assistant: AssistantSection,
    pub chat: ChatSection,
}

/// Backend API carrying the ledger (and its JWT auth).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub base_url: String,
}

/// External AI chat service answering non-expense utterances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantSection {
    pub base_url: String,
    /// Turn off to always use the canned local responses.
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSection {
    pub session_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerSection {
                base_url: "http://localhost:3000".to_string(),
            },
            assistant: AssistantSection {
                base_url: "http://localhost:3000".to_string(),
                enabled: true,
            },
            chat: ChatSection {
                session_id: "default".to_string(),
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_donghang_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}
