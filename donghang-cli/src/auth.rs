use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};

use crate::state::ensure_donghang_home;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthState {
    /// JWT access token for the backend API.
    pub access_token: Option<String>,
}

fn auth_path() -> Result<std::path::PathBuf> {
    Ok(ensure_donghang_home()?.join("auth.json"))
}

pub fn load_auth() -> Result<AuthState> {
    let p = auth_path()?;
    if !p.exists() {
        return Ok(AuthState::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s)?)
}

pub fn save_auth(auth: &AuthState) -> Result<()> {
    let p = auth_path()?;
    let s = serde_json::to_string_pretty(auth)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

fn prompt_secret(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

pub fn paste_token() -> Result<()> {
    let mut auth = load_auth()?;
    let token = prompt_secret("Paste access token (JWT from the Donghang backend)")?;
    if token.split('.').count() != 3 {
        bail!("token didn't look like a JWT (expected three dot-separated segments)");
    }
    auth.access_token = Some(token);
    save_auth(&auth)?;
    println!("Saved access token to ~/.donghang/auth.json");
    Ok(())
}
