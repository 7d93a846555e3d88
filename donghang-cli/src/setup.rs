use anyhow::Result;
use std::io::{self, Write};

use crate::state::{Profile, profile_path, write_profile};

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

pub fn run_setup() -> Result<()> {
    println!("Donghang setup\n");
    let name = prompt("Your name (optional)")?;
    let region = prompt("Region, e.g. 서울 (optional)")?;
    let timezone = prompt("Timezone (blank = Asia/Seoul)")?;

    let profile = Profile {
        created_at_utc: Some(chrono::Utc::now().to_rfc3339()),
        name,
        region,
        timezone: if timezone.is_empty() {
            "Asia/Seoul".to_string()
        } else {
            timezone
        },
    };
    write_profile(&profile)?;

    println!("\nWrote:");
    println!("- {}", profile_path()?.display());

    println!("\nNext recommended steps:");
    println!("- donghang config init              (write ~/.donghang/config.toml)");
    println!("- donghang auth paste-token         (store your backend access token)");
    println!("- donghang chat                     (start talking to 금복)");

    Ok(())
}
