use anyhow::{Context, Result};
use colored::Colorize;

use crate::auth::{self, StoredCredentials};
use crate::cli::LoginArgs;
use crate::output::{print_error, print_success};

pub fn login(server: &str, args: &LoginArgs, profile: &str) -> Result<()> {
    let creds = match &args.token {
        Some(token) => StoredCredentials::Bearer {
            server: server.to_string(),
            access_token: token.clone(),
        },
        None => {
            let username = args
                .username
                .as_deref()
                .context("--username or --token is required")?;
            let password = args
                .password
                .as_deref()
                .context("--password is required")?;
            StoredCredentials::Basic {
                server: server.to_string(),
                username: username.to_string(),
                password: password.to_string(),
            }
        }
    };
    auth::save_credentials(profile, &creds)?;

    match &creds {
        StoredCredentials::Basic { username, .. } => print_success(&format!(
            "Saved Basic Auth credentials for {} (user: {})",
            server.cyan(),
            username.cyan()
        )),
        StoredCredentials::Bearer { .. } => {
            print_success(&format!("Saved Bearer token for {}", server.cyan()))
        }
    }
    Ok(())
}

pub fn logout(profile: &str) -> Result<()> {
    if auth::remove_credentials(profile)? {
        print_success("Logged out (credentials removed)");
    } else {
        println!("No credentials found for profile \"{profile}\"");
    }
    Ok(())
}

pub fn whoami(profile: &str) -> Result<()> {
    match auth::load_credentials(profile)? {
        Some(creds) => {
            println!("{}: {}", "Profile".cyan(), profile);
            println!("{}: {}", "Server".cyan(), creds.server().cyan());
            match &creds {
                StoredCredentials::Basic { username, .. } => {
                    println!("{}: Basic (user: {})", "Auth".cyan(), username);
                }
                StoredCredentials::Bearer { access_token, .. } => {
                    println!("{}: Bearer (token: {})", "Auth".cyan(), token_preview(access_token));
                }
            }
        }
        None => {
            print_error(&format!("Not logged in (profile: \"{profile}\")"));
        }
    }
    Ok(())
}

fn token_preview(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 20 {
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 8..].iter().collect();
        format!("{head}...{tail}")
    } else {
        token.to_string()
    }
}
