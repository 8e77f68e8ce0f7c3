//! Login, logout, and profile commands.

use std::io::Write;

use crate::api::auth;
use crate::commands::AppContext;
use crate::error::AppError;

/// Reads a line from stdin after printing a prompt.
fn prompt(label: &str) -> Result<String, AppError> {
    print!("{label}: ");
    std::io::stdout()
        .flush()
        .map_err(|e| AppError::Internal(format!("Failed to flush stdout: {e}")))?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| AppError::Internal(format!("Failed to read input: {e}")))?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(ctx: &AppContext, email: &str, password: Option<String>) -> Result<(), AppError> {
    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };

    let response = auth::login(&ctx.api, email, &password).await?;

    ctx.session
        .store_login(&response.access_token, &response.role)
        .await?;
    ctx.api.set_token(&response.access_token).await;

    println!("Logged in as {email} ({})", response.role);
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<(), AppError> {
    ctx.session.clear().await?;
    ctx.api.clear_token().await;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<(), AppError> {
    let profile = auth::me(&ctx.api).await?;

    let name = format!(
        "{} {}",
        profile.first_name.as_deref().unwrap_or(""),
        profile.last_name.as_deref().unwrap_or("")
    );
    let name = name.trim();

    if name.is_empty() {
        println!("{} (#{})", profile.email, profile.id);
    } else {
        println!("{name} <{}> (#{})", profile.email, profile.id);
    }
    if let Some(role) = profile.role {
        println!("Role: {role}");
    }
    Ok(())
}

pub async fn change_password(
    ctx: &AppContext,
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<(), AppError> {
    auth::change_password(&ctx.api, current, new, confirm).await?;
    println!("Password updated.");
    Ok(())
}
