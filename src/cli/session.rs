//! Session commands: login, logout, whoami.

use std::env;

use crate::session::{self, Session, SessionError};

use super::Context;

pub(super) fn cmd_login(
    ctx: &Context<'_>,
    email: &str,
    password: Option<&str>,
) -> Result<(), String> {
    let password = match password {
        Some(p) => p.to_string(),
        None => env::var("PUBDESK_PASSWORD")
            .map_err(|_| "password required: pass --password or set PUBDESK_PASSWORD")?,
    };

    if ctx.config.accounts.is_empty() {
        return Err("no accounts configured: add [[accounts]] to config.toml".to_string());
    }

    let session = session::login(ctx.storage, &ctx.config.accounts, email, &password)
        .map_err(|e| format!("login failed: {e}"))?;

    eprintln!("Signed in as {}", session.email);
    Ok(())
}

pub(super) fn cmd_logout(ctx: &Context<'_>) -> Result<(), String> {
    let ended = session::logout(ctx.storage).map_err(|e| format!("logout failed: {e}"))?;
    if ended {
        eprintln!("Signed out");
    } else {
        eprintln!("Not signed in");
    }
    Ok(())
}

pub(super) fn cmd_whoami(ctx: &Context<'_>) -> Result<(), String> {
    let session = require(ctx)?;
    println!("{}  (since {})", session.email, session.started_at);
    Ok(())
}

/// The active session, or an error telling the user to sign in.
pub(super) fn require(ctx: &Context<'_>) -> Result<Session, String> {
    session::current(ctx.storage).map_err(|e| match e {
        SessionError::NotSignedIn => e.to_string(),
        other => format!("failed to read session: {other}"),
    })
}
