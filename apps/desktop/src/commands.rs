//! Typed shell commands and their translation into core intents.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{parse_prep_time, Intent, PhotoUpload, RecipeDraft, DEMO_IDENTIFIER, DEMO_SECRET};

#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Sign in with email and password, or with the demo chef account.
    Login {
        email: Option<String>,
        password: Option<String>,
        #[arg(long)]
        demo: bool,
    },
    /// End the session and drop cached recipes.
    Logout,
    /// Re-fetch recipes, newest first.
    Load,
    /// Submit a new recipe.
    Create {
        title: Option<String>,
        #[arg(long)]
        photo: Option<PathBuf>,
        #[arg(long, default_value = "")]
        description: String,
        /// Preparation time in minutes; anything unparsable counts as 0.
        #[arg(long, default_value = "0")]
        prep: String,
    },
    /// Acknowledge the current message.
    Dismiss,
    /// Print the current screen again.
    Show,
    #[command(alias = "exit")]
    Quit,
}

pub enum Action {
    Dispatch(Intent),
    Show,
    Quit,
}

pub fn parse_line(line: &str) -> Result<Option<ShellCommand>> {
    let words = split_words(line)?;
    if words.is_empty() {
        return Ok(None);
    }
    let parsed = ShellLine::try_parse_from(words).map_err(|err| anyhow!(err.render().to_string()))?;
    Ok(Some(parsed.command))
}

pub async fn into_action(command: ShellCommand) -> Result<Action> {
    let action = match command {
        ShellCommand::Login {
            email,
            password,
            demo,
        } => {
            let (identifier, secret) = if demo {
                (DEMO_IDENTIFIER.to_string(), DEMO_SECRET.to_string())
            } else {
                match (email, password) {
                    (Some(email), Some(password)) => (email, password),
                    _ => return Err(anyhow!("usage: login <email> <password> | login --demo")),
                }
            };
            Action::Dispatch(Intent::Login { identifier, secret })
        }
        ShellCommand::Logout => Action::Dispatch(Intent::Logout),
        ShellCommand::Load => Action::Dispatch(Intent::LoadCollection),
        ShellCommand::Create {
            title,
            photo,
            description,
            prep,
        } => {
            let photo = match photo {
                Some(path) => Some(read_photo(&path).await?),
                None => None,
            };
            Action::Dispatch(Intent::CreateRecipe(RecipeDraft {
                title: title.unwrap_or_default(),
                description,
                prep_time_minutes: parse_prep_time(&prep),
                photo,
            }))
        }
        ShellCommand::Dismiss => Action::Dispatch(Intent::DismissNotice),
        ShellCommand::Show => Action::Show,
        ShellCommand::Quit => Action::Quit,
    };
    Ok(action)
}

async fn read_photo(path: &Path) -> Result<PhotoUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read photo '{}'", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string());
    Ok(PhotoUpload {
        filename,
        mime_type,
        bytes,
    })
}

/// Whitespace splitting with double-quoted segments kept together.
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if in_quotes {
        return Err(anyhow!("unterminated quote"));
    }
    if pending {
        words.push(current);
    }
    Ok(words)
}
