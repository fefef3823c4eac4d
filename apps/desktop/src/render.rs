use std::fmt::{self, Write};

use client_core::{ScreenState, ViewModel};

pub fn render(view: &ViewModel<'_>) -> String {
    let mut out = String::new();
    if let Err(err) = write_view(view, &mut out) {
        tracing::warn!(error = %err, "failed to render view");
    }
    out
}

fn write_view(view: &ViewModel<'_>, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "[{}]", view.connectivity.label())?;

    match view.screen {
        ScreenState::Loading => writeln!(out, "Loading application...")?,
        ScreenState::Landing => {
            writeln!(out, "FoodApp - Discover & Share Amazing Recipes")?;
            writeln!(out, "  login <email> <password> | login --demo")?;
            writeln!(out, "  Admin Panel: {}", view.admin_url)?;
        }
        ScreenState::Dashboard => write_dashboard(view, out)?,
    }

    if let Some(notice) = view.notice {
        writeln!(out, "! {} (dismiss to clear)", notice.message)?;
    }
    Ok(())
}

fn write_dashboard(view: &ViewModel<'_>, out: &mut impl Write) -> fmt::Result {
    if let Some(user) = view.user {
        writeln!(out, "Welcome, {}! (role: {})", user.name, user.role.as_str())?;
    }
    writeln!(out, "Admin Panel: {}", view.admin_url)?;
    writeln!(out, "Community Recipes")?;
    if view.recipes.is_empty() {
        writeln!(out, "  No recipes found. Be the first to add one!")?;
    }
    for recipe in view.recipes {
        writeln!(
            out,
            "  - {} ({} min) by {}",
            recipe.title,
            recipe.prep_time_minutes,
            recipe.author_label()
        )?;
        if !recipe.description.is_empty() {
            writeln!(out, "      {}", recipe.description)?;
        }
        if let Some(url) = recipe.thumbnail_url() {
            writeln!(out, "      photo: {url}")?;
        }
    }
    writeln!(out, "  commands: load | logout | show")?;
    if view.can_create {
        writeln!(
            out,
            "  create \"<title>\" --photo <file> [--description <text>] [--prep <minutes>]"
        )?;
    }
    Ok(())
}
