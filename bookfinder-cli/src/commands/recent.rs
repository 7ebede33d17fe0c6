//! Recent command implementation

use crate::context::AppContext;
use crate::render;
use anyhow::{Context, Result};

/// List (or forget) recently viewed books
pub fn recent(ctx: &AppContext, json: bool, clear: bool) -> Result<()> {
    if clear {
        ctx.recent
            .clear()
            .context("Failed to clear recently viewed books")?;
        tracing::info!("Cleared recently viewed books");
        return Ok(());
    }

    let records = ctx.recent.load();
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        render::print_recent(&records);
    }
    Ok(())
}
