//! Search command implementation

use crate::context::AppContext;
use crate::render;
use anyhow::{bail, Context, Result};
use bookfinder_core::{DetailView, SearchSession, SearchState};

/// Search by title, optionally opening one of the results
pub async fn search(
    ctx: &AppContext,
    title: &str,
    page: u32,
    open: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut session = ctx.session();
    session.submit_at(title, page);
    if session.state() == SearchState::Idle {
        render::print_examples();
        return Ok(());
    }

    if run(&mut session).await == SearchState::Failed {
        match session.error() {
            Some(e) => bail!("Search for '{}' failed: {}", title, e),
            None => bail!("Search for '{}' failed", title),
        }
    }

    if let Some(result) = session.result() {
        if result.total_pages > 0 && page > result.total_pages {
            bail!(
                "Page {} is out of range: '{}' has {} page(s)",
                page,
                title,
                result.total_pages
            );
        }
    }

    if let Some(position) = open {
        let book = session
            .result()
            .and_then(|r| position.checked_sub(1).and_then(|i| r.items.get(i)))
            .cloned()
            .with_context(|| format!("No result at position {}", position))?;
        let Some(book_id) = session.select(&book) else {
            bail!("'{}' has no detail page", book.title);
        };

        let pb = render::spinner(format!("Loading '{}'...", book.title));
        let view = DetailView::load(&ctx.catalog, book_id).await;
        pb.finish_and_clear();
        return super::show::print_view(ctx, &view, json);
    }

    if json {
        match session.result() {
            Some(result) => println!("{}", serde_json::to_string_pretty(result)?),
            None => println!("null"),
        }
    } else {
        render::print_session(&session);
    }
    Ok(())
}

/// Send the session's pending request behind a spinner
async fn run(session: &mut SearchSession) -> SearchState {
    let pb = render::spinner(format!(
        "Searching for '{}' (page {})...",
        session.effective_text(),
        session.page()
    ));
    let state = session.refresh().await;
    pb.finish_and_clear();
    state
}
