//! Show command implementation

use crate::context::AppContext;
use crate::render;
use anyhow::{bail, Result};
use bookfinder_core::{AuthorDetails, DetailView, WorkDetails};
use serde::Serialize;

/// Detail output
#[derive(Serialize)]
struct DetailOutput<'a> {
    work: &'a WorkDetails,
    author: Option<&'a AuthorDetails>,
}

/// Show a work and its primary author
pub async fn show(ctx: &AppContext, book_id: &str, json: bool) -> Result<()> {
    let pb = render::spinner(format!("Loading {}...", book_id));
    let view = DetailView::load(&ctx.catalog, book_id).await;
    pb.finish_and_clear();

    print_view(ctx, &view, json)
}

pub(crate) fn print_view(ctx: &AppContext, view: &DetailView, json: bool) -> Result<()> {
    let Some(work) = view.work() else {
        match view.work.error() {
            Some(e) => bail!("Failed to load book '{}': {}", view.book_id, e),
            None => bail!("Book '{}' not found", view.book_id),
        }
    };

    if json {
        let output = DetailOutput {
            work,
            author: view.author(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        render::print_detail(view, ctx.covers_url());
    }
    Ok(())
}
