//! Browse command implementation
//!
//! Each plain line read from stdin is treated as the search box's new
//! content. Lines arriving within the quiet period of each other collapse
//! into a single search. Lines starting with `:` are commands.

use crate::context::AppContext;
use crate::render;
use anyhow::{Context, Result};
use bookfinder_core::{DetailView, SearchSession, EXAMPLE_QUERIES};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Type a title to search. Commands:
  :next, :prev       move between result pages
  :page N            jump to page N
  :open N            show details for result N
  :example N         search for example N
  :recent            list recently viewed books
  :recent N          show details for recently viewed book N
  :retry             repeat a failed search
  :help              show this help
  :quit              leave";

enum Event {
    Line(Option<String>),
    Settled(bool),
}

/// A parsed `:` command
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Next,
    Prev,
    Page(u32),
    Open(usize),
    Example(usize),
    Recent,
    OpenRecent(usize),
    Retry,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.trim().trim_start_matches(':').split_whitespace();
    let name = parts.next()?;
    let arg = parts.next();

    let command = match (name, arg) {
        ("next" | "n", None) => Command::Next,
        ("prev" | "p", None) => Command::Prev,
        ("page", Some(n)) => Command::Page(n.parse().ok()?),
        ("open" | "o", Some(n)) => Command::Open(n.parse().ok()?),
        ("example" | "e", Some(n)) => Command::Example(n.parse().ok()?),
        ("recent", None) => Command::Recent,
        ("recent", Some(n)) => Command::OpenRecent(n.parse().ok()?),
        ("retry", None) => Command::Retry,
        ("help" | "h", None) => Command::Help,
        ("quit" | "q", None) => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Interactive search session over stdin
pub async fn browse(ctx: &AppContext) -> Result<()> {
    let mut session = ctx.session();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    println!();
    render::print_examples();

    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line.context("Failed to read input")?),
            changed = session.settle(), if session.has_pending_input() => Event::Settled(changed),
        };

        match event {
            Event::Settled(changed) => {
                if changed {
                    refresh(&mut session).await;
                }
            }
            Event::Line(None) => {
                // flush input still waiting out the quiet period
                if session.has_pending_input() && session.settle().await {
                    refresh(&mut session).await;
                }
                break;
            }
            Event::Line(Some(line)) if line.trim_start().starts_with(':') => {
                match parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(command) => run_command(ctx, &mut session, command).await?,
                    None => println!("Unknown command '{}'. Type :help for help.", line.trim()),
                }
            }
            Event::Line(Some(line)) => session.input(line),
        }
    }

    Ok(())
}

async fn run_command(
    ctx: &AppContext,
    session: &mut SearchSession,
    command: Command,
) -> Result<()> {
    let changed = match command {
        Command::Next => session.next_page(),
        Command::Prev => session.prev_page(),
        Command::Page(page) => session.go_to_page(page),
        Command::Retry => session.retry(),
        Command::Example(n) => {
            let changed = n
                .checked_sub(1)
                .is_some_and(|index| session.choose_example(index));
            if !changed && !(1..=EXAMPLE_QUERIES.len()).contains(&n) {
                println!("Choose an example between 1 and {}.", EXAMPLE_QUERIES.len());
            }
            changed
        }
        Command::Open(position) => {
            open(ctx, session, position).await?;
            false
        }
        Command::Recent => {
            render::print_recent(session.recently_viewed());
            false
        }
        Command::OpenRecent(position) => {
            open_recent(ctx, session, position).await?;
            false
        }
        Command::Help => {
            println!("{}", HELP);
            false
        }
        Command::Quit => false,
    };

    if changed {
        refresh(session).await;
    }
    Ok(())
}

async fn open(ctx: &AppContext, session: &mut SearchSession, position: usize) -> Result<()> {
    let book = session
        .result()
        .and_then(|r| position.checked_sub(1).and_then(|i| r.items.get(i)))
        .cloned();
    let Some(book) = book else {
        println!("No result at position {}.", position);
        return Ok(());
    };
    let Some(book_id) = session.select(&book) else {
        println!("'{}' has no detail page.", book.title);
        return Ok(());
    };

    show_detail(ctx, &book.title, book_id).await
}

async fn open_recent(ctx: &AppContext, session: &SearchSession, position: usize) -> Result<()> {
    let record = position
        .checked_sub(1)
        .and_then(|i| session.recently_viewed().get(i));
    let Some(record) = record else {
        println!("No recently viewed book at position {}.", position);
        return Ok(());
    };

    show_detail(ctx, &record.title, record.book_id.clone()).await
}

async fn show_detail(ctx: &AppContext, title: &str, book_id: String) -> Result<()> {
    let pb = render::spinner(format!("Loading '{}'...", title));
    let view = DetailView::load(&ctx.catalog, book_id).await;
    pb.finish_and_clear();

    if let Err(e) = super::show::print_view(ctx, &view, false) {
        println!("{}", e);
    }
    Ok(())
}

async fn refresh(session: &mut SearchSession) {
    let pb = render::spinner(format!("Searching for '{}'...", session.effective_text()));
    session.refresh().await;
    pb.finish_and_clear();
    render::print_session(session);
}
