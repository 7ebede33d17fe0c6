//! Terminal rendering for search results, details, and the recent list

use bookfinder_core::pagination::render_links;
use bookfinder_core::types::{access_badge_text, CoverSize};
use bookfinder_core::{
    AuthorDetails, BookSummary, DetailView, SearchResult, SearchSession, SearchState,
    ViewedBookRecord, WorkDetails, EXAMPLE_QUERIES,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a catalog request is outstanding
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.into());
    pb
}

pub fn print_examples() {
    println!("Discover your next favorite book. Try one of these:");
    for (i, title) in EXAMPLE_QUERIES.iter().enumerate() {
        println!("  {}. {}", i + 1, title);
    }
}

fn print_summary(position: usize, book: &BookSummary) {
    let year = book
        .first_publish_year
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    println!("{:>3}. {}{}", position, book.title, year);
    if let Some(subtitle) = &book.subtitle {
        println!("     {}", subtitle);
    }
    println!("     by {}", book.author_names_display());

    let mut facts = Vec::new();
    if let Some(count) = book.edition_count {
        facts.push(format!("{} editions", count));
    }
    if let Some(count) = book.language_count {
        facts.push(format!("{} languages", count));
    }
    if book.ebook_access.is_some() {
        facts.push(access_badge_text(book.ebook_access).to_string());
    }
    if !facts.is_empty() {
        println!("     {}", facts.join(" | "));
    }
}

/// Print one page of results, numbered from 1 within the page
pub fn print_result(result: &SearchResult) {
    println!(
        "Found {} books (page {} of {})",
        result.total_found, result.current_page, result.total_pages
    );
    for (i, book) in result.items.iter().enumerate() {
        print_summary(i + 1, book);
    }
}

/// Print whatever the session currently has to show
pub fn print_session(session: &SearchSession) {
    match session.state() {
        SearchState::Idle => print_examples(),
        SearchState::Debouncing | SearchState::Querying => {}
        SearchState::Empty => println!("No books found for '{}'.", session.effective_text()),
        SearchState::Failed => {
            if let Some(e) = session.error() {
                println!("Search failed: {}", e);
            }
        }
        SearchState::Ready => {
            if let Some(result) = session.result() {
                print_result(result);
            }
            if let Some(pagination) = session.pagination() {
                println!("{}", render_links(&pagination.links()));
            }
        }
    }
}

pub fn print_work(work: &WorkDetails, covers_url: &str) {
    println!("{}", work.title);
    println!("First published: {}", work.first_published());
    if let Some(url) = work.cover_url(covers_url, CoverSize::Large) {
        println!("Cover: {}", url);
    }
    println!();
    println!("{}", work.description_or_placeholder());

    let subjects = work.displayed_subjects();
    if !subjects.is_empty() {
        println!();
        println!("Subjects: {}", subjects.join(", "));
    }
    if !work.external_links.is_empty() {
        println!();
        println!("Links:");
        for link in &work.external_links {
            println!("  {} <{}>", link.title, link.url);
        }
    }
}

pub fn print_author(author: &AuthorDetails, covers_url: &str) {
    println!();
    match author.life_span() {
        Some(span) => println!("About {} {}", author.name, span),
        None => println!("About {}", author.name),
    }
    if let Some(url) = author.photo_url(covers_url, CoverSize::Medium) {
        println!("Photo: {}", url);
    }
    let bio = author.bio_or_empty();
    if !bio.is_empty() {
        println!("{}", bio);
    }
}

pub fn print_detail(view: &DetailView, covers_url: &str) {
    match view.work() {
        Some(work) => print_work(work, covers_url),
        None => {
            println!("Could not load book {}.", view.book_id);
            return;
        }
    }
    if let Some(author) = view.author() {
        print_author(author, covers_url);
    }
}

pub fn print_recent(records: &[ViewedBookRecord]) {
    if records.is_empty() {
        println!("No recently viewed books.");
        return;
    }
    println!("Recently viewed:");
    for record in records {
        println!(
            "  {}  {} by {} ({})",
            record.book_id,
            record.title,
            record.author,
            record.viewed_at.format("%Y-%m-%d %H:%M")
        );
    }
}
