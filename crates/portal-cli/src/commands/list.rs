//! List command implementation.

use std::ops::Range;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use portal::{
    ApiClient, Character, EndpointKind, Episode, Location, PageEvent, Paginator, Request, Resource,
};

use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Endpoint to list (character, location, episode)
    pub kind: EndpointKind,

    /// Number of pages to load
    #[arg(long, default_value_t = 1, conflicts_with = "all")]
    pub pages: u32,

    /// Keep loading until the last page
    #[arg(long)]
    pub all: bool,

    /// Filter as name=value (e.g. --filter status=alive), repeatable
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, client: ApiClient) -> Result<()> {
    match args.kind {
        EndpointKind::Character => list::<Character>(&args, client).await,
        EndpointKind::Location => list::<Location>(&args, client).await,
        EndpointKind::Episode => list::<Episode>(&args, client).await,
    }
}

async fn list<R>(args: &ListArgs, client: ApiClient) -> Result<()>
where
    R: Resource + Serialize,
{
    if args.pages == 0 {
        bail!("--pages must be at least 1");
    }

    let request = args
        .filters
        .iter()
        .fold(Request::list(R::ENDPOINT), |request, (name, value)| {
            request.query(name, value)
        });
    let paginator = Paginator::<R>::new(client, request);

    let event = paginator
        .load_first()
        .await
        .context("Failed to load first page")?;
    if let Some(PageEvent::Loaded { count }) = event {
        print_rows(&paginator, 0..count, args.pretty)?;
    }

    let mut loaded = 1;
    while paginator.should_show_more() && (args.all || loaded < args.pages) {
        let event = paginator
            .load_more()
            .await
            .context("Failed to load next page")?;
        if let Some(PageEvent::Appended { range }) = event {
            print_rows(&paginator, range, args.pretty)?;
        }
        loaded += 1;
    }

    if paginator.is_empty() {
        eprintln!("{}", "No results found.".dimmed());
        return Ok(());
    }

    if let Some(info) = paginator.info() {
        eprintln!();
        eprintln!(
            "{}: {} of {} ({} pages)",
            "Loaded".dimmed(),
            paginator.len(),
            info.count,
            info.pages
        );
        if let Some(next) = &info.next {
            eprintln!("{}: {}", "Next page".dimmed(), next);
        }
    }

    Ok(())
}

fn print_rows<R>(paginator: &Paginator<R>, range: Range<usize>, pretty: bool) -> Result<()>
where
    R: Resource + Serialize,
{
    paginator.with_items(|items| {
        for item in &items[range] {
            output::json(item, pretty)?;
        }
        Ok(())
    })
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{s}'")),
    }
}
