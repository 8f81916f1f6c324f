mod console;
mod options;
mod posts;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use quicksearch_engine::{DropdownView, InteractionBus, SearchBar, SearchBarConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::{
    console::{Command, inside_press, outside_press, render_snapshot, widget_region},
    options::{load_options, resolve_options_path},
    posts::{DEFAULT_POSTS_ENDPOINT, Post, PostsClient, render_post},
};

/// Search posts from the terminal. Each stdin line is an input event: plain
/// text replaces the query, `:clear`, `:focus`, `:select <n>`, `:outside`,
/// `:inside` and `:quit` drive the widget.
#[derive(Debug, Parser)]
#[command(name = "quicksearch", version)]
struct Args {
    /// Posts endpoint queried with `?q=<query>`.
    #[arg(long, default_value = DEFAULT_POSTS_ENDPOINT)]
    endpoint: String,

    /// Quiet period after the last keystroke before a query is sent.
    #[arg(long, env = "QUICKSEARCH_DEBOUNCE_MS", default_value_t = 500)]
    debounce_ms: u64,

    /// Presentation options file (JSON).
    #[arg(long)]
    options: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let options_path = resolve_options_path(args.options.as_deref());
    let options = load_options(&options_path).with_context(|| format!("load options from {}", options_path.display()))?;
    let client = PostsClient::new(args.endpoint)?;
    info!(endpoint = %client.endpoint(), debounce_ms = args.debounce_ms, "starting quicksearch");

    let config = SearchBarConfig::builder(client, render_post)
        .debounce_delay(Duration::from_millis(args.debounce_ms))
        .on_select(|post: &Post| println!("Selected post: {}", post.title))
        .options(options)
        .build();

    let bus = InteractionBus::default();
    let mut bar = SearchBar::mount(config, &bus);
    bar.set_region(widget_region());
    println!("{}", bar.input_view().placeholder);

    let result = run(&mut bar, &bus).await;
    bar.unmount().await;
    result
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(bar: &mut SearchBar<Post>, bus: &InteractionBus) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut snapshots = bar.subscribe();

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let snapshot = snapshots.borrow_and_update().clone();
                let dropdown = DropdownView::project(&snapshot, bar.config());
                println!("{}", render_snapshot(&snapshot, dropdown.as_ref()));
            }
            line = lines.next_line() => {
                let Some(line) = line.context("read stdin")? else {
                    return Ok(());
                };
                match Command::parse(&line) {
                    Ok(Command::Quit) => return Ok(()),
                    Ok(command) => apply(bar, bus, command),
                    Err(error) => warn!(error = %error, "ignoring input line"),
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

fn apply(bar: &mut SearchBar<Post>, bus: &InteractionBus, command: Command) {
    match command {
        Command::Query(query) => bar.on_query_changed(query),
        Command::Clear => bar.clear(),
        Command::Focus => bar.focus(),
        Command::Select(index) => {
            if !bar.select(index) {
                warn!(index, "no result at that index");
            }
        }
        Command::Outside => {
            bus.emit(outside_press());
        }
        Command::Inside => {
            bus.emit(inside_press());
        }
        Command::Quit => {}
    }
}
