use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use listflow::demo::{items_for_page, page_key, seed_feed, FeedItem, FeedLoader};
use listflow::loading::section::{cell_count, last_cell};
use listflow::loading::{
    command_channel, spawn_list_loader, IndexPath, ListController, ListSnapshot, LoaderHandle,
    LoadingIntent, LoadingObserver, LoadingState, RenderSurface, Section,
};
use listflow::pipeline::{CacheNetworkPipeline, MemoryStore, Source};
use listflow::{telemetry, EngineConfig};

const FEED: &str = "news";

#[derive(Parser)]
#[command(name = "listflow", version, about = "Paginated list loading engine")]
struct Cli {
    /// Log to stderr at debug level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drive a scripted feed through appear, paging and pull-to-refresh
    Demo {
        /// Number of pages the network knows about
        #[arg(long, default_value_t = 3)]
        pages: u32,
        /// Items per page
        #[arg(long, default_value_t = 4)]
        page_size: usize,
        /// Config file (defaults to the user config path)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration
    ShowConfig {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load_from(&path)?,
        None => EngineConfig::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        telemetry::init_stderr_tracing();
    } else {
        telemetry::init_tracing();
    }

    match cli.command {
        Command::Demo {
            pages,
            page_size,
            config,
        } => run_demo(load_config(config)?, pages, page_size).await,
        Command::ShowConfig { config } => {
            let source = config
                .clone()
                .unwrap_or_else(EngineConfig::config_path);
            let config = load_config(config)?;
            println!("# {}", source.display());
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn run_demo(config: EngineConfig, pages: u32, page_size: usize) -> anyhow::Result<()> {
    anyhow::ensure!(page_size > 0, "--page-size must be positive");

    let loader = Arc::new(FeedLoader::new(FEED));
    let cache = Arc::new(MemoryStore::cache());
    let network = Arc::new(MemoryStore::network().with_delay(Duration::from_millis(20)));

    // Cache knows a stale first page, the network knows every page.
    seed_feed(&cache, FEED, 1, page_size, "cached");
    seed_feed(&network, FEED, pages, page_size, "fresh");

    let pipeline = CacheNetworkPipeline::new(&loader, cache.clone(), network.clone());
    let (sender, commands) = command_channel::<FeedItem>();
    let controller = ListController::new(
        Arc::new(pipeline),
        Box::new(ConsoleSurface::default()),
        sender.clone(),
    )
    .with_observer(Box::new(ConsoleObserver))
    .with_config(&config);
    let (handle, task) = spawn_list_loader(controller, sender, commands);

    println!("== appear");
    handle.appear()?;
    let mut snapshot = settle(&handle).await?;
    print_snapshot(&snapshot);

    loop {
        let Some(last) = last_cell(&snapshot.sections) else {
            break;
        };
        let before = cell_count(&snapshot.sections);
        println!("== scrolled to {:?}", last);
        handle.item_displayed(last)?;
        snapshot = settle(&handle).await?;
        print_snapshot(&snapshot);
        if cell_count(&snapshot.sections) == before {
            println!("== no more pages");
            break;
        }
    }

    // Both caches now hold the fresh first page, so the refresh emits once.
    let first_page_key = page_key(&format!("{FEED}-id"), 1, page_size);
    let first_page = serde_json::json!(items_for_page(1, page_size, page_size, "fresh"));
    cache.insert(first_page_key.clone(), first_page.clone());
    network.insert_with_source(first_page_key, first_page, Source::NetworkCache);
    println!("== pull to refresh");
    handle.load(LoadingIntent::PullToRefresh)?;
    snapshot = settle(&handle).await?;
    print_snapshot(&snapshot);

    handle.shutdown()?;
    task.await?;
    println!(
        "== done: {} cache fetches, {} network fetches",
        cache.fetch_count(),
        network.fetch_count()
    );
    Ok(())
}

/// Wait until the list is no longer loading.
async fn settle(handle: &LoaderHandle<FeedItem>) -> anyhow::Result<ListSnapshot<FeedItem>> {
    loop {
        let snapshot = handle.snapshot().await?;
        if !snapshot.state.is_loading() {
            return Ok(snapshot);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

fn print_snapshot(snapshot: &ListSnapshot<FeedItem>) {
    println!(
        "   state={} sections={} cells={}",
        state_label(&snapshot.state),
        snapshot.sections.len(),
        cell_count(&snapshot.sections)
    );
    for section in &snapshot.sections {
        let titles: Vec<&str> = section.cells.iter().map(|c| c.title.as_str()).collect();
        println!("   page {}: {}", section.page, titles.join(", "));
    }
}

fn state_label(state: &LoadingState) -> String {
    match state {
        LoadingState::NotInitiated => "notInitiated".to_string(),
        LoadingState::Initiated => "initiated".to_string(),
        LoadingState::Loading(intent) => format!("loading({:?})", intent),
        LoadingState::HasData => "hasData".to_string(),
        LoadingState::Empty => "empty".to_string(),
        LoadingState::Error(err) => format!("error({})", err),
    }
}

/// Surface that prints reloads. Nothing is ever "on screen", so paging
/// only happens through explicit scroll events.
#[derive(Default)]
struct ConsoleSurface {
    sections: usize,
    cells: usize,
}

impl RenderSurface<FeedItem> for ConsoleSurface {
    fn reload_visible(&mut self) {
        println!("   [surface] reload: {} sections, {} cells", self.sections, self.cells);
    }

    fn register_renderers(&mut self, sections: &[Section<FeedItem>]) {
        self.sections = sections.len();
        self.cells = cell_count(sections);
    }

    fn visible_items(&self) -> Vec<IndexPath> {
        Vec::new()
    }
}

struct ConsoleObserver;

impl LoadingObserver for ConsoleObserver {
    fn on_progress_start(&mut self, intent: &LoadingIntent) {
        println!("   [progress] start {:?}", intent);
    }

    fn on_progress_stop(&mut self, intent: &LoadingIntent) {
        println!("   [progress] stop {:?}", intent);
    }

    fn on_empty_state_changed(&mut self, state: &LoadingState) {
        println!("   [empty-state] {}", state_label(state));
    }

    fn on_last_cell_displayed(&mut self) {
        println!("   [surface] last cell displayed");
    }
}
