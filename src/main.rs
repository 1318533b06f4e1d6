use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use js_trends::api::{Article, Repository, DEFAULT_ARTICLES_ORDER};
use js_trends::filter::{FilterStore, SortBy, SortDirection};
use js_trends::view::{ArticlesQuery, ListController, ReposQuery, TrendingItem, ViewState};

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print trending JavaScript repositories
    Repos {
        /// Ranking field: stars, reactions or date
        #[arg(long, default_value = "stars")]
        sort: SortBy,

        /// Ranking direction: asc or desc
        #[arg(long, default_value = "desc")]
        order: SortDirection,

        /// Only show repositories whose name or URL contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Print trending JavaScript articles
    Articles {
        /// Only fetch articles with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Ordering passed to the backend (defaults to the config value)
        #[arg(long)]
        order: Option<String>,

        /// Only show articles whose title or URL contains this text
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "js-trends")]
#[command(about = "Trending JavaScript repositories and articles in your terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/js-trends/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Backend base URL, e.g. http://localhost:8080/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+). Already
    // installed is fine.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    let start_time = Instant::now();
    js_trends::logging::set_verbose(cli.verbose);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match js_trends::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let base_url = js_trends::config::resolve_api_base_url(cli.api_url.as_deref(), &config);
    js_trends::log_debug!("Using backend {}", base_url);

    let client = match js_trends::api::create_client(&base_url, config.request_timeout()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let filters = FilterStore::new();
    let backend_address = client.backend_address();

    let ok = match cli.command {
        None => {
            let app = js_trends::tui::App::new(filters, &backend_address, &config.articles_order);
            if let Err(e) = js_trends::tui::run_tui(app, client).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_NETWORK);
            }
            true
        }
        Some(Commands::Repos { sort, order, search }) => {
            filters.set_sort_by(sort);
            filters.set_sort_direction(order);
            filters.set_search(search.unwrap_or_default());

            let mut controller = ListController::<Repository>::new(backend_address);
            let query = ReposQuery::from_filters(&filters.snapshot());
            js_trends::fetch::load(&client, &mut controller, query).await;
            print_results(
                &controller,
                &filters.search(),
                js_trends::output::format_repo_table,
            )
        }
        Some(Commands::Articles { tag, order, search }) => {
            let tag = tag.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
            filters.set_selected_tags(tag.iter().cloned().collect());
            filters.set_search(search.unwrap_or_default());

            let order = order.unwrap_or(config.articles_order);
            let order = if order.trim().is_empty() {
                DEFAULT_ARTICLES_ORDER.to_string()
            } else {
                order
            };

            let mut controller = ListController::<Article>::new(backend_address);
            let query = ArticlesQuery { tag, order };
            js_trends::fetch::load(&client, &mut controller, query).await;
            print_results(
                &controller,
                &filters.search(),
                js_trends::output::format_article_table,
            )
        }
    };

    js_trends::log_debug!("Finished in {:?}", start_time.elapsed());

    if !ok {
        std::process::exit(EXIT_NETWORK);
    }
    std::process::exit(EXIT_SUCCESS);
}

/// Print the summary line and table for a finished controller. Returns false
/// when the request failed.
fn print_results<T: TrendingItem>(
    controller: &ListController<T>,
    search: &str,
    format_table: impl Fn(&[&T], bool) -> String,
) -> bool {
    match controller.state() {
        ViewState::Ready(_) => {
            let use_colors = js_trends::output::should_use_colors();
            let visible = controller.visible(search);
            println!("{}", controller.summary(search));
            println!();
            println!("{}", format_table(&visible, use_colors));
            true
        }
        ViewState::Error(msg) => {
            eprintln!("{}", msg);
            false
        }
        // load() always completes the ticket it issued
        ViewState::Loading => false,
    }
}
