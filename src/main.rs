use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};

use heritage_sites::config::Config;
use heritage_sites::constants::is_supported_locale;
use heritage_sites::error::SiteError;
use heritage_sites::jsonld;
use heritage_sites::listing::{build_query, RouteVariant, SiteFilter, StatusFilter};
use heritage_sites::logging;
use heritage_sites::map_feed::build_map_feed;
use heritage_sites::pdf::CommandPdfConverter;
use heritage_sites::storage::{InMemoryRepository, SiteRepository};
use heritage_sites::urls::Urls;
use heritage_sites::web::{self, AppState};

#[derive(Parser)]
#[command(name = "heritage_sites")]
#[command(about = "Cultural sites database: website and exports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the JSON-LD description of one site
    Jsonld {
        id: i64,
        /// Locale for localized fields
        #[arg(long)]
        lang: Option<String>,
    },
    /// Print the map feed for all sites that are not removed
    MapFeed {
        #[arg(long)]
        lang: Option<String>,
    },
}

/// `lang` when supported, else the configured default.
fn pick_locale(lang: Option<String>, config: &Config) -> String {
    match lang {
        Some(lang) if is_supported_locale(&lang) => lang,
        Some(lang) => {
            warn!("Unsupported locale '{}', using {}", lang, config.site.default_locale);
            config.site.default_locale.clone()
        }
        None => config.site.default_locale.clone(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load().context("Failed to load configuration")?;

    let repository = InMemoryRepository::load(&config.site.data_file)
        .await
        .with_context(|| format!("Failed to load dataset from {}", config.site.data_file))?;
    info!("Loaded {} sites", repository.site_count());
    let repository: Arc<dyn SiteRepository> = Arc::new(repository);

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }

            let mut state = AppState::new(repository, config.site.clone());
            match CommandPdfConverter::from_config(&config.pdf) {
                Some(converter) => state = state.with_pdf_converter(Arc::new(converter)),
                None => info!("No PDF converter configured; PDF export is disabled"),
            }

            web::serve(state, &config.server).await?;
        }
        Commands::Jsonld { id, lang } => {
            let locale = pick_locale(lang, &config);
            let site = repository
                .find_site(id, StatusFilter::NotRemoved)
                .await?
                .ok_or(SiteError::NotFound(id))?;
            let document = jsonld::serialize(&site, &locale, false);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Commands::MapFeed { lang } => {
            let locale = pick_locale(lang, &config);
            let query = build_query(
                &locale,
                &config.site.default_locale,
                RouteVariant::Map,
                SiteFilter::default(),
            );
            let sites = repository.find_sites(&query).await?;
            let urls = Urls::new(&locale, &config.site.default_locale);
            let feed = build_map_feed(&sites, &locale, &urls);
            println!("{}", serde_json::to_string_pretty(&feed)?);
        }
    }

    Ok(())
}
