// src/main.rs
use clap::Parser;

use section_harvest::config::{
    builtin_source, builtin_sources, ExtractionPolicy, SelectorConfig, SourceDefinition,
};
use section_harvest::extractors::{extract_page, Strategy};
use section_harvest::fetch;
use section_harvest::models::PageExtraction;
use section_harvest::storage::StorageManager;
use section_harvest::utils::{self, AppError};
use section_harvest::Page;

/// Command Line Interface for labeled content extraction
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of a builtin source definition (e.g. dutch_passion, humboldt_seed)
    #[arg(short, long, conflicts_with = "config", required_unless_present_any = ["config", "list_sources"])]
    source: Option<String>,

    /// Path to a JSON source definition
    #[arg(short, long)]
    config: Option<String>,

    /// Page URL or local HTML file to extract (repeatable; defaults to the source's start URLs)
    #[arg(short, long)]
    url: Vec<String>,

    /// Base URL for resolving relative image references of local files (fetched pages keep their final URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Output directory for extracted content
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Debug mode - save the raw page HTML next to the output
    #[arg(short, long)]
    debug: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    /// Print the builtin source names and exit
    #[arg(long)]
    list_sources: bool,
}

fn load_definition(args: &Args) -> Result<SourceDefinition, AppError> {
    match (&args.source, &args.config) {
        (_, Some(path)) => Ok(SourceDefinition::from_json_file(path)?),
        (Some(name), None) => Ok(builtin_source(name)?.clone()),
        (None, None) => Err(AppError::Processing(
            "either --source or --config is required".to_string(),
        )),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::debug!("Starting with args: {:?}", args);

    if args.list_sources {
        for source in builtin_sources() {
            println!("{}\t{:?}\t{}", source.name, source.strategy, source.start_urls.join(" "));
        }
        return Ok(());
    }

    // 2. Resolve and compile the source definition once
    let definition = load_definition(&args)?;
    let config = SelectorConfig::compile(&definition)?;
    let policy = ExtractionPolicy::from(&definition);
    let strategy = Strategy::new(definition.strategy, &config, policy);
    tracing::info!(
        "Using source '{}' ({:?}, {:?} inclusion)",
        definition.name,
        definition.strategy,
        policy.inclusion
    );

    let targets = if args.url.is_empty() {
        definition.start_urls.clone()
    } else {
        args.url.clone()
    };
    if targets.is_empty() {
        return Err(AppError::Processing(format!(
            "source '{}' has no start URLs; pass --url",
            definition.name
        )));
    }

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Process each page
    let mut success_count = 0;
    let mut failure_count = 0;

    for target in &targets {
        tracing::info!("Processing page: {}", target);

        let loaded = match fetch::load_page(
            target,
            args.base_url.as_deref(),
            definition.user_agent(),
        )
        .await
        {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!("Failed to load {}: {}", target, e);
                failure_count += 1;
                continue;
            }
        };

        if args.debug {
            if let Err(e) = storage.save_raw_page(&definition.name, &loaded.url, &loaded.html) {
                tracing::warn!("Failed to save raw page: {}", e);
            }
        }

        let page = match Page::parse(&loaded.html, &loaded.url) {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Cannot extract {}: {}", target, e);
                failure_count += 1;
                continue;
            }
        };

        let record = extract_page(&page, &config, &strategy);
        tracing::info!(
            "Extracted {} label(s) and {} image(s) from {}",
            record.label_count(),
            record.image_count(),
            loaded.url
        );

        let extraction = PageExtraction {
            source: definition.name.clone(),
            url: loaded.url,
            extracted_at: chrono::Utc::now().to_rfc3339(),
            record,
        };

        match storage.save_extraction(&extraction) {
            Ok(path) => tracing::info!("Saved extraction to: {}", path.display()),
            Err(e) => {
                tracing::error!("Failed to save extraction: {}", e);
                failure_count += 1;
                continue;
            }
        }
        if let Err(e) = storage.save_extraction_metadata(&extraction) {
            tracing::error!("Failed to save extraction metadata: {}", e);
        }
        success_count += 1;
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to extract any of {} page(s)",
            failure_count
        )));
    }

    Ok(())
}
