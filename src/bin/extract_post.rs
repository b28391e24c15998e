//! Fetch post URLs and print one JSON record per line.
//!
//! Usage:
//!   extract_post <url>...            fetch and extract each URL
//!   extract_post --stdin <url>       extract page HTML read from stdin
//!
//! Options come from `CL_*` environment variables; logs go to stderr and
//! honour `RUST_LOG` and `LOG_FORMAT=json`.

use std::io::{self, Read};
use std::process::ExitCode;

use post_extractor::{extract_html_with_options, Extractor, Options, PostRecord};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,post_extractor=debug"));

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Failed to initialize tracing: {e}");
    }
}

fn print_record(record: &PostRecord) -> bool {
    match serde_json::to_string(record) {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(e) => {
            eprintln!("Failed to serialize record for {}: {e}", record.source_url);
            false
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let options = match Options::from_env() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: extract_post <url>... | extract_post --stdin <url>");
        return ExitCode::FAILURE;
    }

    if args[0] == "--stdin" {
        let Some(url) = args.get(1) else {
            eprintln!("--stdin requires the post URL the page came from");
            return ExitCode::FAILURE;
        };

        let mut page = String::new();
        if io::stdin().read_to_string(&mut page).is_err() {
            eprintln!("Failed to read from stdin");
            return ExitCode::FAILURE;
        }

        let record = extract_html_with_options(&page, url, &options);
        return if print_record(&record) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let extractor = match Extractor::new(options) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("Failed to create extractor: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut ok = true;
    for url in &args {
        let record = extractor.extract(url).await;
        ok &= print_record(&record) && !record.is_degraded();
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
