//! Nebula CLI - run the theatre service and inspect canonical bytes and ETags.

use clap::{Parser, Subcommand};

mod commands;
mod input;

use commands::{canonicalize, etag, serve};

#[derive(Parser)]
#[command(name = "nebula")]
#[command(about = "Nebula theatre service and ETag tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service with an in-memory store
    Serve {
        /// Interface to bind
        #[arg(long, env = "NEBULA_HOST", default_value = nebula_theatre::config::DEFAULT_HOST)]
        host: String,
        /// Port to bind
        #[arg(long, env = "FASTAPIPORT", default_value_t = nebula_theatre::config::DEFAULT_PORT)]
        port: u16,
    },
    /// Show canonical bytes for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Compute the strong ETag of a resource document
    Etag {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Exit with error code unless the ETag equals this value
        #[arg(long)]
        expect: Option<String>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nebula=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { host, port } => {
            init_tracing();
            serve::run(host, port)
        }
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Etag { input, expect } => etag::run(input, expect),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
