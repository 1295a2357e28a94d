use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing_subscriber::EnvFilter;

use nutriplan::api::NutriApi;
use nutriplan::commands::{CommandHandler, Flow};
use nutriplan::config::AppConfig;
use nutriplan::storage::{FileStore, FoodLogStore};

#[derive(Parser, Debug)]
#[command(author, version, about = "Recipe browser and daily nutrition log", long_about = None)]
struct Args {
    /// Override the primary API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Run one command and exit instead of starting the REPL
    #[arg(short, long)]
    command: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let store = FoodLogStore::new(Arc::new(FileStore::new(&config.data_dir)?));
    let api = NutriApi::from_config(&config);

    if !api.products_available() {
        println!(
            "{}",
            "No USDA_API_KEY configured - product search and barcode lookup are disabled.".dimmed()
        );
    }

    let handler = CommandHandler::new(api, store, config.limits);

    if let Some(command) = args.command {
        handler.handle_command(&command).await;
        return Ok(());
    }

    println!("🥦 NutriPlan - type 'help' for commands");
    let mut rl = Editor::<(), DefaultHistory>::new()?;

    loop {
        match rl.readline("🍴 ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);
                if handler.handle_command(input).await == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("👋 Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("readline error: {err:?}");
                break;
            }
        }
    }
    Ok(())
}
