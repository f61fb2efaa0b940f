use std::sync::Arc;

use clap::{Parser, Subcommand};

use citygym_chat::application::errors::ChatError;
use citygym_chat::infrastructure::adapters::console::{ConsoleAdapter, ConsoleView};
use citygym_chat::infrastructure::config::Config;
use citygym_chat::{ChatSession, HttpAssistant};

#[derive(Parser)]
#[command(name = "citygym-chat")]
#[command(about = "Chat with the CityGym AI fitness assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Backend base URL (overrides config)
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat (default)
    Run,
    /// Show version
    Version,
    /// Print a default config
    InitConfig,
}

fn main() {
    // Initialize logging on stderr so it stays out of the transcript
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_chat(&cli.config, cli.endpoint),
        Commands::Version => {
            println!("citygym-chat v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str, endpoint_override: Option<String>) -> Result<Config, ChatError> {
    let mut config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        tracing::debug!("{} not found, using defaults", config_path);
        Config::load_env()
    };

    if let Some(endpoint) = endpoint_override {
        config.assistant.endpoint = endpoint;
    }
    config.validate()?;
    Ok(config)
}

fn run_chat(config_path: &str, endpoint_override: Option<String>) -> Result<(), ChatError> {
    let config = load_config(config_path, endpoint_override)?;

    let assistant = HttpAssistant::new(&config.assistant)?;
    tracing::info!("Using chat backend {}", assistant.url());

    let session = ChatSession::new(Arc::new(assistant));
    session.subscribe(Arc::new(ConsoleView::new(config.console.name.clone())));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let console = ConsoleAdapter::new(config.console.clone());
        console.run(session).await
    })
}

fn init_config() -> Result<(), ChatError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
