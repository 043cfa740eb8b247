use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use taskforge::Config;
use taskforge::gateway::{self, AppState};
use taskforge::llm::ModelPipeline;

#[derive(Parser)]
#[command(name = "taskforge")]
#[command(version)]
#[command(about = "Task service with a resilient model-invocation pipeline.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway.
    Serve {
        /// Bind address, defaults to 0.0.0.0.
        #[arg(long)]
        host: Option<String>,
        /// Bind port, defaults to 8000.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one pipeline invocation and print the reply.
    Ask {
        /// Prompt text.
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respects RUST_LOG, defaults to info.
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match cli.command {
        Commands::Serve { host, port } => {
            let config = Config::load();
            let host = host.unwrap_or_else(|| config.host.clone());
            let port = port.unwrap_or(config.port);
            let state = AppState::new(config);
            gateway::serve(state, &host, port).await
        }
        Commands::Ask { prompt } => {
            let outcome = ModelPipeline::new().invoke(&prompt).await;
            if outcome.degraded {
                tracing::warn!("upstream unavailable, degraded reply");
            }
            println!("{}", outcome.text);
            Ok(())
        }
    }
}
