mod chat;

use chat::ChatSession;
use clap::{Parser, Subcommand};
use console::style;
use krishi_core::{config, traits::Provider};
use krishi_domain::{Crop, Registry, Responder, Topic};
use krishi_providers::groq::GroqProvider;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "krishi",
    version,
    about = "Krishi Sahayak — domain-scoped agricultural assistant"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session.
    Chat,
    /// Send a one-shot question and print the reply.
    Ask {
        /// The question to ask.
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Show configuration, registry, and provider status.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Chat => {
            let cfg = config::load(&cli.config)?;
            let registry = build_registry(&cfg)?;
            let provider = build_provider(&cfg).await?;
            let mut session = ChatSession::new(Responder::new(Arc::new(registry)), provider);

            println!(
                "{} Type your question, {} to save the transcript, {} to leave.",
                style(&cfg.assistant.name).green().bold(),
                style("/save").cyan(),
                style("exit").cyan()
            );

            let stdin = std::io::stdin();
            loop {
                print!("{} ", style("you>").blue().bold());
                std::io::stdout().flush()?;

                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }
                let input = line.trim();
                match input {
                    "exit" | "quit" => break,
                    "/save" => {
                        let path = export_transcript(&cfg.assistant.name, &session)?;
                        println!("transcript saved to {path}");
                        continue;
                    }
                    _ => {}
                }

                let reply = session.handle_turn(input).await;
                println!("{} {}\n", style("krishi>").green().bold(), reply);
            }
        }
        Commands::Ask { message } => {
            if message.is_empty() {
                anyhow::bail!("no message provided. Usage: krishi ask <message>");
            }
            let prompt = message.join(" ");
            let cfg = config::load(&cli.config)?;
            let registry = build_registry(&cfg)?;
            let provider = build_provider(&cfg).await?;
            let mut session = ChatSession::new(Responder::new(Arc::new(registry)), provider);
            let reply = session.handle_turn(&prompt).await;
            println!("{reply}");
        }
        Commands::Status => {
            let cfg = config::load(&cli.config)?;
            let registry = build_registry(&cfg)?;

            println!("Krishi Sahayak — Status\n");
            println!("Config: {}", cli.config);
            println!(
                "Crops: {}",
                Crop::ALL.map(|c| c.name()).join(", ")
            );
            println!(
                "Topics: {}",
                Topic::ALL.map(|t| t.name()).join(", ")
            );
            println!("Registered advisories: {}", registry.fact_count());
            println!();

            match cfg.provider.default.as_str() {
                "builtin" => println!("Provider: builtin rules only"),
                "groq" => {
                    let groq = cfg.provider.groq.clone().unwrap_or_default();
                    let provider = GroqProvider::from_config(&groq)?;
                    println!(
                        "Provider: groq ({}) — {}",
                        groq.model,
                        if provider.is_available().await {
                            "available"
                        } else {
                            "not available"
                        }
                    );
                }
                other => println!("Provider: {other} (unsupported)"),
            }
        }
    }

    Ok(())
}

/// Build the domain registry, applying the configured override file if any.
fn build_registry(cfg: &config::Config) -> anyhow::Result<Registry> {
    match &cfg.registry.path {
        Some(path) => Ok(Registry::load(path)?),
        None => Ok(Registry::builtin()),
    }
}

/// Build the configured provider, or `None` for rules-only operation.
async fn build_provider(cfg: &config::Config) -> anyhow::Result<Option<Arc<dyn Provider>>> {
    match cfg.provider.default.as_str() {
        "builtin" => Ok(None),
        "groq" => {
            let groq = cfg.provider.groq.clone().unwrap_or_default();
            let provider = GroqProvider::from_config(&groq)?;
            if !provider.is_available().await {
                warn!("groq provider is not available, continuing rules-only");
                return Ok(None);
            }
            Ok(Some(Arc::new(provider)))
        }
        other => anyhow::bail!("unsupported provider: {other} (expected \"builtin\" or \"groq\")"),
    }
}

/// Write the session transcript as JSON next to the working directory.
fn export_transcript(assistant: &str, session: &ChatSession) -> anyhow::Result<String> {
    let path = format!(
        "chat_export_{}.json",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    let export = serde_json::json!({
        "assistant": assistant,
        "exported_at": chrono::Utc::now().to_rfc3339(),
        "conversation": session.context(),
    });
    std::fs::write(&path, serde_json::to_string_pretty(&export)?)?;
    Ok(path)
}
