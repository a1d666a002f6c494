//! Shree application binary - composition root.
//!
//! `shree serve` runs the stateless chat relay in front of the generation
//! API. `shree chat` runs the conversation controller in the terminal against
//! a running relay.

mod cli;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use shree_chat::{ConversationController, ConversationState, HttpRelayClient, Message};
use shree_core::{Language, Role, ShreeConfig};
use shree_relay::{start_server, AppState, GeminiBackend, Relay};

use cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let mut config = ShreeConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!(path = %config_file.display(), "Starting Shree v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Serve { port, host } => {
            config.server.port = cli::resolve_port(port, config.server.port);
            if let Some(host) = host {
                config.server.host = host;
            }
            serve(config).await
        }
        Command::Chat {
            relay_url,
            language,
        } => {
            let relay_url = relay_url.unwrap_or_else(|| config.chat.relay_url.clone());
            chat(config, &relay_url, language).await
        }
    }
}

async fn serve(config: ShreeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let backend = GeminiBackend::new(&config.upstream)?;
    let api_key = config.upstream.api_key_from_env();
    if api_key.is_none() {
        tracing::warn!(
            env = %config.upstream.api_key_env,
            "Upstream API key not set; chat requests will fail until it is"
        );
    }

    tracing::info!(model = %config.upstream.model, "Upstream generation backend configured");

    let relay = Relay::new(Arc::new(backend), api_key);
    start_server(AppState::new(config, relay)).await?;
    Ok(())
}

async fn chat(
    config: ShreeConfig,
    relay_url: &str,
    language: Option<Language>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = HttpRelayClient::new(relay_url)?;
    tracing::info!(endpoint = %client.endpoint(), "Chat client ready");

    let mut controller = ConversationController::new(client, config.handoff.clone());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Shree Real Estate - chat with Anjali");
    println!("Commands: /restart, /language <name>, /quit");

    if let Some(language) = language {
        let greeting = controller.select_language(language).await;
        print_message(greeting);
    } else {
        print_language_menu();
    }

    loop {
        prompt(controller.state()).await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input == "/quit" {
            break;
        }
        if input == "/restart" {
            controller.restart();
            print_language_menu();
            continue;
        }
        let (command, rest) = input.split_once(' ').unwrap_or((input, ""));
        if command == "/language" {
            match rest.parse::<Language>() {
                Ok(language) => {
                    let greeting = controller.select_language(language).await;
                    print_message(greeting);
                }
                Err(e) => println!("{}", e),
            }
            continue;
        }

        match controller.state() {
            ConversationState::Unselected => match pick_language(input) {
                Some(language) => {
                    let greeting = controller.select_language(language).await;
                    print_message(greeting);
                }
                None => print_language_menu(),
            },
            ConversationState::Active => match controller.submit(&line).await {
                Ok(reply) => {
                    print_message(reply);
                    if let Some(link) = controller.handoff() {
                        println!();
                        println!("Continue on WhatsApp with our senior team:");
                        println!("  {}", link.url());
                    }
                }
                Err(e) => println!("{}", e),
            },
            ConversationState::Completed => {
                println!("This chat is complete. Type /restart to start over.");
            }
        }
    }

    Ok(())
}

/// Menu entry by number, or a language name.
fn pick_language(input: &str) -> Option<Language> {
    if input.is_empty() {
        return None;
    }
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| Language::ALL.get(i).copied());
    }
    input.parse().ok()
}

fn print_language_menu() {
    println!();
    println!("Please choose a language:");
    for (i, language) in Language::ALL.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, language.display_name(), language.native_name());
    }
}

fn print_message(message: &Message) {
    let speaker = match message.turn.role {
        Role::User => "You",
        Role::Model => "Anjali",
    };
    println!(
        "[{}] {}: {}",
        message.sent_at.format("%H:%M"),
        speaker,
        message.turn.text
    );
}

async fn prompt(state: ConversationState) -> std::io::Result<()> {
    let marker = match state {
        ConversationState::Unselected => "language> ",
        ConversationState::Active => "> ",
        ConversationState::Completed => "(done)> ",
    };
    let mut stdout = tokio::io::stdout();
    stdout.write_all(marker.as_bytes()).await?;
    stdout.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_language_by_number() {
        assert_eq!(pick_language("1"), Some(Language::English));
        assert_eq!(pick_language("2"), Some(Language::Gujarati));
        assert_eq!(pick_language("3"), Some(Language::Hindi));
        assert_eq!(pick_language("0"), None);
        assert_eq!(pick_language("4"), None);
    }

    #[test]
    fn test_pick_language_by_name() {
        assert_eq!(pick_language("hindi"), Some(Language::Hindi));
        assert_eq!(pick_language("ગુજરાતી"), Some(Language::Gujarati));
        assert_eq!(pick_language("french"), None);
    }

    #[test]
    fn test_pick_language_empty_line_shows_menu() {
        assert_eq!(pick_language(""), None);
    }
}
