use std::env;
use std::sync::LazyLock;

use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;
mod config;
mod events;
mod utils;

use commands::{assistant::ask::*, assistant::start::*, general::ping::*};
use utils::documents::DOCUMENT_STORE;
use utils::ollama_client::OLLAMA_CLIENT;

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;
type CommandResult = Result<(), Error>;

// Define the user data type we'll be using in our bot
struct Data {} // User data, which is stored and accessible in all command invocations

#[poise::command(slash_command, category = "General")]
async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> CommandResult {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            show_context_menu_commands: true,
            ..Default::default()
        },
    )
    .await
    .map_err(|e| e.into())
}

#[poise::command(prefix_command, hide_in_help)]
async fn register(ctx: Context<'_>) -> Result<(), Error> {
    poise::builtins::register_application_commands_buttons(ctx)
        .await
        .map_err(|e| e.into())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("docent=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    // Warm the caches so configuration problems surface before connecting.
    let store = LazyLock::force(&DOCUMENT_STORE);
    info!("Document context loaded ({} bytes)", store.context().len());
    LazyLock::force(&OLLAMA_CLIENT);

    let token = env::var("DISCORD_TOKEN").expect("Missing DISCORD_TOKEN");

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let commands = vec![
        // Default commands
        register(),
        help(),
        // General commands
        ping(),
        // Assistant commands
        start(),
        ask(),
    ];

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands,
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(Data {})
            })
        });

    info!("Virtual assistant starting...");

    let mut client = ClientBuilder::new(token, intents)
        .framework(framework.build())
        .event_handler(events::Handler)
        .await?;

    client.start().await.map_err(Into::into)
}
