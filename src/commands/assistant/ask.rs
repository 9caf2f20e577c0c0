use tracing::warn;

use crate::commands::chunk_response;
use crate::config;
use crate::utils::documents::DOCUMENT_STORE;
use crate::utils::interaction_log;
use crate::utils::ollama_client::OLLAMA_CLIENT;
use crate::{CommandResult, Context};

/// Ask the assistant a question about the company
#[poise::command(slash_command, category = "Assistant")]
pub async fn ask(
    ctx: Context<'_>,
    #[description = "Your question"]
    #[rest]
    question: String,
) -> CommandResult {
    ctx.defer().await?;

    let response = OLLAMA_CLIENT
        .respond(&question, DOCUMENT_STORE.context())
        .await;

    if let Some(path) = config::interaction_log_path() {
        if let Err(e) = interaction_log::save_interaction(&path, &question, &response) {
            warn!("Could not record interaction: {}", e);
        }
    }

    let full_message = format!(
        "**{}**: {question}\n\n**Assistant**: {response}",
        ctx.author().name
    );

    chunk_response(ctx, full_message).await
}
