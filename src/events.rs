//! Serenity event handler treating free-form messages as questions.
//!
//! Anything that is not a command and not from a bot goes through the same
//! sequence as `/ask`: typing indicator, inference against the cached
//! document context, optional interaction log append, chunked reply.

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::prelude::*;
use tracing::{debug, error, warn};

use crate::commands::message_chunks;
use crate::config;
use crate::utils::documents::DOCUMENT_STORE;
use crate::utils::interaction_log;
use crate::utils::ollama_client::OLLAMA_CLIENT;

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let question = msg.content.trim();
        if question.is_empty() || is_command(question) {
            debug!("Ignoring command or empty message from {}", msg.author.name);
            return;
        }

        if let Err(e) = answer(&ctx, &msg, question).await {
            error!("Error answering message from {}: {}", msg.author.name, e);
        }
    }
}

/// Messages carrying a command prefix are left to the command framework.
fn is_command(content: &str) -> bool {
    content.starts_with('/') || content.starts_with('!')
}

async fn answer(ctx: &Context, msg: &Message, question: &str) -> Result<(), SerenityError> {
    msg.channel_id.broadcast_typing(&ctx.http).await?;

    let response = OLLAMA_CLIENT
        .respond(question, DOCUMENT_STORE.context())
        .await;

    if let Some(path) = config::interaction_log_path() {
        if let Err(e) = interaction_log::save_interaction(&path, question, &response) {
            warn!("Could not record interaction: {}", e);
        }
    }

    for chunk in message_chunks(&response) {
        msg.channel_id.say(&ctx.http, chunk).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/start", true; "slash command")]
    #[test_case("!register", true; "prefix command")]
    #[test_case("Where is the office?", false; "plain question")]
    #[test_case("What does /etc hold?", false; "slash mid message")]
    fn command_detection(content: &str, expected: bool) {
        assert_eq!(is_command(content), expected);
    }
}
