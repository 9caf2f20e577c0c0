use crate::{CommandResult, Context};

/// Greeting shown when a user first talks to the assistant.
pub(crate) const GREETING: &str = "Hello! I am the company's virtual assistant. \
    You can ask me any question about our organization and I will help you \
    based on the available information. How can I help you?";

/// Introduce the assistant
#[poise::command(slash_command, category = "Assistant")]
pub async fn start(ctx: Context<'_>) -> CommandResult {
    ctx.say(GREETING).await?;

    Ok(())
}
