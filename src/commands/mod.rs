//! This module aggregates all the command modules for the bot.

/// Commands for the document-grounded assistant (e.g. `/start`, `/ask`).
pub(crate) mod assistant;
/// General purpose commands (e.g. `/ping`).
pub(crate) mod general;

use crate::{CommandResult, Context};

/// The maximum character length allowed for a single Discord message.
pub(crate) const MAX_MESSAGE_LENGTH: usize = 2000;

/// Splits a response into chunks that respect Discord's message length
/// limit, never cutting inside a UTF-8 character.
pub(crate) fn message_chunks(response: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut iter = response.chars();
    let mut pos = 0;
    while pos < response.len() {
        let mut len = 0;
        for ch in iter.by_ref().take(MAX_MESSAGE_LENGTH) {
            len += ch.len_utf8();
        }
        chunks.push(&response[pos..pos + len]);
        pos += len;
    }
    chunks
}

/// Sends a potentially long response string by splitting it into chunks
/// that respect Discord's message length limit.
pub(crate) async fn chunk_response<S: AsRef<str>>(ctx: Context<'_>, response: S) -> CommandResult {
    for chunk in message_chunks(response.as_ref()) {
        ctx.say(chunk).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", 0)]
    #[case("short answer", 1)]
    #[case(&"a".repeat(MAX_MESSAGE_LENGTH), 1)]
    #[case(&"a".repeat(MAX_MESSAGE_LENGTH + 1), 2)]
    #[case(&"a".repeat(3 * MAX_MESSAGE_LENGTH), 3)]
    fn chunk_counts(#[case] response: &str, #[case] expected: usize) {
        assert_eq!(message_chunks(response).len(), expected);
    }

    #[test]
    fn chunks_rejoin_to_the_original() {
        let response = "é".repeat(MAX_MESSAGE_LENGTH + 7);

        let chunks = message_chunks(&response);

        assert_eq!(chunks.concat(), response);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_MESSAGE_LENGTH));
    }

    #[test]
    fn multibyte_characters_are_not_split() {
        // 2-byte chars around the chunk boundary.
        let response = "ß".repeat(MAX_MESSAGE_LENGTH + 1);

        let chunks = message_chunks(&response);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), MAX_MESSAGE_LENGTH);
        assert_eq!(chunks[1], "ß");
    }
}
