//! General purpose commands not tied to the assistant.

/// Submodule defining the `/ping` command.
pub(crate) mod ping;
