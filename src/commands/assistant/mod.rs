//! Commands for the document-grounded assistant.

/// Submodule defining the `/ask` command.
pub(crate) mod ask;
/// Submodule defining the `/start` command.
pub(crate) mod start;
