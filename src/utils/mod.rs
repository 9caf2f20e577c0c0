//! This module aggregates various utility submodules used throughout the application.

/// Utilities for loading the local document corpus into the cached context.
pub(crate) mod documents;
/// Utilities for appending question/response pairs to the interaction log.
pub(crate) mod interaction_log;
/// Utilities for interacting with an Ollama-style generate endpoint.
pub(crate) mod ollama_client;
