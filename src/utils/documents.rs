//! Loads the local document corpus into a single context string.
//!
//! The corpus is read once at startup and cached for the lifetime of the
//! process; every answer is grounded in the same blob.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use tracing::{debug, info, warn};

use crate::config;

/// Context used when the documents directory is missing or holds nothing
/// readable.
pub const NO_DOCUMENTS_PLACEHOLDER: &str = "No documents are available yet.";

/// Separator inserted between two concatenated documents.
const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

/// File extensions included in the context blob. Files must be valid UTF-8;
/// a `.pdf` that is not plain text is skipped with a warning.
const SUPPORTED_EXTENSIONS: [&str; 3] = ["txt", "md", "pdf"];

/// Process-wide document cache, loaded from [`config::documents_dir`] on
/// first access. `main` forces it so problems surface at startup.
pub static DOCUMENT_STORE: LazyLock<Arc<DocumentStore>> = LazyLock::new(|| {
    debug!("Initializing DocumentStore");
    Arc::new(DocumentStore::load(&config::documents_dir()))
});

/// The concatenated document corpus.
pub struct DocumentStore {
    context: String,
}

impl DocumentStore {
    /// Reads every supported file under `dir` into a single context string.
    /// A missing directory is created so documents can be dropped in before
    /// the next restart.
    pub fn load(dir: &Path) -> Self {
        Self {
            context: load_documents(dir),
        }
    }

    /// The cached context blob.
    pub fn context(&self) -> &str {
        &self.context
    }
}

fn load_documents(dir: &Path) -> String {
    if !dir.exists() {
        match fs::create_dir_all(dir) {
            Ok(()) => info!("Created documents directory {}", dir.display()),
            Err(e) => warn!(
                "Could not create documents directory {}: {}",
                dir.display(),
                e
            ),
        }
        return NO_DOCUMENTS_PLACEHOLDER.to_string();
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Could not read documents directory {}: {}", dir.display(), e);
            return NO_DOCUMENTS_PLACEHOLDER.to_string();
        }
    };

    // Lexicographic order keeps the blob stable across restarts.
    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported(path))
        .collect();
    paths.sort();

    let mut documents = Vec::new();
    for path in &paths {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!("Loaded document {}", path.display());
                documents.push(contents);
            }
            Err(e) => warn!("Error reading {}: {}", path.display(), e),
        }
    }

    if documents.is_empty() {
        info!("The documents directory {} is empty", dir.display());
        return NO_DOCUMENTS_PLACEHOLDER.to_string();
    }

    info!("Loaded {} document(s) from {}", documents.len(), dir.display());
    documents.join(DOCUMENT_SEPARATOR)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
