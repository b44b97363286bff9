// ⚠️ Catalog Errors
// Every failure in the catalog is recovered where it happens and shown as a message.

use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for the catalog workflow
///
/// None of these abort the session. Load errors leave an empty or partial
/// catalog, save errors leave memory ahead of disk, and the rest are
/// rendered to the user as plain messages.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Error: The file '{}' was not found.", path.display())]
    FileNotFound { path: PathBuf },

    #[error("An error occurred while loading products from '{}': {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Error saving products to file '{}': {reason}", path.display())]
    Save { path: PathBuf, reason: String },

    #[error("Product with ID {id} not found.")]
    NotFound { id: String },

    #[error("Permission denied: Client cannot {action} products.")]
    PermissionDenied { action: &'static str },
}

impl CatalogError {
    /// True for the two conditions that only affect the backing file
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            CatalogError::FileNotFound { .. }
                | CatalogError::Load { .. }
                | CatalogError::Save { .. }
        )
    }
}
