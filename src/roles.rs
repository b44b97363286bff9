// 🔐 Role-Gated Editing
// One capability surface (add / remove / edit), two implementations
//
// - Viewer: every call is denied, the store is never touched
// - Editor: mutates the store, then saves it

use crate::config::SavePolicy;
use crate::error::CatalogError;
use crate::item::Item;
use crate::store::CatalogStore;
use tracing::{info, warn};

// ============================================================================
// ROLE
// ============================================================================

/// Role chosen once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Viewer,
    Editor,
}

impl Role {
    /// Parse the startup answer: "client" or "manager", any case
    pub fn parse(input: &str) -> Option<Role> {
        match input.trim().to_lowercase().as_str() {
            "client" => Some(Role::Viewer),
            "manager" => Some(Role::Editor),
            _ => None,
        }
    }

    /// Name shown to the user
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Viewer => "Client",
            Role::Editor => "Manager",
        }
    }

    /// Build the product manager for this role
    pub fn manager(self, save_policy: SavePolicy) -> Box<dyn ProductManager> {
        match self {
            Role::Viewer => Box::new(Viewer),
            Role::Editor => Box::new(Editor::new(save_policy)),
        }
    }
}

// ============================================================================
// CONFIRMATION
// ============================================================================

/// What an accepted mutation reports back
///
/// Under `SavePolicy::Lenient` a failed save does not cancel the
/// confirmation; it rides along in `save_error` so the caller can still show it.
#[derive(Debug)]
pub struct Confirmation {
    pub message: String,
    pub save_error: Option<CatalogError>,
}

impl Confirmation {
    pub fn saved(&self) -> bool {
        self.save_error.is_none()
    }
}

// ============================================================================
// CAPABILITY TRAIT
// ============================================================================

/// ProductManager - mutations of the catalog, gated by role
///
/// `Ok` carries the confirmation. Denials and missing ids come back
/// as `Err` and are shown to the user through their `Display`.
pub trait ProductManager {
    fn role(&self) -> Role;

    fn add_product(
        &self,
        store: &mut CatalogStore,
        id: &str,
        name: &str,
        category: &str,
        price: f64,
    ) -> Result<Confirmation, CatalogError>;

    fn remove_product(&self, store: &mut CatalogStore, id: &str) -> Result<Confirmation, CatalogError>;

    fn edit_product(
        &self,
        store: &mut CatalogStore,
        id: &str,
        name: &str,
        category: &str,
        price: f64,
    ) -> Result<Confirmation, CatalogError>;
}

// ============================================================================
// VIEWER
// ============================================================================

/// Unprivileged role. Can browse and buy, cannot change the catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewer;

impl Viewer {
    fn deny(action: &'static str) -> CatalogError {
        warn!(action, "permission denied");
        CatalogError::PermissionDenied { action }
    }
}

impl ProductManager for Viewer {
    fn role(&self) -> Role {
        Role::Viewer
    }

    fn add_product(
        &self,
        _store: &mut CatalogStore,
        _id: &str,
        _name: &str,
        _category: &str,
        _price: f64,
    ) -> Result<Confirmation, CatalogError> {
        Err(Viewer::deny("add"))
    }

    fn remove_product(&self, _store: &mut CatalogStore, _id: &str) -> Result<Confirmation, CatalogError> {
        Err(Viewer::deny("remove"))
    }

    fn edit_product(
        &self,
        _store: &mut CatalogStore,
        _id: &str,
        _name: &str,
        _category: &str,
        _price: f64,
    ) -> Result<Confirmation, CatalogError> {
        Err(Viewer::deny("edit"))
    }
}

// ============================================================================
// EDITOR
// ============================================================================

/// Privileged role. Every successful mutation is followed by a full save.
#[derive(Debug, Clone, Copy, Default)]
pub struct Editor {
    save_policy: SavePolicy,
}

impl Editor {
    pub fn new(save_policy: SavePolicy) -> Self {
        Editor { save_policy }
    }

    pub fn save_policy(&self) -> SavePolicy {
        self.save_policy
    }

    /// Save, then decide what the caller sees
    ///
    /// Lenient: the confirmation stands even if the save failed.
    /// Strict: a failed save replaces the confirmation.
    fn persist(&self, store: &CatalogStore, message: String) -> Result<Confirmation, CatalogError> {
        // store.save() already logs the failure
        match (store.save(), self.save_policy) {
            (Ok(()), _) => Ok(Confirmation { message, save_error: None }),
            (Err(err), SavePolicy::Lenient) => Ok(Confirmation {
                message,
                save_error: Some(err),
            }),
            (Err(err), SavePolicy::Strict) => Err(err),
        }
    }
}

impl ProductManager for Editor {
    fn role(&self) -> Role {
        Role::Editor
    }

    fn add_product(
        &self,
        store: &mut CatalogStore,
        id: &str,
        name: &str,
        category: &str,
        price: f64,
    ) -> Result<Confirmation, CatalogError> {
        store.append(Item::new(id, name, category, price));
        info!(id, name, "product added");

        self.persist(
            store,
            format!("Product '{}' with id '{}' added successfully.", name, id),
        )
    }

    fn remove_product(&self, store: &mut CatalogStore, id: &str) -> Result<Confirmation, CatalogError> {
        let removed = store.remove_by_id(id);
        info!(id, count = removed, "product removed");

        // Confirmed even when nothing matched
        self.persist(store, format!("Product with id '{}' removed successfully", id))
    }

    fn edit_product(
        &self,
        store: &mut CatalogStore,
        id: &str,
        name: &str,
        category: &str,
        price: f64,
    ) -> Result<Confirmation, CatalogError> {
        if !store.replace_by_id(id, name, category, price) {
            return Err(CatalogError::NotFound { id: id.to_string() });
        }
        info!(id, name, "product edited");

        self.persist(
            store,
            format!("Product '{}' with id '{}' edited successfully", name, id),
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
