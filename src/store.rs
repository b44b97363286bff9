// 🗄️ Catalog Store - CSV-backed product repository
// In-memory working set + full-file overwrite on every save

use crate::error::CatalogError;
use crate::item::{Item, ItemRef};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Column order of the backing file
pub const CSV_HEADER: [&str; 4] = ["id", "Product", "Category", "Price"];

// ============================================================================
// LOADING
// ============================================================================

/// Result of reading the backing file
///
/// Loading never fails outright: `items` holds whatever was read before
/// the problem, and `issue` says what the problem was.
#[derive(Debug)]
pub struct LoadReport {
    pub items: Vec<Item>,
    pub issue: Option<CatalogError>,
}

/// Read every row of a catalog CSV file
///
/// # Returns
/// * Missing file → no items, `FileNotFound`
/// * Bad row → the rows before it, `Load`
pub fn load_items(path: &Path) -> LoadReport {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return LoadReport {
                items: Vec::new(),
                issue: Some(CatalogError::FileNotFound { path: path.to_path_buf() }),
            };
        }
        Err(err) => {
            return LoadReport {
                items: Vec::new(),
                issue: Some(CatalogError::Load {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                }),
            };
        }
    };

    let mut rdr = csv::Reader::from_reader(file);
    let mut items = Vec::new();

    for result in rdr.deserialize::<Item>() {
        match result {
            Ok(item) => items.push(item),
            Err(err) => {
                return LoadReport {
                    items,
                    issue: Some(CatalogError::Load {
                        path: path.to_path_buf(),
                        reason: err.to_string(),
                    }),
                };
            }
        }
    }

    LoadReport { items, issue: None }
}

/// Overwrite a catalog CSV file with `items`
///
/// The header row is always written, even for an empty catalog.
pub fn write_items<'a, I>(path: &Path, items: I) -> Result<(), CatalogError>
where
    I: IntoIterator<Item = &'a ItemRef>,
{
    let save_err = |reason: String| CatalogError::Save {
        path: path.to_path_buf(),
        reason,
    };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| save_err(e.to_string()))?;

    wtr.write_record(CSV_HEADER).map_err(|e| save_err(e.to_string()))?;

    for item in items {
        wtr.serialize(&*item.borrow())
            .map_err(|e| save_err(e.to_string()))?;
    }

    wtr.flush().map_err(|e| save_err(e.to_string()))
}

// ============================================================================
// STORE
// ============================================================================

/// Single source of truth for product data
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    items: Vec<ItemRef>,
    load_issue: Option<CatalogError>,
}

impl CatalogStore {
    /// Load the catalog from `path`
    ///
    /// A missing or malformed file is not fatal: the store starts empty (or
    /// partial) and the condition is kept in `load_issue()`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let LoadReport { items, issue } = load_items(&path);

        match &issue {
            None => info!(path = %path.display(), count = items.len(), "catalog loaded"),
            Some(err @ CatalogError::FileNotFound { .. }) => {
                warn!(path = %path.display(), "{}", err)
            }
            Some(err) => error!(path = %path.display(), count = items.len(), "{}", err),
        }

        CatalogStore {
            path,
            items: items.into_iter().map(Item::into_ref).collect(),
            load_issue: issue,
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// What went wrong while loading, if anything
    pub fn load_issue(&self) -> Option<&CatalogError> {
        self.load_issue.as_ref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// All items, in file/append order
    pub fn list_all(&self) -> &[ItemRef] {
        &self.items
    }

    /// Items whose category equals `category`, ignoring case
    pub fn list_by_category(&self, category: &str) -> Vec<ItemRef> {
        self.items
            .iter()
            .filter(|item| item.borrow().matches_category(category))
            .cloned()
            .collect()
    }

    /// First item with this id
    pub fn find_by_id(&self, id: &str) -> Option<ItemRef> {
        self.items
            .iter()
            .find(|item| item.borrow().id == id)
            .cloned()
    }

    /// Owned copy of the current contents
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.iter().map(|item| item.borrow().clone()).collect()
    }

    // ------------------------------------------------------------------------
    // Mutators (in memory only; callers decide when to save)
    // ------------------------------------------------------------------------

    pub fn append(&mut self, item: Item) {
        self.items.push(item.into_ref());
    }

    /// Drop every item with this id. Returns how many were dropped.
    pub fn remove_by_id(&mut self, id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.borrow().id != id);
        before - self.items.len()
    }

    /// Overwrite name/category/price of the first item with this id.
    /// Later duplicates are left alone.
    pub fn replace_by_id(&mut self, id: &str, name: &str, category: &str, price: f64) -> bool {
        match self.items.iter().find(|item| item.borrow().id == id) {
            Some(item) => {
                let mut item = item.borrow_mut();
                item.name = name.to_string();
                item.category = category.to_string();
                item.price = price;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Overwrite the backing file with the in-memory contents
    ///
    /// On failure memory is left as it is; nothing is rolled back.
    pub fn save(&self) -> Result<(), CatalogError> {
        match write_items(&self.path, &self.items) {
            Ok(()) => {
                debug!(path = %self.path.display(), count = self.items.len(), "catalog saved");
                Ok(())
            }
            Err(err) => {
                error!(path = %self.path.display(), "{}", err);
                Err(err)
            }
        }
    }

    /// Handle shared with the store, for tests that check aliasing
    #[cfg(test)]
    pub(crate) fn handle_at(&self, index: usize) -> Option<ItemRef> {
        self.items.get(index).cloned()
    }
}

// ============================================================================
// TESTS
// ============================================================================
