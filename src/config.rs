// ⚙️ Configuration
// Where the catalog lives and how strictly saves are reported

use std::path::PathBuf;

/// Default backing file, relative to the working directory
pub const DEFAULT_CATALOG_PATH: &str = "products.csv";

/// How an editor reports a failed save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    /// Log the failure and still return the confirmation message.
    /// Memory and disk diverge until the next successful save.
    #[default]
    Lenient,

    /// Return the save error instead of the confirmation.
    /// The in-memory mutation is kept either way.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub save_policy: SavePolicy,
}

impl Config {
    /// Build from process arguments (program name first).
    ///
    /// The only accepted argument is an optional catalog path.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let catalog_path = args
            .get(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

        Config {
            catalog_path,
            save_policy: SavePolicy::default(),
        }
    }

    pub fn with_save_policy(mut self, save_policy: SavePolicy) -> Self {
        self.save_policy = save_policy;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            save_policy: SavePolicy::default(),
        }
    }
}
