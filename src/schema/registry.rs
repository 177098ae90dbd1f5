//! Schema registry keyed by disclosure category and program year
//!
//! The registry answers two independent questions for a `(Category, year)` pair:
//! which source columns to read (in order), and which renames normalize those
//! columns to canonical names. Both answers are `Option`s; a missing column list
//! means the file is skipped, a missing rename map means the columns keep their
//! source names.

use std::sync::{Arc, LazyLock};

use rustc_hash::FxHashMap;

use super::Category;
use super::open_payments;

/// Composite lookup key for the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryKey {
    pub category: Category,
    pub year: u16,
}

impl RegistryKey {
    #[must_use]
    pub const fn new(category: Category, year: u16) -> Self {
        Self { category, year }
    }
}

/// Ordered mapping from source column names to canonical names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMap {
    pairs: Vec<(String, String)>,
}

impl RenameMap {
    /// Create a rename map from `(old, new)` pairs
    pub fn new<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(old, new)| (old.into(), new.into()))
                .collect(),
        }
    }

    /// The canonical name for `name`, or `name` itself if it is not renamed
    #[must_use]
    pub fn renamed<'a>(&'a self, name: &'a str) -> &'a str {
        self.pairs
            .iter()
            .find(|(old, _)| old == name)
            .map_or(name, |(_, new)| new.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Immutable registry of read columns and renames per (category, year)
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    columns: FxHashMap<RegistryKey, Arc<[String]>>,
    renames: FxHashMap<RegistryKey, Arc<RenameMap>>,
}

impl SchemaRegistry {
    /// Start building a new registry
    #[must_use]
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Ordered columns to read for a category and program year
    #[must_use]
    pub fn columns(&self, category: Category, year: u16) -> Option<&[String]> {
        self.columns
            .get(&RegistryKey::new(category, year))
            .map(AsRef::as_ref)
    }

    /// Rename map to apply for a category and program year
    #[must_use]
    pub fn renames(&self, category: Category, year: u16) -> Option<&RenameMap> {
        self.renames
            .get(&RegistryKey::new(category, year))
            .map(AsRef::as_ref)
    }

    /// All keys with a registered column list, sorted
    #[must_use]
    pub fn keys(&self) -> Vec<RegistryKey> {
        let mut keys: Vec<_> = self.columns.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Output column names for a key: the read columns with renames applied
    #[must_use]
    pub fn normalized_columns(&self, category: Category, year: u16) -> Option<Vec<String>> {
        let columns = self.columns(category, year)?;
        let renames = self.renames(category, year);
        Some(
            columns
                .iter()
                .map(|name| renames.map_or(name.as_str(), |map| map.renamed(name)).to_string())
                .collect(),
        )
    }
}

/// Builder for [`SchemaRegistry`]
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    registry: SchemaRegistry,
}

impl SchemaRegistryBuilder {
    /// Register the ordered read columns for `category` in every year of `years`
    #[must_use]
    pub fn with_columns<Y>(mut self, years: Y, category: Category, columns: &[&str]) -> Self
    where
        Y: IntoIterator<Item = u16>,
    {
        let shared: Arc<[String]> = columns.iter().map(|c| (*c).to_string()).collect();
        for year in years {
            let key = RegistryKey::new(category, year);
            if self.registry.columns.insert(key, Arc::clone(&shared)).is_some() {
                log::warn!("Column list for {category} {year} registered twice; keeping the last one");
            }
        }
        self
    }

    /// Register the rename map for `category` in every year of `years`
    #[must_use]
    pub fn with_renames<Y>(mut self, years: Y, category: Category, pairs: &[(&str, &str)]) -> Self
    where
        Y: IntoIterator<Item = u16>,
    {
        let shared = Arc::new(RenameMap::new(pairs.iter().copied()));
        for year in years {
            let key = RegistryKey::new(category, year);
            if self.registry.renames.insert(key, Arc::clone(&shared)).is_some() {
                log::warn!("Rename map for {category} {year} registered twice; keeping the last one");
            }
        }
        self
    }

    #[must_use]
    pub fn build(self) -> SchemaRegistry {
        self.registry
    }
}

static OPEN_PAYMENTS: LazyLock<SchemaRegistry> = LazyLock::new(open_payments::build_registry);

/// The process-wide registry of Open Payments program-year layouts
#[must_use]
pub fn open_payments_registry() -> &'static SchemaRegistry {
    &OPEN_PAYMENTS
}
