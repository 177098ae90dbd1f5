//! Schema definitions for Open Payments disclosure files
//!
//! This module defines the closed set of disclosure categories, the registry that
//! maps a (category, program year) to the columns to read and the renames to apply,
//! and the schema-union used when combining tables from different categories.

pub mod open_payments;
pub mod registry;
pub mod union;

use std::fmt;
use std::str::FromStr;

pub use registry::{RegistryKey, RenameMap, SchemaRegistry, SchemaRegistryBuilder, open_payments_registry};
pub use union::{concat_diagonal, union_schema};

/// Canonical name of the subject identifier after normalization
pub const PROFILE_ID: &str = "Profile_ID";

/// Name of the literal category tag column
pub const CATEGORY_COLUMN: &str = "Category";

/// Disclosure record category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// GNRL - General payments
    General,
    /// RSRCH - Research payments
    Research,
    /// OWNRSHP - Ownership and investment interests
    Ownership,
}

impl Category {
    /// All categories, in registry order
    pub const ALL: [Self; 3] = [Self::General, Self::Research, Self::Ownership];

    /// The code used in file names and in the `Category` column
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::General => "GNRL",
            Self::Research => "RSRCH",
            Self::Ownership => "OWNRSHP",
        }
    }

    /// Look up a category from its file-name code (case-sensitive)
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.code() == code)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("Unknown disclosure category: {s}"))
    }
}
