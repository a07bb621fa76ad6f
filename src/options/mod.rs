//! User-facing option structs consumed when a column family is opened.
mod cf_options;
mod db_options;

pub use cf_options::ColumnFamilyOptions;
pub use db_options::DbOptions;

/// Engine-wide and column family options in one struct, for callers that
/// configure a single column family.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub db: DbOptions,
    pub cf: ColumnFamilyOptions,
}

impl Options {
    pub fn new(db: DbOptions, cf: ColumnFamilyOptions) -> Self {
        Self { db, cf }
    }
}
