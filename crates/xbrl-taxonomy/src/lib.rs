pub mod derive;
pub mod error;
pub mod loader;

pub use derive::{DeriveOptions, derive_table_schema, derive_table_schemas};
pub use error::{Result, TaxonomyError};
pub use loader::load_taxonomy;
