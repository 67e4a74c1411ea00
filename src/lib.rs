pub mod config;
pub mod error;
pub mod formatted;
pub mod host;
pub mod introspection;
pub mod schema;
pub mod sql;

// Re-export commonly used types
pub use config::{Config, ExtensionConfig};
pub use error::{Result, StampinatorError};
pub use formatted::{DerivedField, FormattedTimestamps, Options};
pub use host::{Host, PgHost};
pub use schema::{Executor, SchemaBuilder};
