/// Introspected Postgres catalog snapshots
///
/// Tables, columns and constraints as read from the catalog, in the shape
/// the field synthesizer and the reference schema consume them.

mod types;

pub use types::{
    Attribute, Constraint, ConstraintKind, PgType, Table, TagValue, Tags, TIMESTAMPTZ,
};
