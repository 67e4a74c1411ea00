use crate::host::Host;
use crate::introspection::{Attribute, Table, TIMESTAMPTZ};

/// Whether a formatted field should be synthesized for `attr`
///
/// Key columns are left alone: primary keys and foreign keys keep only
/// their raw representation.
pub fn is_eligible(host: &dyn Host, table: &Table, attr: &Attribute) -> bool {
    host.column_visible(attr, table)
        && !host.is_omitted_from_read(attr)
        && attr.ty.name == TIMESTAMPTZ
        && !table.is_primary_key_column(attr)
        && !table.is_foreign_key_column(attr)
}
