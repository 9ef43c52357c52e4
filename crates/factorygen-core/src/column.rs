/// One column of a table as reported by the catalog.
///
/// `column_type` is the dialect's raw declared type, modifiers included
/// (e.g. `int(10) unsigned`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub field: String,
    pub column_type: String,
}

impl ColumnDescriptor {
    pub fn new(field: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            column_type: column_type.into(),
        }
    }
}
