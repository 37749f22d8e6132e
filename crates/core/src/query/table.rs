use crate::entity::ValidationError;

use super::FieldMap;

/// Column holding the insertion timestamp.
pub const CREATED_AT: &str = "created_at";
/// Column holding the last-mutation timestamp.
pub const UPDATED_AT: &str = "updated_at";

/// Static description of one entity table.
///
/// Every identifier that ends up in SQL text comes from a descriptor. The
/// repository rejects field maps with keys outside `columns`.
#[derive(Debug)]
pub struct TableDescriptor {
    /// Entity name used in errors and logs.
    pub entity_type: &'static str,
    pub table: &'static str,
    /// Primary key column. Values are generated UUIDs.
    pub id_column: &'static str,
    /// Writable data columns, excluding the id and timestamps.
    pub columns: &'static [&'static str],
    /// Unique column usable as a secondary lookup key.
    pub alternate_key: Option<&'static str>,
    /// Page size used when a list request does not set a positive limit.
    pub default_page_size: i64,
}

impl TableDescriptor {
    /// All columns in select order: id, data columns, timestamps.
    pub fn select_columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(self.columns.len() + 3);
        columns.push(self.id_column);
        columns.extend_from_slice(self.columns);
        columns.push(CREATED_AT);
        columns.push(UPDATED_AT);
        columns
    }

    /// Checks that every key of `fields` is a writable column of this table.
    pub fn ensure_writable(&self, fields: &FieldMap) -> Result<(), ValidationError> {
        match fields.keys().find(|key| !self.columns.contains(key)) {
            Some(unknown) => Err(ValidationError::UnknownField {
                entity_type: self.entity_type,
                field: unknown.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SqlValue;

    static WIDGETS: TableDescriptor = TableDescriptor {
        entity_type: "Widget",
        table: "widgets",
        id_column: "widget_id",
        columns: &["name", "size"],
        alternate_key: None,
        default_page_size: 10,
    };

    #[test]
    fn test_select_columns_order() {
        assert_eq!(
            WIDGETS.select_columns(),
            vec!["widget_id", "name", "size", "created_at", "updated_at"]
        );
    }

    #[test]
    fn test_ensure_writable_accepts_known_columns() {
        let fields = FieldMap::from([("name", SqlValue::from("a"))]);
        assert!(WIDGETS.ensure_writable(&fields).is_ok());
    }

    #[test]
    fn test_ensure_writable_rejects_id_and_timestamps() {
        for column in ["widget_id", "created_at", "updated_at", "color"] {
            let fields = FieldMap::from([(column, SqlValue::from("a"))]);
            assert!(matches!(
                WIDGETS.ensure_writable(&fields),
                Err(ValidationError::UnknownField { .. })
            ));
        }
    }
}
