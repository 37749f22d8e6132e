//! Statement templates derived from a [`TableDescriptor`].
//!
//! Templates contain descriptor identifiers as text and `:name` placeholders
//! for every value. They are fed to [`rewrite`](super::rewrite) before
//! execution.

use super::table::{TableDescriptor, CREATED_AT, UPDATED_AT};

/// Placeholder name for the page size of a list statement.
pub const LIMIT: &str = "limit";
/// Placeholder name for the page offset of a list statement.
pub const OFFSET: &str = "offset";
/// Column carrying the unwindowed row count in a list statement.
pub const TOTAL_COUNT: &str = "total_count";

/// `INSERT` of one row with the id, the given data columns and both timestamps.
pub fn insert(table: &TableDescriptor, columns: &[&str]) -> String {
    let mut names = Vec::with_capacity(columns.len() + 3);
    names.push(table.id_column);
    names.extend_from_slice(columns);
    names.push(CREATED_AT);
    names.push(UPDATED_AT);

    let placeholders: Vec<String> = names.iter().map(|name| format!(":{name}")).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.table,
        names.join(", "),
        placeholders.join(", ")
    )
}

/// `SELECT` of every column for one id.
pub fn select_by_id(table: &TableDescriptor) -> String {
    format!(
        "SELECT {} FROM {} WHERE {id} = :{id}",
        table.select_columns().join(", "),
        table.table,
        id = table.id_column
    )
}

/// `SELECT` of the id for one value of `column`.
pub fn select_id_by(table: &TableDescriptor, column: &str) -> String {
    format!(
        "SELECT {id} FROM {} WHERE {column} = :{column}",
        table.table,
        id = table.id_column
    )
}

/// `UPDATE` of the given data columns plus `updated_at` for one id.
pub fn update(table: &TableDescriptor, columns: &[&str]) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .copied()
        .chain(std::iter::once(UPDATED_AT))
        .map(|column| format!("{column} = :{column}"))
        .collect();

    format!(
        "UPDATE {} SET {} WHERE {id} = :{id}",
        table.table,
        assignments.join(", "),
        id = table.id_column
    )
}

/// `DELETE` of one id.
pub fn delete(table: &TableDescriptor) -> String {
    format!(
        "DELETE FROM {} WHERE {id} = :{id}",
        table.table,
        id = table.id_column
    )
}

/// One page of rows together with the total row count, in a single statement.
///
/// The count comes from an aggregate subquery left-joined to the page, so it
/// is present even when the window lies past the last row. In that case the
/// statement yields one row whose entity columns are all `NULL`.
pub fn paged_list(table: &TableDescriptor) -> String {
    format!(
        "SELECT totals.{TOTAL_COUNT}, page.* \
         FROM (SELECT COUNT(*) AS {TOTAL_COUNT} FROM {name}) AS totals \
         LEFT JOIN (SELECT {columns} FROM {name} ORDER BY {id} LIMIT :{LIMIT} OFFSET :{OFFSET}) AS page \
         ON 1 = 1 \
         ORDER BY page.{id}",
        name = table.table,
        columns = table.select_columns().join(", "),
        id = table.id_column
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    static WIDGETS: TableDescriptor = TableDescriptor {
        entity_type: "Widget",
        table: "widgets",
        id_column: "widget_id",
        columns: &["name", "size", "code"],
        alternate_key: Some("code"),
        default_page_size: 10,
    };

    #[test]
    fn test_insert_template() {
        assert_eq!(
            insert(&WIDGETS, &["name", "size"]),
            "INSERT INTO widgets (widget_id, name, size, created_at, updated_at) \
             VALUES (:widget_id, :name, :size, :created_at, :updated_at)"
        );
    }

    #[test]
    fn test_select_by_id_template() {
        assert_eq!(
            select_by_id(&WIDGETS),
            "SELECT widget_id, name, size, code, created_at, updated_at \
             FROM widgets WHERE widget_id = :widget_id"
        );
    }

    #[test]
    fn test_select_id_by_template() {
        assert_eq!(
            select_id_by(&WIDGETS, "code"),
            "SELECT widget_id FROM widgets WHERE code = :code"
        );
    }

    #[test]
    fn test_update_template_sets_only_given_columns() {
        assert_eq!(
            update(&WIDGETS, &["size"]),
            "UPDATE widgets SET size = :size, updated_at = :updated_at \
             WHERE widget_id = :widget_id"
        );
    }

    #[test]
    fn test_update_template_never_touches_id_or_created_at() {
        let sql = update(&WIDGETS, &["name", "size"]);
        let set_clause = sql.split(" WHERE ").next().unwrap();

        assert!(!set_clause.contains("widget_id ="));
        assert!(!set_clause.contains(CREATED_AT));
    }

    #[test]
    fn test_delete_template() {
        assert_eq!(
            delete(&WIDGETS),
            "DELETE FROM widgets WHERE widget_id = :widget_id"
        );
    }

    #[test]
    fn test_paged_list_template() {
        let sql = paged_list(&WIDGETS);

        assert!(sql.starts_with("SELECT totals.total_count, page.*"));
        assert!(sql.contains("SELECT COUNT(*) AS total_count FROM widgets"));
        assert!(sql.contains("ORDER BY widget_id LIMIT :limit OFFSET :offset"));
        assert!(sql.ends_with("ORDER BY page.widget_id"));
    }
}
