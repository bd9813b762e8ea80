use crate::schema::{ColumnType, TableSchema, ViewSchema, NAMESPACE};

/// Generate CREATE TABLE IF NOT EXISTS SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.qualified_name());
    let mut columns = Vec::new();

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer | ColumnType::Serial => "INTEGER",
            ColumnType::Decimal => "NUMERIC",
            ColumnType::Text => "TEXT",
            ColumnType::Timestamp => "TIMESTAMP",
        };

        let pk = match (col.primary_key, &col.col_type) {
            (true, ColumnType::Serial) => " PRIMARY KEY AUTOINCREMENT",
            (true, _) => " PRIMARY KEY",
            _ => "",
        };
        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
        let default = if col.col_type == ColumnType::Timestamp {
            " DEFAULT CURRENT_TIMESTAMP"
        } else {
            ""
        };

        columns.push(format!(
            "    {} {}{}{}{}",
            col.name, sql_type, pk, null_constraint, default
        ));
    }

    for unique in schema.unique {
        columns.push(format!("    UNIQUE ({})", unique.join(", ")));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX IF NOT EXISTS statements for the table's named indexes
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .indexes
        .iter()
        .map(|index| {
            format!(
                "CREATE INDEX IF NOT EXISTS {}.{} ON {}({})",
                NAMESPACE,
                index.name,
                schema.name,
                index.columns.join(", ")
            )
        })
        .collect()
}

/// Generate the statements that replace a view
pub fn generate_view(view: &ViewSchema) -> [String; 2] {
    [
        format!("DROP VIEW IF EXISTS {}.{}", NAMESPACE, view.name),
        format!("CREATE VIEW {}.{} AS\n{}", NAMESPACE, view.name, view.query),
    ]
}
