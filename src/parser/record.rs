use anyhow::{bail, Context, Result};
use csv::StringRecord;

use crate::schema::{ColumnType, TableSchema};

/// A parsed row ready for insertion, values ordered like the file's columns
pub struct ParsedRow {
    pub values: Vec<SqlValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Real(f) => stmt.raw_bind_parameter(idx, f)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

/// Lowercase a header and replace spaces and hyphens with underscores
pub fn normalize_column_name(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Normalize a CSV header row and check every column exists in the table
pub fn resolve_columns(headers: &StringRecord, schema: &TableSchema) -> Result<Vec<String>> {
    let columns: Vec<String> = headers.iter().map(normalize_column_name).collect();

    for col in &columns {
        if schema.column(col).is_none() {
            bail!("column '{}' does not exist in table {}", col, schema.name);
        }
    }

    Ok(columns)
}

/// Parse one CSV record into typed values for the given columns
pub fn parse_record(
    record: &StringRecord,
    columns: &[String],
    schema: &TableSchema,
) -> Result<ParsedRow> {
    let mut values = Vec::with_capacity(columns.len());

    for (col_name, raw) in columns.iter().zip(record.iter()) {
        let col_type = schema
            .column(col_name)
            .map(|c| &c.col_type)
            .unwrap_or(&ColumnType::Text);

        let value = extract_value(raw, col_type)
            .with_context(|| format!("Invalid value for column '{}'", col_name))?;
        values.push(value);
    }

    Ok(ParsedRow { values })
}

fn extract_value(raw: &str, col_type: &ColumnType) -> Result<SqlValue> {
    let raw = raw.trim();

    if raw.is_empty() {
        // Missing numbers stay NULL so aggregate views ignore them
        return Ok(if col_type.is_numeric() {
            SqlValue::Null
        } else {
            SqlValue::Text(String::new())
        });
    }

    let value = match col_type {
        ColumnType::Integer | ColumnType::Serial => raw
            .parse::<i64>()
            .map(SqlValue::Integer)
            .with_context(|| format!("expected an integer, found '{}'", raw))?,
        ColumnType::Decimal => raw
            .parse::<f64>()
            .map(SqlValue::Real)
            .with_context(|| format!("expected a number, found '{}'", raw))?,
        ColumnType::Text | ColumnType::Timestamp => SqlValue::Text(raw.to_string()),
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{PLAYERS, TEAMS};

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Player Name"), "player_name");
        assert_eq!(normalize_column_name("team-id"), "team_id");
        assert_eq!(normalize_column_name(" SEASON "), "season");
    }

    #[test]
    fn test_resolve_columns_rejects_unknown() {
        let headers = StringRecord::from(vec!["team_id", "mascot"]);
        assert!(resolve_columns(&headers, &TEAMS).is_err());

        let headers = StringRecord::from(vec!["Team ID", "Team-Name"]);
        let cols = resolve_columns(&headers, &TEAMS).unwrap();
        assert_eq!(cols, vec!["team_id", "team_name"]);
    }

    #[test]
    fn test_parse_record_types() {
        let columns = vec![
            "player_id".to_string(),
            "player_name".to_string(),
            "age".to_string(),
            "college".to_string(),
        ];
        let record = StringRecord::from(vec!["7", "Larry Bird", "", ""]);
        let row = parse_record(&record, &columns, &PLAYERS).unwrap();

        assert_eq!(row.values[0], SqlValue::Integer(7));
        assert_eq!(row.values[1], SqlValue::Text("Larry Bird".into()));
        assert_eq!(row.values[2], SqlValue::Null);
        assert_eq!(row.values[3], SqlValue::Text(String::new()));
    }

    #[test]
    fn test_parse_record_type_mismatch() {
        let columns = vec!["player_id".to_string()];
        let record = StringRecord::from(vec!["seven"]);
        assert!(parse_record(&record, &columns, &PLAYERS).is_err());
    }
}
