/// Schema namespace every destination object lives in
pub const NAMESPACE: &str = "nba";

/// Column data type
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    Integer,
    /// Fixed-precision decimal, stored with NUMERIC affinity
    Decimal,
    Text,
    /// Autoincrementing surrogate key
    Serial,
    /// Timestamp defaulting to the insertion time
    Timestamp,
}

impl ColumnType {
    /// Whether CSV cells for this column are parsed as numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Decimal | ColumnType::Serial)
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub col_type: ColumnType,
    pub nullable: bool,
    pub primary_key: bool,
}

impl Column {
    /// Create an optional (nullable) column
    pub const fn new(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            nullable: true,
            primary_key: false,
        }
    }

    /// Create a required (non-nullable) column
    pub const fn required(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            nullable: false,
            primary_key: false,
        }
    }

    /// Mark the column as the table's primary key
    pub const fn primary(self) -> Self {
        Self {
            primary_key: true,
            nullable: false,
            ..self
        }
    }
}

/// Named index definition
#[derive(Debug, Clone)]
pub struct Index {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl Index {
    pub const fn on(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self { name, columns }
    }
}

/// Table schema definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub indexes: &'static [Index],
    /// Column sets that must be unique across rows
    pub unique: &'static [&'static [&'static str]],
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Name qualified with the destination namespace
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", NAMESPACE, self.name)
    }
}

/// Reporting view, recreated after every load
#[derive(Debug, Clone)]
pub struct ViewSchema {
    pub name: &'static str,
    /// SELECT body; table references are unqualified and resolve inside the namespace
    pub query: &'static str,
}
