//! Target tables and row buffers
//!
//! The warehouse consists of six flat tables: one patient master table and
//! five fact tables keyed back to it by `PATID`. Rows are accumulated in
//! memory during extraction and materialized once at write time.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Column names shared across the output tables.
pub mod columns {
    /// Patient identifier (join key to the patient master table)
    pub const PATID: &str = "PATID";
    /// Encounter identifier (nullable for resources not tied to a stay)
    pub const EVTID: &str = "EVTID";
    /// The resource's own identifier
    pub const ELTID: &str = "ELTID";
    /// Patient gender
    pub const PATSEX: &str = "PATSEX";
    /// Patient birth date
    pub const PATBD: &str = "PATBD";
    /// Patient age at the event (derived at consolidation)
    pub const PATAGE: &str = "PATAGE";
    /// Entry/start date (movement, diagnosis/procedure)
    pub const DATENT: &str = "DATENT";
    /// Ward/service name
    pub const SEJUM: &str = "SEJUM";
    /// Exit location
    pub const SEJUF: &str = "SEJUF";
    /// Sample collection date (biology)
    pub const PRLVTDATE: &str = "PRLVTDATE";
    /// Exam name (biology)
    pub const PNAME: &str = "PNAME";
    /// Numeric result value (biology)
    pub const RESULT: &str = "RESULT";
    /// Result unit (biology)
    pub const UNIT: &str = "UNIT";
    /// Drug label (pharmacy)
    pub const ALLSPELABEL: &str = "ALLSPELABEL";
    /// Drug code (pharmacy)
    pub const ALLSPECODE: &str = "ALLSPECODE";
    /// Prescription date (pharmacy)
    pub const DATPRES: &str = "DATPRES";
    /// Dosage instructions (pharmacy)
    pub const PRES: &str = "PRES";
    /// Row kind, Condition or Procedure (diagnosis/procedure)
    pub const TYPE: &str = "TYPE";
    /// Diagnosis or procedure code
    pub const CODE: &str = "CODE";
    /// Diagnosis or procedure label
    pub const LIBELLE: &str = "LIBELLE";
    /// Document full text
    pub const RECTXT: &str = "RECTXT";
    /// Document date
    pub const RECDATE: &str = "RECDATE";
    /// Document type (originating resource kind)
    pub const RECTYPE: &str = "RECTYPE";
}

/// One of the six warehouse tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetTable {
    /// Patient master table (one row per Patient resource)
    Patient,
    /// Encounters/hospital stays (`mvt`)
    Movement,
    /// Quantitative lab results (`biol`)
    Biology,
    /// Prescriptions (`pharma`)
    Pharmacy,
    /// Diagnoses and procedures (`pmsi`)
    Pmsi,
    /// Clinical documents (`doceds`)
    Document,
}

impl TargetTable {
    /// All tables in output order, patient master first.
    pub const ALL: [TargetTable; 6] = [
        TargetTable::Patient,
        TargetTable::Movement,
        TargetTable::Biology,
        TargetTable::Pharmacy,
        TargetTable::Pmsi,
        TargetTable::Document,
    ];

    /// Short table name used in configuration and logs.
    pub fn name(&self) -> &'static str {
        match self {
            TargetTable::Patient => "patient",
            TargetTable::Movement => "mvt",
            TargetTable::Biology => "biol",
            TargetTable::Pharmacy => "pharma",
            TargetTable::Pmsi => "pmsi",
            TargetTable::Document => "doceds",
        }
    }

    /// Output file name for this table.
    pub fn file_name(&self) -> String {
        format!("{}.parquet", self.name())
    }

    /// The column holding the event date used to derive `PATAGE`.
    ///
    /// `None` for the patient master table, whose age is derived against
    /// the run date instead.
    pub fn event_date_column(&self) -> Option<&'static str> {
        match self {
            TargetTable::Patient => None,
            TargetTable::Movement => Some(columns::DATENT),
            TargetTable::Biology => Some(columns::PRLVTDATE),
            TargetTable::Pharmacy => Some(columns::DATPRES),
            TargetTable::Pmsi => Some(columns::DATENT),
            TargetTable::Document => Some(columns::RECDATE),
        }
    }

    /// Parses a table name as found in mapping configurations.
    ///
    /// Accepts both the short name (`"mvt"`) and the output file name
    /// (`"mvt.parquet"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.strip_suffix(".parquet").unwrap_or(name);
        TargetTable::ALL.into_iter().find(|t| t.name() == short)
    }
}

impl fmt::Display for TargetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One output row: column name to scalar value, in insertion order.
///
/// Insertion order matters for deterministic column layout in the written
/// files, hence `IndexMap` rather than a hash map.
pub type Row = IndexMap<String, Value>;

/// In-memory row buffers for all six tables.
///
/// Owned by a pipeline run; created empty, filled during extraction,
/// consumed once at consolidation/write time.
#[derive(Debug, Default, Clone)]
pub struct TableSet {
    buffers: IndexMap<TargetTable, Vec<Row>>,
}

impl TableSet {
    /// Creates an empty table set with a buffer for every target table.
    pub fn new() -> Self {
        let mut buffers = IndexMap::new();
        for table in TargetTable::ALL {
            buffers.insert(table, Vec::new());
        }
        Self { buffers }
    }

    /// Appends a row to a table buffer.
    pub fn push(&mut self, table: TargetTable, row: Row) {
        self.buffers.entry(table).or_default().push(row);
    }

    /// Rows accumulated for a table.
    pub fn rows(&self, table: TargetTable) -> &[Row] {
        self.buffers.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable access to a table's rows (used by the consolidator).
    pub fn rows_mut(&mut self, table: TargetTable) -> &mut Vec<Row> {
        self.buffers.entry(table).or_default()
    }

    /// Number of rows in a table.
    pub fn len(&self, table: TargetTable) -> usize {
        self.rows(table).len()
    }

    /// True when no table holds any row.
    pub fn is_empty(&self) -> bool {
        self.buffers.values().all(Vec::is_empty)
    }

    /// Iterates tables in output order together with their rows.
    pub fn iter(&self) -> impl Iterator<Item = (TargetTable, &[Row])> {
        TargetTable::ALL.into_iter().map(|t| (t, self.rows(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_names() {
        assert_eq!(TargetTable::Patient.file_name(), "patient.parquet");
        assert_eq!(TargetTable::Movement.file_name(), "mvt.parquet");
        assert_eq!(TargetTable::Document.name(), "doceds");
    }

    #[test]
    fn test_from_name_accepts_both_forms() {
        assert_eq!(TargetTable::from_name("biol"), Some(TargetTable::Biology));
        assert_eq!(
            TargetTable::from_name("pharma.parquet"),
            Some(TargetTable::Pharmacy)
        );
        assert_eq!(TargetTable::from_name("unknown"), None);
    }

    #[test]
    fn test_event_date_columns() {
        assert_eq!(TargetTable::Patient.event_date_column(), None);
        assert_eq!(TargetTable::Movement.event_date_column(), Some("DATENT"));
        assert_eq!(TargetTable::Biology.event_date_column(), Some("PRLVTDATE"));
        assert_eq!(TargetTable::Document.event_date_column(), Some("RECDATE"));
    }

    #[test]
    fn test_table_set_push_and_len() {
        let mut tables = TableSet::new();
        assert!(tables.is_empty());

        let mut row = Row::new();
        row.insert(columns::PATID.to_string(), json!("p1"));
        tables.push(TargetTable::Patient, row);

        assert_eq!(tables.len(TargetTable::Patient), 1);
        assert_eq!(tables.len(TargetTable::Biology), 0);
        assert!(!tables.is_empty());
        assert_eq!(tables.rows(TargetTable::Patient)[0]["PATID"], json!("p1"));
    }

    #[test]
    fn test_table_set_iterates_in_output_order() {
        let tables = TableSet::new();
        let order: Vec<TargetTable> = tables.iter().map(|(t, _)| t).collect();
        assert_eq!(order, TargetTable::ALL);
    }
}
