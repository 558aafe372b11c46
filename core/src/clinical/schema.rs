use crate::error::{Result, TruthError};
use csv::StringRecord;

/// Global radiology-score column for DBT
pub const TOMO_BIRADS: &str = "TOMO_BIRADS_YR0";
/// Global radiology-score column for MRI
pub const MRI_BIRADS: &str = "MRI_BIRADS_YR0";
/// Breast laterality column of the DBT lesion table
pub const TOMO_LESION_BREAST: &str = "TOMO_LESIONBREAST_YR0";
/// Outcome text column of the DBT lesion table
pub const TOMO_LESION_OUTCOME: &str = "TOMO_LESIONOUTCOME_YR0";
/// Breast laterality column of the MRI lesion table
pub const MRI_LESION_BREAST: &str = "MRI_LESIONBREAST_YR0";
/// Outcome text column of the MRI lesion table
pub const MRI_LESION_OUTCOME: &str = "MRI_LESIONOUTCOME_YR0";

/// Column names and format of the clinical outcome tables
///
/// Columns are looked up by header name when a table is loaded, so tables may
/// add or reorder columns freely. The subject identifier is the last column of
/// every row unless `subject_column` names one explicitly.
///
/// # Example
///
/// ```
/// use truthmap_core::TableSchema;
///
/// let schema = TableSchema::default()
///     .with_subject_column("Subject_DE")
///     .with_delimiter(b';');
///
/// assert_eq!(schema.dbt_score_column, "TOMO_BIRADS_YR0");
/// assert_eq!(schema.subject_column.as_deref(), Some("Subject_DE"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub dbt_score_column: String,
    pub mri_score_column: String,
    pub dbt_laterality_column: String,
    pub dbt_outcome_column: String,
    pub mri_laterality_column: String,
    pub mri_outcome_column: String,
    /// Named subject column; `None` selects the last column
    pub subject_column: Option<String>,
    pub delimiter: u8,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            dbt_score_column: TOMO_BIRADS.to_string(),
            mri_score_column: MRI_BIRADS.to_string(),
            dbt_laterality_column: TOMO_LESION_BREAST.to_string(),
            dbt_outcome_column: TOMO_LESION_OUTCOME.to_string(),
            mri_laterality_column: MRI_LESION_BREAST.to_string(),
            mri_outcome_column: MRI_LESION_OUTCOME.to_string(),
            subject_column: None,
            delimiter: b',',
        }
    }
}

impl TableSchema {
    /// Builder: Read the subject identifier from a named column
    pub fn with_subject_column(mut self, name: &str) -> Self {
        self.subject_column = Some(name.to_string());
        self
    }

    /// Builder: Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Position of the subject identifier within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubjectPosition {
    Last,
    At(usize),
}

/// Header of one clinical table with its columns resolved by name
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    table: String,
    headers: Vec<String>,
    subject: SubjectPosition,
}

impl ColumnIndex {
    /// Resolves the subject column of a table header
    ///
    /// # Errors
    ///
    /// Returns `TruthError::Schema` if a named subject column is absent.
    pub fn new(table: &str, headers: &StringRecord, schema: &TableSchema) -> Result<Self> {
        let mut index = Self {
            table: table.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            subject: SubjectPosition::Last,
        };
        if let Some(ref name) = schema.subject_column {
            index.subject = SubjectPosition::At(index.position(name)?);
        }
        Ok(index)
    }

    /// Returns the position of a required column
    ///
    /// # Errors
    ///
    /// Returns `TruthError::Schema` if no header carries this name.
    pub fn position(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TruthError::Schema {
                table: self.table.clone(),
                column: name.to_string(),
            })
    }

    /// Returns the subject identifier of a row
    pub fn subject<'r>(&self, record: &'r StringRecord) -> &'r str {
        match self.subject {
            SubjectPosition::Last => record.iter().last().unwrap_or(""),
            SubjectPosition::At(i) => record.get(i).unwrap_or(""),
        }
    }

    /// Table name used in error messages
    pub fn table(&self) -> &str {
        &self.table
    }
}

/// Reads a delimited table into its resolved header and data rows
///
/// Fields are trimmed and blank lines skipped. Every row must have as many
/// fields as the header.
///
/// # Errors
///
/// Returns `TruthError::Csv` for ragged rows or invalid UTF-8 and
/// `TruthError::Schema` if a named subject column is missing.
pub fn read_table(
    table: &str,
    data: &[u8],
    schema: &TableSchema,
) -> Result<(ColumnIndex, Vec<StringRecord>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(schema.delimiter)
        .trim(csv::Trim::All)
        .from_reader(data);

    let index = ColumnIndex::new(table, reader.headers()?, schema)?;
    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

    Ok((index, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_by_name() {
        let data = "A,TOMO_BIRADS_YR0,B,Subject_DE\n1,4,2,1001\n";
        let (index, rows) = read_table("global", data.as_bytes(), &TableSchema::default()).unwrap();

        assert_eq!(index.position(TOMO_BIRADS).unwrap(), 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(index.subject(&rows[0]), "1001");
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let data = "A,B,Subject_DE\n1,2,1001\n";
        let (index, _) = read_table("global", data.as_bytes(), &TableSchema::default()).unwrap();

        let err = index.position(MRI_BIRADS).unwrap_err();
        assert!(matches!(
            err,
            TruthError::Schema { ref table, ref column } if table == "global" && column == MRI_BIRADS
        ));
    }

    #[test]
    fn test_named_subject_column() {
        let schema = TableSchema::default().with_subject_column("ID");
        let data = "ID,X\n1001,foo\n";
        let (index, rows) = read_table("global", data.as_bytes(), &schema).unwrap();
        assert_eq!(index.subject(&rows[0]), "1001");

        let err = read_table("global", b"X,Y\n1,2\n", &schema).unwrap_err();
        assert!(matches!(err, TruthError::Schema { .. }));
    }

    #[test]
    fn test_quoted_fields_and_delimiter() {
        let schema = TableSchema::default().with_delimiter(b';');
        let data = "OUTCOME;Subject_DE\n\"Benign; fibroadenoma\";1001\n";
        let (index, rows) = read_table("dbt", data.as_bytes(), &schema).unwrap();

        let outcome = index.position("OUTCOME").unwrap();
        assert_eq!(rows[0].get(outcome), Some("Benign; fibroadenoma"));
        assert_eq!(index.subject(&rows[0]), "1001");
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let data = b"TOMO_LESIONBREAST_YR0,TOMO_LESIONOUTCOME_YR0,Subject_DE\n1,DCIS,1001\n2,1001\n";
        let err = read_table("dbt-outcomes", data, &TableSchema::default()).unwrap_err();
        assert!(matches!(err, TruthError::Csv(_)));
    }

    #[test]
    fn test_invalid_utf8_is_csv_error() {
        let data = b"OUTCOME,Subject_DE\n\xff\xfe,1001\n";
        let err = read_table("dbt-outcomes", data, &TableSchema::default()).unwrap_err();
        assert!(matches!(err, TruthError::Csv(_)));
    }
}
