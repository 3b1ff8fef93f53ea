use thiserror::Error;

/// Schema-level load failures.  Any of these aborts the whole load.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Column '{column}' has unsupported type {found}")]
    UnsupportedColumnType { column: &'static str, found: String },

    #[error("Row {row} is not a JSON object")]
    NotAnObject { row: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = DataError::MissingColumn("Tanggal");
        assert_eq!(err.to_string(), "Missing required column 'Tanggal'");
    }

    #[test]
    fn test_unsupported_extension_display() {
        let err = DataError::UnsupportedExtension("xlsx".into());
        assert_eq!(err.to_string(), "Unsupported file extension: .xlsx");
    }
}
