use thiserror::Error;

/// Any failure while turning spreadsheet text into apartment records.
/// Row numbers are 1-based spreadsheet rows, so the first data row is row 2.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("CSV must have a header and at least one data row.")]
    MissingRows,

    #[error("Missing required column in CSV: {column}")]
    MissingColumn { column: String },

    #[error("Row {row}: 'Apt #' cannot be empty.")]
    EmptyApartmentNumber { row: usize },

    #[error("Row {row}: Invalid 'Type' value \"{value}\".")]
    InvalidType { row: usize, value: String },

    #[error("Row {row}: Invalid 'Status' value \"{value}\".")]
    InvalidStatus { row: usize, value: String },

    #[error("Row {row}: Invalid number \"{value}\" in '{column}'.")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row}: could not be read ({message}).")]
    Unreadable { row: usize, message: String },
}

impl FormatError {
    /// Spreadsheet row the error refers to, when it refers to one.
    pub fn row(&self) -> Option<usize> {
        match self {
            FormatError::EmptyApartmentNumber { row }
            | FormatError::InvalidType { row, .. }
            | FormatError::InvalidStatus { row, .. }
            | FormatError::InvalidNumber { row, .. }
            | FormatError::Unreadable { row, .. } => Some(*row),
            FormatError::MissingRows | FormatError::MissingColumn { .. } => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Upload contained no apartment rows")]
    EmptyBatch,

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("Apartment {apartment_id} not found in branch {branch_id}")]
    ApartmentNotFound {
        branch_id: String,
        apartment_id: String,
    },

    #[error("Portfolio configuration has no branches")]
    NoBranches,

    #[error("Duplicate branch id in configuration: {0}")]
    DuplicateBranch(String),

    #[error("Duplicate apartment {apartment_id} in branch {branch_id}")]
    DuplicateApartment {
        branch_id: String,
        apartment_id: String,
    },

    #[error("Invalid share percentage {0}: must be between 0.0 and 1.0")]
    InvalidSharePercentage(f64),

    #[error("Invalid revenue target for {branch_id}: min ({min}) > max ({max})")]
    InvalidRevenueRange { branch_id: String, min: f64, max: f64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
