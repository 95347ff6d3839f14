//! Spreadsheet ingestion: comma-separated export text in, validated
//! [`ApartmentRecord`]s out.
//!
//! Columns are located by case-insensitive header prefix, so exports that
//! append units or notes to their headers ("Monthly Rent (SAR)",
//! "Estimated Duration (months)") still line up. Quoting is off, so every
//! comma is a cell boundary, and rows may be shorter than the header.
//!
//! Monthly rent and duration may be missing from the export. When they are,
//! they are inferred from the lease's lifetime value:
//!
//! - no usable duration and a recorded lifetime value gives a 1 month contract
//! - no monthly rent gives `lifetime value / duration`, rounded to cents

use crate::error::FormatError;
use crate::schema::{ApartmentRecord, ApartmentStatus, UnitType};
use crate::utils::{leading_digits, parse_amount_lenient, parse_amount_strict, round_to_cents};
use csv::StringRecord;
use log::debug;
use std::collections::HashMap;

/// Logical columns of an apartment export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    AptNumber,
    Type,
    Status,
    MonthlyRent,
    CashCollected,
    Duration,
    LifetimeValue,
    Source,
}

impl Column {
    /// In the order header cells are tested against them.
    pub const ALL: [Column; 8] = [
        Column::AptNumber,
        Column::Type,
        Column::Status,
        Column::MonthlyRent,
        Column::CashCollected,
        Column::Duration,
        Column::LifetimeValue,
        Column::Source,
    ];

    /// Lowercase prefix a header cell must start with.
    pub fn header_prefix(&self) -> &'static str {
        match self {
            Column::AptNumber => "apt",
            Column::Type => "type",
            Column::Status => "status",
            Column::MonthlyRent => "monthly rent",
            Column::CashCollected => "cash collected",
            Column::Duration => "estimated",
            Column::LifetimeValue => "lifetime",
            Column::Source => "booking source",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::AptNumber => "Apt #",
            Column::Type => "Type",
            Column::Status => "Status",
            Column::MonthlyRent => "Monthly Rent",
            Column::CashCollected => "Cash Collected",
            Column::Duration => "Duration",
            Column::LifetimeValue => "Lifetime Value",
            Column::Source => "Source",
        }
    }

    /// Monthly rent and duration can be inferred; everything else must be present.
    pub fn is_required(&self) -> bool {
        !matches!(self, Column::MonthlyRent | Column::Duration)
    }

    fn for_header(cell: &str) -> Option<Column> {
        let lowered = cell.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|column| lowered.starts_with(column.header_prefix()))
    }
}

/// How numeric cells that are not clean numbers are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// Strip everything but digits and '.', unreadable becomes 0.
    #[default]
    Lenient,
    /// Reject non-blank cells that are not plain (optionally SAR-prefixed,
    /// comma-grouped) amounts.
    Strict,
}

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub numeric_policy: NumericPolicy,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            numeric_policy: NumericPolicy::Strict,
        }
    }
}

/// Header cell positions for each logical column found in the header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMap {
    indices: HashMap<Column, usize>,
}

impl HeaderMap {
    pub fn from_header_line(line: &str) -> Self {
        match records(line).next() {
            Some(Ok(record)) => Self::from_record(&record),
            _ => Self::default(),
        }
    }

    pub fn from_record(record: &StringRecord) -> Self {
        let mut indices = HashMap::new();

        for (idx, raw) in record.iter().enumerate() {
            let cell = clean_header_cell(raw);
            if let Some(column) = Column::for_header(cell) {
                // First matching cell keeps the column
                indices.entry(column).or_insert(idx);
            }
        }

        debug!("Resolved spreadsheet header: {:?}", indices);
        Self { indices }
    }

    pub fn index_of(&self, column: Column) -> Option<usize> {
        self.indices.get(&column).copied()
    }

    pub fn contains(&self, column: Column) -> bool {
        self.indices.contains_key(&column)
    }

    /// Fails on the first required column (in header-prefix order) that is missing.
    pub fn ensure_required(&self) -> Result<(), FormatError> {
        match Column::ALL
            .into_iter()
            .find(|c| c.is_required() && !self.contains(*c))
        {
            Some(missing) => Err(FormatError::MissingColumn {
                column: missing.label().to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn clean_header_cell(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches('\u{feff}')
        .trim_matches('"')
        .trim()
}

/// Comma-separated records with quoting off and ragged rows allowed.
fn records(text: &str) -> csv::StringRecordsIntoIter<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(text.as_bytes())
        .into_records()
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|cell| cell.trim().is_empty())
}

/// One data record with its spreadsheet row number.
struct Row<'a> {
    number: usize,
    cells: StringRecord,
    headers: &'a HeaderMap,
}

impl<'a> Row<'a> {
    /// `None` when the column is not in the header or the row is too short.
    fn cell(&self, column: Column) -> Option<&str> {
        self.headers
            .index_of(column)
            .and_then(|idx| self.cells.get(idx))
    }

    fn trimmed(&self, column: Column) -> &str {
        self.cell(column).unwrap_or("").trim()
    }

    fn amount(&self, column: Column, default: &str, policy: NumericPolicy) -> Result<f64, FormatError> {
        let raw = match self.cell(column) {
            Some(cell) if !cell.is_empty() => cell,
            _ => default,
        };

        match policy {
            NumericPolicy::Lenient => Ok(parse_amount_lenient(raw)),
            NumericPolicy::Strict => {
                parse_amount_strict(raw).ok_or_else(|| FormatError::InvalidNumber {
                    row: self.number,
                    column: column.label().to_string(),
                    value: raw.trim().to_string(),
                })
            }
        }
    }
}

pub fn parse(text: &str) -> Result<Vec<ApartmentRecord>, FormatError> {
    parse_with_options(text, &ParseOptions::default())
}

pub fn parse_with_options(
    text: &str,
    options: &ParseOptions,
) -> Result<Vec<ApartmentRecord>, FormatError> {
    let mut lines = Vec::new();
    for (index, result) in records(text.trim()).enumerate() {
        let record = result.map_err(|err| FormatError::Unreadable {
            row: index + 1,
            message: err.to_string(),
        })?;
        if !is_blank(&record) {
            lines.push(record);
        }
    }

    if lines.len() < 2 {
        return Err(FormatError::MissingRows);
    }

    let mut lines = lines.into_iter();
    let headers = lines
        .next()
        .map(|record| HeaderMap::from_record(&record))
        .unwrap_or_default();
    headers.ensure_required()?;

    lines
        .enumerate()
        .map(|(index, cells)| {
            let row = Row {
                number: index + 2,
                cells,
                headers: &headers,
            };
            decode_row(&row, options.numeric_policy)
        })
        .collect()
}

fn decode_row(row: &Row<'_>, policy: NumericPolicy) -> Result<ApartmentRecord, FormatError> {
    let number = row.trimmed(Column::AptNumber);
    if number.is_empty() {
        return Err(FormatError::EmptyApartmentNumber { row: row.number });
    }

    let unit_type = parse_unit_type(row.trimmed(Column::Type)).ok_or_else(|| {
        FormatError::InvalidType {
            row: row.number,
            value: row.trimmed(Column::Type).to_string(),
        }
    })?;

    let status = parse_status(row.trimmed(Column::Status)).ok_or_else(|| {
        FormatError::InvalidStatus {
            row: row.number,
            value: row.trimmed(Column::Status).to_string(),
        }
    })?;

    let lifetime_value = row.amount(Column::LifetimeValue, "0", policy)?;

    let duration_cell = row.cell(Column::Duration).unwrap_or("0").trim();
    let mut contract_duration_months = leading_digits(duration_cell).unwrap_or(1);
    if contract_duration_months == 0 && lifetime_value > 0.0 {
        debug!(
            "Row {}: duration 0 with lifetime value {}, using 1 month",
            row.number, lifetime_value
        );
        contract_duration_months = 1;
    }

    let mut monthly_rent = row.amount(Column::MonthlyRent, "", policy)?;
    if monthly_rent == 0.0 && lifetime_value > 0.0 && contract_duration_months > 0 {
        monthly_rent = round_to_cents(lifetime_value / contract_duration_months as f64);
        debug!(
            "Row {}: derived monthly rent {} from lifetime value over {} months",
            row.number, monthly_rent, contract_duration_months
        );
    }

    let cash_collected = row.amount(Column::CashCollected, "0", policy)?;

    let how_heard = Some(row.trimmed(Column::Source))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(ApartmentRecord {
        id: number.to_string(),
        number: number.to_string(),
        unit_type,
        status,
        monthly_rent,
        contract_duration_months,
        cash_collected,
        how_heard,
        lifetime_value,
    })
}

/// Accepts the abbreviations `1br`, `2br`, `st` or a full type name, any case.
pub fn parse_unit_type(cell: &str) -> Option<UnitType> {
    let lowered = cell.to_lowercase();
    match lowered.as_str() {
        "1br" => Some(UnitType::OneBedroom),
        "2br" => Some(UnitType::TwoBedroom),
        "st" => Some(UnitType::Studio),
        _ => UnitType::ALL
            .into_iter()
            .find(|t| t.as_str().to_lowercase() == lowered),
    }
}

/// Prefix match on the uppercased cell, so "RENTED - ACTIVE" is rented.
pub fn parse_status(cell: &str) -> Option<ApartmentStatus> {
    let upper = cell.to_uppercase();
    ApartmentStatus::ALL
        .into_iter()
        .find(|s| upper.starts_with(s.as_str()))
}
