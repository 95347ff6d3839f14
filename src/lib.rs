//! # Mathwaa Portfolio
//!
//! Apartment inventory ingestion and reporting for a small rental portfolio
//! (two Al Murooj buildings, 32 units each).
//!
//! ## Core Concepts
//!
//! - **Spreadsheet ingestion**: comma-separated exports are parsed into validated
//!   [`ApartmentRecord`]s. Columns are found by header prefix, and missing rent or
//!   duration is inferred from the lease's lifetime value.
//! - **Wholesale replace**: an upload is routed to a branch by its first unit
//!   number and replaces that branch's apartments entirely. It never merges.
//! - **Bookings**: a booking rents exactly one unit and records one month's rent
//!   as collected.
//! - **Reporting**: occupancy, cash, lifetime value, revenue share and marketing
//!   attribution are recomputed from the current state on every call.
//!
//! ## Example
//!
//! ```rust
//! use mathwaa_portfolio::*;
//!
//! let mut portfolio = Portfolio::default();
//!
//! let upload = "Apt #,Type,Status,Cash Collected,Lifetime Value,Booking Source\n\
//!               52-05,2br,Rented,3000,36000,Facebook Ad";
//! let outcome = portfolio.ingest_spreadsheet(upload).unwrap();
//! assert_eq!(outcome.branch_id, "mathwaa-52");
//!
//! let report = portfolio.report();
//! assert_eq!(report.sources.count(AttributionCategory::PaidSocialAdvertising), 1);
//! ```

pub mod booking;
pub mod classifier;
pub mod error;
pub mod locale;
pub mod parser;
pub mod portfolio;
pub mod reconciler;
pub mod reporting;
pub mod schema;
pub mod seed;
pub mod utils;

pub use booking::{apply_booking, apply_booking_in_place};
pub use classifier::{classify, AttributionCategory};
pub use error::{FormatError, PortfolioError, Result};
pub use locale::Locale;
pub use parser::{parse, parse_with_options, Column, HeaderMap, NumericPolicy, ParseOptions};
pub use portfolio::{IngestOutcome, Portfolio};
pub use reconciler::{dedup_keep_last, replace_apartments, target_branch};
pub use reporting::*;
pub use schema::*;

use log::info;

/// Parses `text` and replaces the matching branch in a snapshot of `branches`,
/// returning the target branch id and the new snapshot. The input is not modified.
pub fn reconcile_spreadsheet(branches: &[Branch], text: &str) -> Result<(String, Vec<Branch>)> {
    let records = parse(text)?;

    let branch_id = target_branch(&records, branches)
        .ok_or(PortfolioError::NoBranches)?
        .to_string();

    let mut updated = branches.to_vec();
    info!("Replacing {} with {} parsed apartments", branch_id, records.len());
    replace_apartments(&mut updated, &branch_id, records)?;

    Ok((branch_id, updated))
}
