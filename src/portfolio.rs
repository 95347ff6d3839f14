use crate::booking::apply_booking_in_place;
use crate::error::{PortfolioError, Result};
use crate::locale::{upload_success_message, Locale};
use crate::parser::{parse_with_options, ParseOptions};
use crate::reconciler::{dedup_keep_last, replace_apartments, target_branch};
use crate::reporting::PortfolioReport;
use crate::schema::{ApartmentRecord, BookingRequest, Branch, PortfolioConfig};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;

/// Result of a successful spreadsheet upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestOutcome {
    pub branch_id: String,
    pub apartment_count: usize,
    pub duplicates_collapsed: usize,
}

impl IngestOutcome {
    pub fn message(&self, locale: Locale) -> &'static str {
        upload_success_message(locale)
    }
}

/// Owns every branch and its apartments. All mutations go through here and
/// either apply completely or leave the state as it was.
#[derive(Debug, Clone)]
pub struct Portfolio {
    branches: Vec<Branch>,
    share_percentage: f64,
    parse_options: ParseOptions,
    revision: u64,
}

impl Portfolio {
    pub fn from_config(config: PortfolioConfig) -> Result<Self> {
        validate_config(&config)?;

        info!(
            "Loaded portfolio with {} branches and {} apartments",
            config.branches.len(),
            config.branches.iter().map(|b| b.apartments.len()).sum::<usize>()
        );

        Ok(Self {
            branches: config.branches.into_iter().map(Branch::from).collect(),
            share_percentage: config.share_percentage,
            parse_options: ParseOptions::default(),
            revision: 0,
        })
    }

    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn branch(&self, branch_id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == branch_id)
    }

    pub fn share_percentage(&self) -> f64 {
        self.share_percentage
    }

    /// Bumped on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Parses an uploaded spreadsheet and replaces the matching branch's
    /// apartments with it. Nothing changes unless every row is valid.
    pub fn ingest_spreadsheet(&mut self, text: &str) -> Result<IngestOutcome> {
        let records = parse_with_options(text, &self.parse_options)?;
        self.ingest_records(records)
    }

    pub fn ingest_records(&mut self, mut records: Vec<ApartmentRecord>) -> Result<IngestOutcome> {
        if records.is_empty() {
            return Err(PortfolioError::EmptyBatch);
        }

        // Route on the first row as uploaded, before duplicates move anything
        let branch_id = target_branch(&records, &self.branches)
            .ok_or(PortfolioError::NoBranches)?
            .to_string();

        let duplicates_collapsed = dedup_keep_last(&mut records);
        let apartment_count = records.len();

        self.replace_apartments(&branch_id, records)?;

        info!(
            "Ingested {} apartments into {}",
            apartment_count, branch_id
        );
        Ok(IngestOutcome {
            branch_id,
            apartment_count,
            duplicates_collapsed,
        })
    }

    pub fn replace_apartments(&mut self, branch_id: &str, records: Vec<ApartmentRecord>) -> Result<()> {
        replace_apartments(&mut self.branches, branch_id, records)?;
        self.revision += 1;
        Ok(())
    }

    pub fn apply_booking(&mut self, booking: &BookingRequest) -> Result<()> {
        apply_booking_in_place(&mut self.branches, booking)?;
        self.revision += 1;
        Ok(())
    }

    pub fn report(&self) -> PortfolioReport {
        debug!("Building report at revision {}", self.revision);
        PortfolioReport::build(&self.branches, self.share_percentage)
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        let config = PortfolioConfig::default();
        Self {
            branches: config.branches.into_iter().map(Branch::from).collect(),
            share_percentage: config.share_percentage,
            parse_options: ParseOptions::default(),
            revision: 0,
        }
    }
}

fn validate_config(config: &PortfolioConfig) -> Result<()> {
    if config.branches.is_empty() {
        return Err(PortfolioError::NoBranches);
    }

    if !(0.0..=1.0).contains(&config.share_percentage) {
        return Err(PortfolioError::InvalidSharePercentage(config.share_percentage));
    }

    let mut ids = HashSet::new();
    for branch in &config.branches {
        if !ids.insert(branch.id.as_str()) {
            return Err(PortfolioError::DuplicateBranch(branch.id.clone()));
        }

        let mut apartment_ids = HashSet::new();
        for apartment in &branch.apartments {
            if !apartment_ids.insert(apartment.id.as_str()) {
                return Err(PortfolioError::DuplicateApartment {
                    branch_id: branch.id.clone(),
                    apartment_id: apartment.id.clone(),
                });
            }
        }

        let target = branch.target_yearly_revenue;
        if target.min > target.max {
            return Err(PortfolioError::InvalidRevenueRange {
                branch_id: branch.id.clone(),
                min: target.min,
                max: target.max,
            });
        }
    }

    Ok(())
}
