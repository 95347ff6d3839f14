use crate::error::{PortfolioError, Result};
use crate::schema::{ApartmentRecord, Branch};
use log::{debug, warn};
use std::collections::HashSet;

/// Unit-number prefix to branch id. Checked in order against the first record.
pub const BRANCH_PREFIXES: [(&str, &str); 2] = [("52", "mathwaa-52"), ("53", "mathwaa-53")];

/// Picks the branch a freshly parsed batch belongs to.
///
/// Only the first record's id is inspected. Ids starting with a known prefix
/// route to that branch; anything else (including an empty batch) falls back
/// to the first configured branch. Returns `None` only if there are no branches.
pub fn target_branch<'a>(records: &[ApartmentRecord], branches: &'a [Branch]) -> Option<&'a str> {
    let first_id = records.first().map(|r| r.id.as_str()).unwrap_or("");

    let routed = BRANCH_PREFIXES
        .iter()
        .find(|(prefix, _)| first_id.starts_with(prefix))
        .and_then(|(_, branch_id)| branches.iter().find(|b| b.id == *branch_id));

    match routed {
        Some(branch) => {
            debug!("Unit {} routes to branch {}", first_id, branch.id);
            Some(branch.id.as_str())
        }
        None => {
            let fallback = branches.first()?;
            warn!(
                "No branch prefix matches unit '{}', falling back to {}",
                first_id, fallback.id
            );
            Some(fallback.id.as_str())
        }
    }
}

/// Discards the branch's whole apartment list and installs `records` in order.
pub fn replace_apartments(
    branches: &mut [Branch],
    branch_id: &str,
    records: Vec<ApartmentRecord>,
) -> Result<()> {
    let branch = branches
        .iter_mut()
        .find(|b| b.id == branch_id)
        .ok_or_else(|| PortfolioError::BranchNotFound(branch_id.to_string()))?;

    debug!(
        "Replacing {} apartments in {} with {}",
        branch.apartments.len(),
        branch.id,
        records.len()
    );
    branch.apartments = records;
    Ok(())
}

/// Collapses records sharing an id, keeping the last occurrence at the
/// position it had. Returns the number of records dropped.
pub fn dedup_keep_last(records: &mut Vec<ApartmentRecord>) -> usize {
    let before = records.len();
    let mut seen = HashSet::new();

    records.reverse();
    records.retain(|r| seen.insert(r.id.clone()));
    records.reverse();

    let dropped = before - records.len();
    if dropped > 0 {
        warn!("Collapsed {} duplicate apartment rows (last row wins)", dropped);
    }
    dropped
}
