//! Dashboard figures derived from the current branches. Everything here is
//! recomputed on demand; nothing is cached.

use crate::classifier::{classify, AttributionCategory};
use crate::schema::{ApartmentRecord, Branch, RevenueRange};
use crate::utils::percentage;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub rented: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent, 0 for an empty set.
    pub percentage: u32,
}

impl Occupancy {
    pub fn of<'a>(apartments: impl IntoIterator<Item = &'a ApartmentRecord>) -> Self {
        let (rented, total) = apartments
            .into_iter()
            .fold((0, 0), |(rented, total), apt| {
                (rented + usize::from(apt.is_rented()), total + 1)
            });

        Self {
            rented,
            total,
            percentage: percentage(rented, total),
        }
    }
}

pub fn branch_occupancy(branch: &Branch) -> Occupancy {
    Occupancy::of(&branch.apartments)
}

pub fn portfolio_occupancy(branches: &[Branch]) -> Occupancy {
    Occupancy::of(branches.iter().flat_map(|b| &b.apartments))
}

pub fn branch_cash_collected(branch: &Branch) -> f64 {
    branch.apartments.iter().map(|a| a.cash_collected).sum()
}

pub fn total_cash_collected(branches: &[Branch]) -> f64 {
    branches.iter().map(branch_cash_collected).sum()
}

pub fn total_lifetime_value(branches: &[Branch]) -> f64 {
    branches
        .iter()
        .flat_map(|b| &b.apartments)
        .map(|a| a.lifetime_value)
        .sum()
}

pub fn total_target_revenue(branches: &[Branch]) -> RevenueRange {
    branches
        .iter()
        .map(|b| b.target_yearly_revenue)
        .fold(RevenueRange::new(0.0, 0.0), |acc, r| acc + r)
}

/// Split of an amount between the management company and the owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShareSplit {
    pub management: f64,
    pub owner: f64,
}

impl ShareSplit {
    pub fn of(total: f64, share_percentage: f64) -> Self {
        Self {
            management: total * share_percentage,
            owner: total * (1.0 - share_percentage),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTargetSplit {
    pub management: RevenueRange,
    pub owner: RevenueRange,
}

/// Monthly target revenue for a branch, split by share.
pub fn monthly_target_split(branch: &Branch, share_percentage: f64) -> MonthlyTargetSplit {
    let min = ShareSplit::of(branch.target_yearly_revenue.min / 12.0, share_percentage);
    let max = ShareSplit::of(branch.target_yearly_revenue.max / 12.0, share_percentage);

    MonthlyTargetSplit {
        management: RevenueRange::new(min.management, max.management),
        owner: RevenueRange::new(min.owner, max.owner),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceCount {
    pub category: AttributionCategory,
    pub label: &'static str,
    pub count: usize,
}

/// Rented units with a recorded source, counted per attribution category.
/// Categories appear in the order they are first seen; empty ones are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceBreakdown {
    pub entries: Vec<SourceCount>,
}

impl SourceBreakdown {
    pub fn from_apartments<'a>(apartments: impl IntoIterator<Item = &'a ApartmentRecord>) -> Self {
        let mut breakdown = Self::default();

        for source in apartments
            .into_iter()
            .filter(|a| a.is_rented())
            .filter_map(|a| a.how_heard.as_deref())
            .filter(|s| !s.is_empty())
        {
            breakdown.increment(classify(source));
        }

        breakdown
    }

    fn increment(&mut self, category: AttributionCategory) {
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(SourceCount {
                category,
                label: category.label(),
                count: 1,
            }),
        }
    }

    pub fn count(&self, category: AttributionCategory) -> usize {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

pub fn source_breakdown(branches: &[Branch]) -> SourceBreakdown {
    SourceBreakdown::from_apartments(branches.iter().flat_map(|b| &b.apartments))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchSummary {
    pub branch_id: String,
    pub name: String,
    pub occupancy: Occupancy,
    pub cash_collected: f64,
    pub target_revenue_max: f64,
    pub monthly_target: MonthlyTargetSplit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    pub branches: Vec<BranchSummary>,
    pub portfolio_occupancy: Occupancy,
    pub total_target_revenue: RevenueRange,
    pub total_cash_collected: f64,
    pub total_lifetime_value: f64,
    pub lifetime_value_split: ShareSplit,
    pub sources: SourceBreakdown,
}

impl PortfolioReport {
    pub fn build(branches: &[Branch], share_percentage: f64) -> Self {
        let summaries = branches
            .iter()
            .map(|branch| BranchSummary {
                branch_id: branch.id.clone(),
                name: branch.name.clone(),
                occupancy: branch_occupancy(branch),
                cash_collected: branch_cash_collected(branch),
                target_revenue_max: branch.target_yearly_revenue.max,
                monthly_target: monthly_target_split(branch, share_percentage),
            })
            .collect();

        let total_lifetime_value = total_lifetime_value(branches);

        Self {
            branches: summaries,
            portfolio_occupancy: portfolio_occupancy(branches),
            total_target_revenue: total_target_revenue(branches),
            total_cash_collected: total_cash_collected(branches),
            total_lifetime_value,
            lifetime_value_split: ShareSplit::of(total_lifetime_value, share_percentage),
            sources: source_breakdown(branches),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ApartmentStatus, UnitType};

    fn unit(id: &str, status: ApartmentStatus, cash: f64, ltv: f64, source: Option<&str>) -> ApartmentRecord {
        ApartmentRecord {
            id: id.to_string(),
            number: id.to_string(),
            unit_type: UnitType::Studio,
            status,
            monthly_rent: 2000.0,
            contract_duration_months: 12,
            cash_collected: cash,
            how_heard: source.map(str::to_string),
            lifetime_value: ltv,
        }
    }

    fn branch(id: &str, apartments: Vec<ApartmentRecord>, target: RevenueRange) -> Branch {
        Branch {
            id: id.to_string(),
            name: id.to_string(),
            apartments,
            target_yearly_revenue: target,
        }
    }

    fn sample() -> Vec<Branch> {
        vec![
            branch(
                "mathwaa-52",
                vec![
                    unit("52-01", ApartmentStatus::Rented, 2400.0, 28800.0, Some("Bayut")),
                    unit("52-02", ApartmentStatus::Rented, 2200.0, 26400.0, Some("Social Media Campaign")),
                    unit("52-03", ApartmentStatus::Vacant, 0.0, 0.0, None),
                ],
                RevenueRange::new(819000.0, 936000.0),
            ),
            branch(
                "mathwaa-53",
                vec![
                    unit("53-01", ApartmentStatus::Rented, 2640.0, 31680.0, Some("Word of Mouth")),
                    unit("53-02", ApartmentStatus::Rented, 2200.0, 26400.0, Some("Instagram")),
                    unit("53-03", ApartmentStatus::Reserved, 0.0, 0.0, Some("Bayut")),
                    unit("53-04", ApartmentStatus::Rented, 2860.0, 8580.0, None),
                ],
                RevenueRange::new(907200.0, 1036800.0),
            ),
        ]
    }

    #[test]
    fn test_branch_occupancy() {
        let branches = sample();
        assert_eq!(
            branch_occupancy(&branches[0]),
            Occupancy { rented: 2, total: 3, percentage: 67 }
        );
        assert_eq!(
            branch_occupancy(&branches[1]),
            Occupancy { rented: 3, total: 4, percentage: 75 }
        );
    }

    #[test]
    fn test_empty_branch_occupancy_is_zero() {
        let empty = branch("empty", vec![], RevenueRange::new(0.0, 0.0));
        assert_eq!(branch_occupancy(&empty).percentage, 0);
        assert_eq!(portfolio_occupancy(&[]).percentage, 0);
    }

    #[test]
    fn test_portfolio_occupancy_pools_units() {
        assert_eq!(
            portfolio_occupancy(&sample()),
            Occupancy { rented: 5, total: 7, percentage: 71 }
        );
    }

    #[test]
    fn test_totals() {
        let branches = sample();
        assert_eq!(total_cash_collected(&branches), 12300.0);
        assert_eq!(total_lifetime_value(&branches), 121860.0);
        assert_eq!(
            total_target_revenue(&branches),
            RevenueRange::new(1726200.0, 1972800.0)
        );
    }

    #[test]
    fn test_share_split() {
        let split = ShareSplit::of(100000.0, 0.2);
        assert!((split.management - 20000.0).abs() < 1e-6);
        assert!((split.owner - 80000.0).abs() < 1e-6);
    }

    #[test]
    fn test_monthly_target_split() {
        let branches = sample();
        let split = monthly_target_split(&branches[0], 0.2);
        assert!((split.management.min - 13650.0).abs() < 1e-6);
        assert!((split.management.max - 15600.0).abs() < 1e-6);
        assert!((split.owner.min - 54600.0).abs() < 1e-6);
        assert!((split.owner.max - 62400.0).abs() < 1e-6);
    }

    #[test]
    fn test_source_breakdown_counts_rented_with_source() {
        let breakdown = source_breakdown(&sample());

        assert_eq!(breakdown.count(AttributionCategory::ListingPlatforms), 1);
        assert_eq!(breakdown.count(AttributionCategory::PaidSocialAdvertising), 2);
        assert_eq!(breakdown.count(AttributionCategory::WordOfMouth), 1);
        assert_eq!(breakdown.count(AttributionCategory::WalkIn), 0);
        assert_eq!(breakdown.total(), 4);

        let order: Vec<_> = breakdown.entries.iter().map(|e| e.category).collect();
        assert_eq!(
            order,
            vec![
                AttributionCategory::ListingPlatforms,
                AttributionCategory::PaidSocialAdvertising,
                AttributionCategory::WordOfMouth,
            ]
        );
    }

    #[test]
    fn test_report_json() {
        let report = PortfolioReport::build(&sample(), 0.2);
        assert_eq!(report.branches.len(), 2);
        assert_eq!(report.branches[1].cash_collected, 7700.0);
        assert!((report.lifetime_value_split.management - 24372.0).abs() < 1e-6);

        let json = report.to_json().unwrap();
        assert!(json.contains("\"portfolio_occupancy\""));
        assert!(json.contains("\"Paid Social Advertising\""));
    }
}
