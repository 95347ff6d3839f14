use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum UnitType {
    #[schemars(description = "Single open-plan unit")]
    Studio,

    #[schemars(description = "Unit with one separate bedroom")]
    OneBedroom,

    #[schemars(description = "Unit with two separate bedrooms")]
    TwoBedroom,
}

impl UnitType {
    pub const ALL: [UnitType; 3] = [UnitType::Studio, UnitType::OneBedroom, UnitType::TwoBedroom];

    /// Display name as it appears in spreadsheet exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Studio => "Studio",
            UnitType::OneBedroom => "One Bedroom",
            UnitType::TwoBedroom => "Two Bedroom",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApartmentStatus {
    #[schemars(description = "Unit is under an active lease")]
    Rented,

    #[schemars(description = "Unit is available")]
    Vacant,

    #[schemars(description = "Unit is held for a tenant but the lease has not started")]
    Reserved,
}

impl ApartmentStatus {
    pub const ALL: [ApartmentStatus; 3] = [
        ApartmentStatus::Rented,
        ApartmentStatus::Vacant,
        ApartmentStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApartmentStatus::Rented => "RENTED",
            ApartmentStatus::Vacant => "VACANT",
            ApartmentStatus::Reserved => "RESERVED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentRecord {
    #[schemars(description = "Unit identifier, always equal to `number` (e.g. '52-07')")]
    pub id: String,

    #[schemars(description = "Unit number in '<branch prefix>-<two digit unit>' form")]
    pub number: String,

    pub unit_type: UnitType,

    pub status: ApartmentStatus,

    #[schemars(description = "Monthly rent in SAR. Non-negative.")]
    pub monthly_rent: f64,

    #[schemars(description = "Length of the current contract in months. 0 only for units that are not rented.")]
    pub contract_duration_months: u32,

    #[schemars(description = "Cumulative cash received for the current contract")]
    pub cash_collected: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Free-text answer to 'how did you hear about us'")]
    pub how_heard: Option<String>,

    #[serde(default)]
    #[schemars(description = "Total contracted value of the current lease (rent x duration)")]
    pub lifetime_value: f64,
}

impl ApartmentRecord {
    pub fn is_rented(&self) -> bool {
        self.status == ApartmentStatus::Rented
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RevenueRange {
    pub min: f64,
    pub max: f64,
}

impl RevenueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl std::ops::Add for RevenueRange {
    type Output = RevenueRange;

    fn add(self, rhs: Self) -> Self::Output {
        RevenueRange {
            min: self.min + rhs.min,
            max: self.max + rhs.max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub apartments: Vec<ApartmentRecord>,
    pub target_yearly_revenue: RevenueRange,
}

impl Branch {
    pub fn find_apartment_mut(&mut self, apartment_id: &str) -> Option<&mut ApartmentRecord> {
        self.apartments.iter_mut().find(|a| a.id == apartment_id)
    }
}

/// A completed booking form. Not wire-serialized by the dashboard, but kept
/// serde-friendly so callers can log or replay it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub branch_id: String,
    pub apartment_id: String,
    pub contract_duration_months: u32,
    pub how_heard: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BranchConfig {
    #[schemars(description = "Stable branch identifier, e.g. 'mathwaa-52'")]
    pub id: String,

    #[schemars(description = "Display name, e.g. 'Mathwaa 52 - Al Murooj'")]
    pub name: String,

    #[schemars(description = "Yearly revenue target range in SAR. Never touched by ingestion.")]
    pub target_yearly_revenue: RevenueRange,

    #[serde(default)]
    #[schemars(description = "Initial apartment inventory for the branch")]
    pub apartments: Vec<ApartmentRecord>,
}

impl From<BranchConfig> for Branch {
    fn from(config: BranchConfig) -> Self {
        Branch {
            id: config.id,
            name: config.name,
            apartments: config.apartments,
            target_yearly_revenue: config.target_yearly_revenue,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PortfolioConfig {
    #[schemars(
        description = "Management company's share of revenue, between 0.0 and 1.0. The owner receives the remainder."
    )]
    pub share_percentage: f64,

    #[schemars(description = "Branches in display order. The first branch is the ingestion fallback.")]
    pub branches: Vec<BranchConfig>,
}

impl PortfolioConfig {
    pub fn from_json_str(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PortfolioConfig)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ApartmentRecord {
        ApartmentRecord {
            id: "52-01".to_string(),
            number: "52-01".to_string(),
            unit_type: UnitType::Studio,
            status: ApartmentStatus::Rented,
            monthly_rent: 2400.0,
            contract_duration_months: 12,
            cash_collected: 2400.0,
            how_heard: Some("Bayut".to_string()),
            lifetime_value: 28800.0,
        }
    }

    #[test]
    fn test_schema_generation() {
        let schema_json = PortfolioConfig::schema_as_json().unwrap();
        assert!(schema_json.contains("share_percentage"));
        assert!(schema_json.contains("target_yearly_revenue"));
        assert!(schema_json.contains("contractDurationMonths"));
    }

    #[test]
    fn test_record_serialization() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert!(json.contains("\"unitType\":\"Studio\""));
        assert!(json.contains("\"status\":\"RENTED\""));
        assert!(json.contains("\"howHeard\":\"Bayut\""));

        let mut vacant = sample_record();
        vacant.how_heard = None;
        let json = serde_json::to_string(&vacant).unwrap();
        assert!(!json.contains("howHeard"));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "share_percentage": 0.2,
            "branches": [
                {
                    "id": "mathwaa-52",
                    "name": "Mathwaa 52",
                    "target_yearly_revenue": { "min": 819000, "max": 936000 }
                }
            ]
        }"#;

        let config = PortfolioConfig::from_json_str(json).unwrap();
        assert_eq!(config.branches.len(), 1);
        assert!(config.branches[0].apartments.is_empty());
        assert_eq!(config.branches[0].target_yearly_revenue.max, 936000.0);
    }

    #[test]
    fn test_revenue_range_sum() {
        let total = RevenueRange::new(819000.0, 936000.0) + RevenueRange::new(907200.0, 1036800.0);
        assert_eq!(total, RevenueRange::new(1726200.0, 1972800.0));
    }
}
