//! Startup inventory for the two Al Murooj buildings.
//!
//! Each building has 32 units on four floors. Units without a booking are
//! vacant at the floor's list price. Units with bookings fold every booking
//! into one record: cash and lease value are summed, everything else comes
//! from the longest booking.

use crate::schema::{ApartmentRecord, ApartmentStatus, BranchConfig, PortfolioConfig, RevenueRange, UnitType};

pub const DEFAULT_SHARE_PERCENTAGE: f64 = 0.20;
pub const UNITS_PER_BRANCH: u32 = 32;
const UNITS_PER_FLOOR: u32 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct SeedBooking {
    pub number: &'static str,
    pub cash: f64,
    pub duration: u32,
    pub ltv: f64,
    pub source: &'static str,
}

fn booking(
    number: &'static str,
    cash: f64,
    duration: u32,
    ltv: f64,
    source: &'static str,
) -> SeedBooking {
    SeedBooking {
        number,
        cash,
        duration,
        ltv,
        source,
    }
}

#[derive(Debug, Clone)]
pub struct BranchSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub prefix: &'static str,
    pub unit_count: u32,
    /// List price per floor, ground floor first.
    pub floor_prices: [f64; 4],
    /// Rent or cash above this marks a booked unit as one-bedroom.
    pub one_bedroom_threshold: f64,
    pub target_yearly_revenue: RevenueRange,
    pub bookings: Vec<SeedBooking>,
}

impl BranchSeed {
    pub fn unit_number(&self, index: u32) -> String {
        format!("{}-{:02}", self.prefix, index)
    }

    pub fn list_price(&self, index: u32) -> f64 {
        let floor = ((index.saturating_sub(1)) / UNITS_PER_FLOOR).min(3) as usize;
        self.floor_prices[floor]
    }

    pub fn build_apartments(&self) -> Vec<ApartmentRecord> {
        (1..=self.unit_count).map(|i| self.build_unit(i)).collect()
    }

    fn build_unit(&self, index: u32) -> ApartmentRecord {
        let number = self.unit_number(index);
        let list_price = self.list_price(index);
        let entries: Vec<&SeedBooking> = self.bookings.iter().filter(|b| b.number == number).collect();

        // Ties on duration go to the later booking
        let Some(main) = entries.iter().copied().reduce(|prev, cur| {
            if prev.duration > cur.duration {
                prev
            } else {
                cur
            }
        }) else {
            return ApartmentRecord {
                id: number.clone(),
                number,
                unit_type: if index % 4 == 0 {
                    UnitType::OneBedroom
                } else {
                    UnitType::Studio
                },
                status: ApartmentStatus::Vacant,
                monthly_rent: list_price,
                contract_duration_months: 0,
                cash_collected: 0.0,
                how_heard: None,
                lifetime_value: 0.0,
            };
        };

        let derived_rent = if main.duration == 0 {
            0.0
        } else {
            main.ltv / main.duration as f64
        };

        let unit_type = if derived_rent > self.one_bedroom_threshold || main.cash > self.one_bedroom_threshold {
            UnitType::OneBedroom
        } else {
            UnitType::Studio
        };

        ApartmentRecord {
            id: number.clone(),
            number,
            unit_type,
            status: ApartmentStatus::Rented,
            monthly_rent: if derived_rent > 0.0 {
                derived_rent.round()
            } else {
                list_price
            },
            contract_duration_months: main.duration,
            cash_collected: entries.iter().map(|b| b.cash).sum(),
            how_heard: Some(main.source.to_string()),
            lifetime_value: entries.iter().map(|b| b.ltv).sum(),
        }
    }

    pub fn to_config(&self) -> BranchConfig {
        BranchConfig {
            id: self.id.to_string(),
            name: self.name.to_string(),
            target_yearly_revenue: self.target_yearly_revenue,
            apartments: self.build_apartments(),
        }
    }
}

pub fn mathwaa_52() -> BranchSeed {
    BranchSeed {
        id: "mathwaa-52",
        name: "Mathwaa 52 - Al Murooj",
        prefix: "52",
        unit_count: UNITS_PER_BRANCH,
        floor_prices: [2400.0, 2300.0, 2200.0, 2000.0],
        one_bedroom_threshold: 2500.0,
        target_yearly_revenue: RevenueRange::new(819000.0, 936000.0),
        bookings: vec![
            booking("52-11", 2300.0, 12, 2300.0, "Social Media Campaign"),
            booking("52-19", 2200.0, 12, 26400.0, "Bayut"),
            booking("52-30", 2000.0, 12, 24000.0, "Social Media Campaign"),
            booking("52-13", 2900.0, 12, 34800.0, "Aqar"),
            booking("52-28", 2600.0, 12, 31200.0, "Aqar"),
            booking("52-27", 2000.0, 12, 24000.0, "Bayut"),
            booking("52-09", 2300.0, 12, 27600.0, "Social Media Campaign"),
            booking("52-14", 2300.0, 12, 27600.0, "Word of Mouth"),
            booking("52-18", 2400.0, 3, 7200.0, "Bayut"),
            booking("52-32", 2000.0, 12, 24000.0, "Google Maps"),
            booking("52-17", 2200.0, 12, 26400.0, "Word of Mouth"),
            booking("52-26", 2200.0, 12, 26400.0, "Social Media Campaign"),
            booking("52-29", 2600.0, 12, 31200.0, "Social Media Campaign"),
            booking("52-10", 2500.0, 12, 30000.0, "Social Media Campaign"),
            booking("52-22", 2200.0, 3, 6600.0, "Social Media Campaign"),
            booking("52-20", 2200.0, 3, 6600.0, "Social Media Campaign"),
            booking("52-21", 2200.0, 3, 2200.0, "Social Media Campaign"),
            booking("52-24", 2200.0, 12, 26400.0, "Social Media Campaign"),
            booking("52-16", 2300.0, 12, 27600.0, "Social Media Campaign"),
            booking("52-15", 2500.0, 12, 30000.0, "Social Media Campaign"),
            booking("52-25", 2200.0, 12, 26400.0, "Social Media Campaign"),
            booking("52-23", 2400.0, 12, 28800.0, "Aqar"),
            booking("52-31", 2200.0, 12, 26400.0, "Social Media Campaign"),
            booking("52-06", 2400.0, 12, 28800.0, "Aqar"),
            booking("52-08", 2400.0, 1, 2400.0, "Bayut"),
            booking("52-02", 2600.0, 3, 2600.0, "Social Media Campaign"),
            booking("52-03", 2400.0, 1, 2400.0, "Paid Social Advertising"),
            booking("52-07", 2600.0, 12, 31200.0, "Bayut"),
        ],
    }
}

pub fn mathwaa_53() -> BranchSeed {
    BranchSeed {
        id: "mathwaa-53",
        name: "Mathwaa 53 - Al Murooj",
        prefix: "53",
        unit_count: UNITS_PER_BRANCH,
        floor_prices: [2640.0, 2530.0, 2420.0, 2200.0],
        one_bedroom_threshold: 2800.0,
        target_yearly_revenue: RevenueRange::new(907200.0, 1036800.0),
        bookings: vec![
            booking("53-25", 2200.0, 12, 26400.0, "Social Media Campaign"),
            booking("53-13", 2530.0, 12, 30360.0, "Bayut"),
            booking("53-03", 2640.0, 12, 31680.0, "Word of Mouth"),
            booking("53-11", 2530.0, 12, 30360.0, "Social Media Campaign"),
            booking("53-20", 2420.0, 1, 2420.0, "Social Media Campaign"),
            booking("53-27", 2200.0, 12, 26400.0, "Google Maps"),
            booking("53-29", 2200.0, 12, 26400.0, "Social Media Campaign"),
            booking("53-28", 2420.0, 12, 29040.0, "Bayut"),
            booking("53-32", 2200.0, 12, 26400.0, "Bayut"),
            booking("53-26", 2860.0, 3, 8580.0, "Wasalt"),
            booking("53-22", 2420.0, 2, 4840.0, "Social Media Campaign"),
            booking("53-09", 2530.0, 12, 30360.0, "Bayut"),
            booking("53-12", 2750.0, 12, 33000.0, "Social Media Campaign"),
        ],
    }
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        PortfolioConfig {
            share_percentage: DEFAULT_SHARE_PERCENTAGE,
            branches: vec![mathwaa_52().to_config(), mathwaa_53().to_config()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_sizes() {
        let config = PortfolioConfig::default();
        assert_eq!(config.branches.len(), 2);
        for branch in &config.branches {
            assert_eq!(branch.apartments.len(), 32);
        }
        assert_eq!(config.branches[0].apartments[0].id, "52-01");
        assert_eq!(config.branches[1].apartments[31].id, "53-32");
    }

    #[test]
    fn test_rented_counts() {
        let config = PortfolioConfig::default();
        let rented = |i: usize| {
            config.branches[i]
                .apartments
                .iter()
                .filter(|a| a.is_rented())
                .count()
        };
        assert_eq!(rented(0), 28);
        assert_eq!(rented(1), 13);
    }

    #[test]
    fn test_floor_pricing() {
        let seed = mathwaa_52();
        assert_eq!(seed.list_price(1), 2400.0);
        assert_eq!(seed.list_price(8), 2400.0);
        assert_eq!(seed.list_price(9), 2300.0);
        assert_eq!(seed.list_price(24), 2200.0);
        assert_eq!(seed.list_price(32), 2000.0);
    }

    #[test]
    fn test_vacant_unit() {
        let apartments = mathwaa_52().build_apartments();
        let unit = &apartments[0];
        assert_eq!(unit.id, "52-01");
        assert_eq!(unit.status, ApartmentStatus::Vacant);
        assert_eq!(unit.monthly_rent, 2400.0);
        assert_eq!(unit.contract_duration_months, 0);
        assert_eq!(unit.how_heard, None);

        // Every fourth vacant unit is a one-bedroom
        let unit = &apartments[3];
        assert_eq!(unit.id, "52-04");
        assert_eq!(unit.unit_type, UnitType::OneBedroom);
    }

    #[test]
    fn test_rented_unit_inference() {
        let apartments = mathwaa_52().build_apartments();

        let unit = &apartments[12];
        assert_eq!(unit.id, "52-13");
        assert_eq!(unit.status, ApartmentStatus::Rented);
        assert_eq!(unit.monthly_rent, 2900.0);
        assert_eq!(unit.unit_type, UnitType::OneBedroom);
        assert_eq!(unit.how_heard.as_deref(), Some("Aqar"));

        let unit = &apartments[1];
        assert_eq!(unit.id, "52-02");
        // 2600 over 3 months, rounded to a whole riyal
        assert_eq!(unit.monthly_rent, 867.0);
        assert_eq!(unit.unit_type, UnitType::OneBedroom);
    }

    #[test]
    fn test_multiple_bookings_fold() {
        let mut seed = mathwaa_52();
        seed.bookings = vec![
            booking("52-05", 2400.0, 3, 7200.0, "Bayut"),
            booking("52-05", 2400.0, 12, 28800.0, "Aqar"),
        ];
        let unit = &seed.build_apartments()[4];
        assert_eq!(unit.cash_collected, 4800.0);
        assert_eq!(unit.lifetime_value, 36000.0);
        assert_eq!(unit.contract_duration_months, 12);
        assert_eq!(unit.how_heard.as_deref(), Some("Aqar"));
        assert_eq!(unit.monthly_rent, 2400.0);
    }
}
