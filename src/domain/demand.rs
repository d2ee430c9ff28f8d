use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use crate::error::LoadError;

/// Deficit magnitude below which a demand is considered fully met.
pub const DEMAND_SETTLE_TOLERANCE_MW: f64 = 0.01;

/// Satisfaction status of a demand location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
pub enum DemandStatus {
    #[strum(serialize = "Not Met")]
    NotMet,
    #[strum(serialize = "Partially Met")]
    PartiallyMet,
    #[strum(serialize = "Met")]
    Met,
}

impl DemandStatus {
    /// Status is a pure function of the remaining deficit and acquired power
    pub fn derive(deficit_mw: f64, acquired_mw: f64) -> Self {
        if deficit_mw == 0.0 {
            DemandStatus::Met
        } else if acquired_mw > 0.0 {
            DemandStatus::PartiallyMet
        } else {
            DemandStatus::NotMet
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DemandDescriptor {
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(range(exclusive_min = 0.0))]
    pub required_mw: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub retail_price_per_mw: f64,
}

/// Demand location (city, village, ...) and its supply/billing ledger
#[derive(Debug, Clone, Serialize)]
pub struct Demand {
    location: String,
    retail_price_per_mw: f64,
    total_price: f64,
    total_cost: f64,
    required_mw: f64,
    acquired_mw: f64,
    deficit_mw: f64,
    status: DemandStatus,
}

impl Demand {
    pub fn new(location: impl Into<String>, required_mw: f64, retail_price_per_mw: f64) -> Self {
        Self {
            location: location.into(),
            retail_price_per_mw,
            total_price: 0.0,
            total_cost: 0.0,
            required_mw,
            acquired_mw: 0.0,
            deficit_mw: required_mw,
            status: DemandStatus::NotMet,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn retail_price_per_mw(&self) -> f64 {
        self.retail_price_per_mw
    }

    /// Price billed to this location so far
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Production cost of the power delivered so far
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn profit(&self) -> f64 {
        self.total_price - self.total_cost
    }

    pub fn required_mw(&self) -> f64 {
        self.required_mw
    }

    pub fn acquired_mw(&self) -> f64 {
        self.acquired_mw
    }

    pub fn deficit_mw(&self) -> f64 {
        self.deficit_mw
    }

    pub fn status(&self) -> DemandStatus {
        self.status
    }

    /// Record delivered power along with what it was billed and what it cost
    pub fn apply_transfer(&mut self, amount_mw: f64, sell_price: f64, cost: f64) {
        self.acquired_mw += amount_mw;
        self.deficit_mw = settle_deficit(self.required_mw, self.acquired_mw);
        self.total_price += sell_price;
        self.total_cost += cost;
        self.status = DemandStatus::derive(self.deficit_mw, self.acquired_mw);
    }
}

fn settle_deficit(required_mw: f64, acquired_mw: f64) -> f64 {
    let raw = required_mw - acquired_mw;
    if raw.abs() < DEMAND_SETTLE_TOLERANCE_MW {
        0.0
    } else {
        raw.max(0.0)
    }
}

impl TryFrom<DemandDescriptor> for Demand {
    type Error = LoadError;

    fn try_from(descriptor: DemandDescriptor) -> Result<Self, Self::Error> {
        descriptor.validate().map_err(|e| LoadError::Invalid {
            id: descriptor.location.clone(),
            message: e.to_string(),
        })?;
        Ok(Demand::new(
            descriptor.location,
            descriptor.required_mw,
            descriptor.retail_price_per_mw,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_demand_is_not_met() {
        let demand = Demand::new("Springfield", 120.0, 45.0);
        assert_eq!(demand.deficit_mw(), 120.0);
        assert_eq!(demand.acquired_mw(), 0.0);
        assert_eq!(demand.status(), DemandStatus::NotMet);
    }

    #[test]
    fn test_partial_then_full_supply() {
        let mut demand = Demand::new("Springfield", 100.0, 50.0);

        demand.apply_transfer(60.0, 3000.0, 1200.0);
        assert_eq!(demand.status(), DemandStatus::PartiallyMet);
        assert_eq!(demand.deficit_mw(), 40.0);

        demand.apply_transfer(40.0, 2000.0, 900.0);
        assert_eq!(demand.status(), DemandStatus::Met);
        assert_eq!(demand.deficit_mw(), 0.0);
        assert_eq!(demand.total_price(), 5000.0);
        assert_eq!(demand.total_cost(), 2100.0);
        assert_eq!(demand.profit(), 2900.0);
    }

    #[test]
    fn test_deficit_settles_within_tolerance() {
        let mut demand = Demand::new("Shelbyville", 100.0, 10.0);
        demand.apply_transfer(99.995, 0.0, 0.0);
        assert_eq!(demand.deficit_mw(), 0.0);
        assert_eq!(demand.status(), DemandStatus::Met);
    }

    #[test]
    fn test_deficit_never_negative() {
        let mut demand = Demand::new("Ogdenville", 10.0, 10.0);
        demand.apply_transfer(10.5, 0.0, 0.0);
        assert_eq!(demand.deficit_mw(), 0.0);
    }

    #[test]
    fn test_status_derivation_is_pure() {
        for (deficit, acquired) in [(0.0, 0.0), (5.0, 0.0), (5.0, 3.0), (0.0, 8.0)] {
            assert_eq!(
                DemandStatus::derive(deficit, acquired),
                DemandStatus::derive(deficit, acquired)
            );
        }
        assert_eq!(DemandStatus::derive(5.0, 0.0), DemandStatus::NotMet);
        assert_eq!(DemandStatus::derive(5.0, 3.0), DemandStatus::PartiallyMet);
        assert_eq!(DemandStatus::derive(0.0, 3.0), DemandStatus::Met);
    }

    #[test]
    fn test_status_display_matches_report_labels() {
        assert_eq!(DemandStatus::PartiallyMet.to_string(), "Partially Met");
        assert_eq!(DemandStatus::NotMet.to_string(), "Not Met");
    }

    #[test]
    fn test_descriptor_rejects_zero_price() {
        let descriptor = DemandDescriptor {
            location: "Capital City".into(),
            required_mw: 10.0,
            retail_price_per_mw: 0.0,
        };
        assert!(Demand::try_from(descriptor).is_err());
    }
}
