use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{LedgerError, LoadError};

/// Residual line capacity below which the line is considered fully allocated.
/// Independent of the plant and demand tolerances.
pub const LINE_SETTLE_TOLERANCE_MW: f64 = 0.001;

/// Transmission line record as stored in the binary line file.
/// Field order matches the on-disk record: capacity, then efficiency.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LineDescriptor {
    #[validate(length(min = 1))]
    pub line_id: String,
    #[validate(range(exclusive_min = 0.0))]
    pub max_capacity_mw: f64,
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub efficiency: f64,
}

/// Transmission line connecting the plants to demand locations
#[derive(Debug, Clone, Serialize)]
pub struct TransLine {
    line_id: String,
    max_capacity_mw: f64,
    avail_capacity_mw: f64,
    efficiency: f64,
}

impl TransLine {
    pub fn new(line_id: impl Into<String>, max_capacity_mw: f64, efficiency: f64) -> Self {
        Self {
            line_id: line_id.into(),
            max_capacity_mw,
            avail_capacity_mw: max_capacity_mw,
            efficiency,
        }
    }

    pub fn line_id(&self) -> &str {
        &self.line_id
    }

    pub fn max_capacity_mw(&self) -> f64 {
        self.max_capacity_mw
    }

    pub fn avail_capacity_mw(&self) -> f64 {
        self.avail_capacity_mw
    }

    /// Fraction of power that survives transit (0, 1]
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Allocate `power_mw` of delivered power on this line.
    ///
    /// Overshooting the available capacity by more than the settle
    /// tolerance is an error and leaves the ledger untouched.
    pub fn allocate_capacity(&mut self, power_mw: f64) -> Result<(), LedgerError> {
        if power_mw < 0.0 {
            return Err(LedgerError::NegativeAmount {
                id: self.line_id.clone(),
                amount: power_mw,
            });
        }

        if power_mw > self.avail_capacity_mw + LINE_SETTLE_TOLERANCE_MW {
            return Err(LedgerError::LineOverdraw {
                line_id: self.line_id.clone(),
                requested: power_mw,
                available: self.avail_capacity_mw,
            });
        }

        self.avail_capacity_mw -= power_mw;
        if self.avail_capacity_mw < LINE_SETTLE_TOLERANCE_MW {
            self.avail_capacity_mw = 0.0;
        }
        Ok(())
    }
}

impl TryFrom<LineDescriptor> for TransLine {
    type Error = LoadError;

    fn try_from(descriptor: LineDescriptor) -> Result<Self, Self::Error> {
        descriptor.validate().map_err(|e| LoadError::Invalid {
            id: descriptor.line_id.clone(),
            message: e.to_string(),
        })?;
        Ok(TransLine::new(
            descriptor.line_id,
            descriptor.max_capacity_mw,
            descriptor.efficiency,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_reduces_available() {
        let mut line = TransLine::new("L-100", 80.0, 0.9);
        line.allocate_capacity(30.0).unwrap();
        assert_eq!(line.avail_capacity_mw(), 50.0);
        assert_eq!(line.max_capacity_mw(), 80.0);
    }

    #[test]
    fn test_allocate_settles_small_residual() {
        let mut line = TransLine::new("L-100", 80.0, 0.9);
        line.allocate_capacity(79.9995).unwrap();
        assert_eq!(line.avail_capacity_mw(), 0.0);
    }

    #[test]
    fn test_allocate_within_tolerance_above_available_settles() {
        let mut line = TransLine::new("L-100", 10.0, 1.0);
        line.allocate_capacity(10.0005).unwrap();
        assert_eq!(line.avail_capacity_mw(), 0.0);
    }

    #[test]
    fn test_allocate_overdraw_is_error() {
        let mut line = TransLine::new("L-100", 10.0, 1.0);

        let err = line.allocate_capacity(15.0).unwrap_err();

        assert_eq!(
            err,
            LedgerError::LineOverdraw {
                line_id: "L-100".into(),
                requested: 15.0,
                available: 10.0,
            }
        );
        assert_eq!(line.avail_capacity_mw(), 10.0);
    }

    #[test]
    fn test_allocate_negative_amount_is_error() {
        let mut line = TransLine::new("L-100", 10.0, 1.0);
        assert!(matches!(
            line.allocate_capacity(-1.0),
            Err(LedgerError::NegativeAmount { .. })
        ));
        assert_eq!(line.avail_capacity_mw(), 10.0);
    }

    #[test]
    fn test_descriptor_rejects_efficiency_out_of_range() {
        for efficiency in [0.0, 1.2, -0.5] {
            let descriptor = LineDescriptor {
                line_id: "L-7".into(),
                max_capacity_mw: 100.0,
                efficiency,
            };
            assert!(TransLine::try_from(descriptor).is_err(), "efficiency {efficiency}");
        }
    }

    #[test]
    fn test_descriptor_accepts_lossless_line() {
        let descriptor = LineDescriptor {
            line_id: "L-8".into(),
            max_capacity_mw: 100.0,
            efficiency: 1.0,
        };
        let line = TransLine::try_from(descriptor).unwrap();
        assert_eq!(line.efficiency(), 1.0);
        assert_eq!(line.avail_capacity_mw(), 100.0);
    }
}
