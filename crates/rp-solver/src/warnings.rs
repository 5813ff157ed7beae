//! Non-fatal anomalies detected while solving.

use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// ROW width below the floor; the floor was used instead.
    RowWidthClamped { given_m: f64, min_m: f64 },
    /// Road coefficient outside the advisory band. Kept as given.
    RoadCoeffUnusual { k: f64 },
    /// Road coefficient is NaN or infinite; the fallback was used instead.
    RoadCoeffNonFinite { k: f64, fallback: f64 },
    /// Mix percentages summed to zero or less; distributed evenly.
    MixDegenerate,
    /// Mix percentages did not sum to 100; rescaled.
    MixAutoNormalized { total_pct: f64 },
    /// Fixed non-sellables take the whole site.
    NoCapacity,
    /// Shrink phase stopped at its iteration cap with area still overflowing.
    BalanceCapReached { iterations: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::RowWidthClamped { given_m, min_m } => write!(
                f,
                "ROW width {given_m}m below minimum {min_m}m. Using {min_m}m."
            ),
            Warning::RoadCoeffUnusual { k } => write!(
                f,
                "Road coefficient k={k} is unusual. Typical range 0.85–1.25."
            ),
            Warning::RoadCoeffNonFinite { k, fallback } => write!(
                f,
                "Road coefficient k={k} is not a finite number. Using {fallback}."
            ),
            Warning::MixDegenerate => {
                f.write_str("Product mix sum is zero or invalid; distributing evenly.")
            }
            Warning::MixAutoNormalized { total_pct } => write!(
                f,
                "Product mix does not sum to 100% (got {total_pct:.2}%). Auto-normalizing."
            ),
            Warning::NoCapacity => f.write_str(
                "Non-sellable fixed areas exceed or equal gross area. No units can fit.",
            ),
            Warning::BalanceCapReached { iterations } => write!(
                f,
                "Area balancing stopped after {iterations} iterations; lots and roads may exceed the gross area."
            ),
        }
    }
}

/// Ordered warning sequence owned by a single solve call.
#[derive(Debug, Clone, Default)]
pub struct WarningLog {
    entries: Vec<Warning>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        tracing::debug!(%warning, "solver warning");
        self.entries.push(warning);
    }

    pub fn entries(&self) -> &[Warning] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_width_message_prints_plain_numbers() {
        let w = Warning::RowWidthClamped {
            given_m: 2.0,
            min_m: 4.0,
        };
        assert_eq!(w.to_string(), "ROW width 2m below minimum 4m. Using 4m.");

        let w = Warning::RowWidthClamped {
            given_m: 3.5,
            min_m: 4.0,
        };
        assert_eq!(w.to_string(), "ROW width 3.5m below minimum 4m. Using 4m.");
    }

    #[test]
    fn mix_total_uses_two_decimals() {
        let w = Warning::MixAutoNormalized { total_pct: 90.0 };
        assert_eq!(
            w.to_string(),
            "Product mix does not sum to 100% (got 90.00%). Auto-normalizing."
        );
    }

    #[test]
    fn log_keeps_detection_order() {
        let mut log = WarningLog::new();
        log.push(Warning::RoadCoeffUnusual { k: 3.0 });
        log.push(Warning::MixDegenerate);
        let msgs = log.into_messages();
        assert_eq!(msgs.len(), 2);
        assert!(msgs[0].starts_with("Road coefficient k=3 is unusual"));
        assert!(msgs[1].starts_with("Product mix sum is zero"));
    }
}
