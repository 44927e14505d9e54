//! Valuation base selection and multiple-based valuation range.

use std::fmt;

use super::earnings::Mode;
use super::normalize::normalize_number;

/// Which amount the valuation multiples are applied to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValuationBase {
    /// The earnings metric alone.
    Metric,
    /// The earnings metric plus the total owner benefit.
    MetricPlusAddBacks,
    /// A caller-supplied constant, independent of the session inputs.
    Fixed(f64),
}

impl ValuationBase {
    /// The amount the multiples apply to; 0 if it is not finite.
    pub fn resolve(self, net_metric: f64, total_owner_benefit: f64) -> f64 {
        normalize_number(match self {
            ValuationBase::Metric => net_metric,
            ValuationBase::MetricPlusAddBacks => net_metric + total_owner_benefit,
            ValuationBase::Fixed(value) => value,
        })
    }

    /// Config name of the strategy (`metric`, `metric_plus_addbacks`, `fixed`).
    pub fn name(self) -> &'static str {
        match self {
            ValuationBase::Metric => "metric",
            ValuationBase::MetricPlusAddBacks => "metric_plus_addbacks",
            ValuationBase::Fixed(_) => "fixed",
        }
    }

    /// Parse a strategy name. `fixed` requires `fixed_value`.
    pub fn parse(name: &str, fixed_value: Option<f64>) -> Result<Self, String> {
        match name.trim().to_lowercase().as_str() {
            "metric" => Ok(ValuationBase::Metric),
            "metric_plus_addbacks" => Ok(ValuationBase::MetricPlusAddBacks),
            "fixed" => match fixed_value {
                Some(v) if v.is_finite() => Ok(ValuationBase::Fixed(v)),
                Some(_) => Err("fixed base must be a finite number".to_string()),
                None => Err("fixed base requires a value".to_string()),
            },
            other => Err(format!(
                "unknown base '{other}', expected metric, metric_plus_addbacks or fixed"
            )),
        }
    }
}

impl fmt::Display for ValuationBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuationBase::Fixed(v) => write!(f, "fixed({v})"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Low, median and high valuation multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multiples {
    pub low: f64,
    pub median: f64,
    pub high: f64,
}

pub const EBITDA_MULTIPLES: Multiples = Multiples {
    low: 1.25,
    median: 1.5,
    high: 2.0,
};

pub const SDE_MULTIPLES: Multiples = Multiples {
    low: 1.5,
    median: 2.0,
    high: 2.5,
};

impl Multiples {
    pub fn new(low: f64, median: f64, high: f64) -> Self {
        Self { low, median, high }
    }

    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Ebitda => EBITDA_MULTIPLES,
            Mode::Sde => SDE_MULTIPLES,
        }
    }

    /// Parse a comma-separated `low, median, high` triple.
    ///
    /// All three must be positive and non-decreasing.
    pub fn parse(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected 3 multiples, got {}", parts.len()));
        }
        let mut values = [0.0_f64; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| format!("invalid multiple '{part}'"))?;
            if !slot.is_finite() || *slot <= 0.0 {
                return Err(format!("multiple '{part}' must be a positive number"));
            }
        }
        let [low, median, high] = values;
        if low > median || median > high {
            return Err("multiples must be ordered low <= median <= high".to_string());
        }
        Ok(Self { low, median, high })
    }
}

impl fmt::Display for Multiples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x / {}x / {}x", self.low, self.median, self.high)
    }
}

/// Valuations at each multiple, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationRange {
    pub low: f64,
    pub median: f64,
    pub high: f64,
}

impl ValuationRange {
    pub fn from_base(base: f64, multiples: Multiples) -> Self {
        Self {
            low: normalize_number(base * multiples.low),
            median: normalize_number(base * multiples.median),
            high: normalize_number(base * multiples.high),
        }
    }

    /// Round each valuation half-up to a whole currency unit.
    pub fn rounded(&self) -> Self {
        Self {
            low: excel_round(self.low),
            median: excel_round(self.median),
            high: excel_round(self.high),
        }
    }
}

/// Round half up: `floor(x + 0.5)`.
pub fn excel_round(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiples_on_sde_base() {
        let range = ValuationRange::from_base(60_000.0, SDE_MULTIPLES).rounded();
        assert_eq!(range.low, 90_000.0);
        assert_eq!(range.median, 120_000.0);
        assert_eq!(range.high, 150_000.0);
    }

    #[test]
    fn multiples_on_ebitda_base() {
        let range = ValuationRange::from_base(50_000.0, EBITDA_MULTIPLES);
        assert_eq!(range.low, 62_500.0);
        assert_eq!(range.median, 75_000.0);
        assert_eq!(range.high, 100_000.0);
    }

    #[test]
    fn negative_base_is_not_suppressed() {
        let range = ValuationRange::from_base(-1_000.0, SDE_MULTIPLES);
        assert_eq!(range.low, -1_500.0);
        assert_eq!(range.high, -2_500.0);
    }

    #[test]
    fn rounding_is_deferred() {
        let range = ValuationRange::from_base(1_000.3, EBITDA_MULTIPLES);
        assert_eq!(range.low, 1_000.3 * 1.25);
        assert_eq!(range.rounded().low, 1_250.0);
    }

    #[test]
    fn excel_round_half_up() {
        assert_eq!(excel_round(2.5), 3.0);
        assert_eq!(excel_round(2.4999), 2.0);
        assert_eq!(excel_round(-2.5), -2.0);
        assert_eq!(excel_round(-2.6), -3.0);
        assert_eq!(excel_round(0.0), 0.0);
    }

    #[test]
    fn overflowing_base_is_zero() {
        assert_eq!(ValuationBase::MetricPlusAddBacks.resolve(f64::MAX, f64::MAX), 0.0);
        let range = ValuationRange::from_base(f64::MAX, SDE_MULTIPLES);
        assert_eq!(range.low, 0.0);
        assert_eq!(range.high, 0.0);
    }

    #[test]
    fn base_resolution() {
        assert_eq!(ValuationBase::Metric.resolve(100.0, 50.0), 100.0);
        assert_eq!(ValuationBase::MetricPlusAddBacks.resolve(100.0, 50.0), 150.0);
        assert_eq!(ValuationBase::Fixed(86_729.0).resolve(100.0, 50.0), 86_729.0);
    }

    #[test]
    fn base_parse() {
        assert_eq!(ValuationBase::parse("metric", None), Ok(ValuationBase::Metric));
        assert_eq!(
            ValuationBase::parse("METRIC_PLUS_ADDBACKS", None),
            Ok(ValuationBase::MetricPlusAddBacks)
        );
        assert_eq!(
            ValuationBase::parse("fixed", Some(86_729.0)),
            Ok(ValuationBase::Fixed(86_729.0))
        );
        assert!(ValuationBase::parse("fixed", None).is_err());
        assert!(ValuationBase::parse("fixed", Some(f64::NAN)).is_err());
        assert!(ValuationBase::parse("revenue", None).is_err());
    }

    #[test]
    fn multiples_parse() {
        assert_eq!(
            Multiples::parse("1.5, 2.0, 2.5"),
            Ok(Multiples::new(1.5, 2.0, 2.5))
        );
        assert_eq!(Multiples::parse("2,2,2"), Ok(Multiples::new(2.0, 2.0, 2.0)));
    }

    #[test]
    fn multiples_parse_rejects_bad_input() {
        assert!(Multiples::parse("1.5, 2.0").is_err());
        assert!(Multiples::parse("1.5, x, 2.5").is_err());
        assert!(Multiples::parse("0, 1, 2").is_err());
        assert!(Multiples::parse("-1, 1, 2").is_err());
        assert!(Multiples::parse("3, 2, 1").is_err());
        assert!(Multiples::parse("1, inf, 2").is_err());
    }

    #[test]
    fn multiples_for_mode() {
        assert_eq!(Multiples::for_mode(Mode::Ebitda), EBITDA_MULTIPLES);
        assert_eq!(Multiples::for_mode(Mode::Sde), SDE_MULTIPLES);
    }
}
