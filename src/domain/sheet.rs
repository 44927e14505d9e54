//! Ordered amount sheets for financial inputs and owner add-backs.

use super::normalize::{normalize, normalize_number};

/// A raw field value as collected from a form or config file.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAmount {
    Text(String),
    Number(f64),
}

impl RawAmount {
    pub fn normalize(&self) -> f64 {
        match self {
            RawAmount::Text(s) => normalize(s),
            RawAmount::Number(n) => normalize_number(*n),
        }
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(s: String) -> Self {
        RawAmount::Text(s)
    }
}

impl From<f64> for RawAmount {
    fn from(n: f64) -> Self {
        RawAmount::Number(n)
    }
}

/// Insertion-ordered mapping of field key to normalized amount.
///
/// Lookups of absent keys yield `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountSheet {
    entries: Vec<(String, f64)>,
}

/// Named earnings inputs (revenue and cost fields).
pub type FinancialInputs = AmountSheet;

/// Named discretionary-expense categories added back to earnings.
pub type OwnerAddBacks = AmountSheet;

impl AmountSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from raw values, normalizing each one.
    pub fn from_raw<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawAmount>,
    {
        let mut sheet = Self::new();
        for (key, value) in fields {
            sheet.insert(key, value.into().normalize());
        }
        sheet
    }

    /// Set `key` to `amount`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, amount: f64) {
        let key = key.into();
        let amount = normalize_number(amount);
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = amount,
            None => self.entries.push((key, amount)),
        }
    }

    pub fn get(&self, key: &str) -> f64 {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Sum of all amounts, in full precision.
    /// Sum of all amounts; an overflowing sum is 0.
    pub fn total(&self) -> f64 {
        normalize_number(self.entries.iter().map(|(_, v)| v).sum())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
