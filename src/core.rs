//! Core Types for logsim
//!
//! Categories, rates and rendered lines. Types are co-located here as the
//! single source of truth for the rest of the crate.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

// ============================================================================
// Category
// ============================================================================

/// Kind of log a line belongs to. Closed set, fixed iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    System,
    Error,
    Application,
    Access,
}

impl Category {
    /// Scan order used by the emission loop
    pub const ALL: [Category; 4] = [
        Category::System,
        Category::Error,
        Category::Application,
        Category::Access,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "system",
            Category::Error => "error",
            Category::Application => "application",
            Category::Access => "access",
        }
    }

    /// Position in [`Category::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Bracketed tag prefixed to rendered lines. Access lines carry none.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Category::System => Some("[SYSTEM]"),
            Category::Error => Some("[ERROR]"),
            Category::Application => Some("[INFO]"),
            Category::Access => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SimError::invalid_category(s))
    }
}

// ============================================================================
// Rate
// ============================================================================

/// Emission intensity, always within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Rate(u8);

// Deserialized values go through the same clamp as API updates
impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Rate::clamped)
    }
}

impl Rate {
    pub const MAX: Rate = Rate(100);
    pub const ZERO: Rate = Rate(0);

    /// Clamp an arbitrary integer into range
    pub fn clamped(value: i64) -> Self {
        Rate(value.clamp(0, 100) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_active(&self) -> bool {
        self.0 > 0
    }

    /// rate 100 -> 10 msg/s, rate 1 -> 0.1 msg/s
    pub fn messages_per_second(&self) -> f64 {
        self.0 as f64 / 10.0
    }
}

// ============================================================================
// RateTable
// ============================================================================

/// One rate per category. Serializes as a flat `{category: rate}` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RateTable {
    pub system: Rate,
    pub error: Rate,
    pub application: Rate,
    pub access: Rate,
}

impl RateTable {
    pub fn get(&self, category: Category) -> Rate {
        match category {
            Category::System => self.system,
            Category::Error => self.error,
            Category::Application => self.application,
            Category::Access => self.access,
        }
    }

    pub fn set(&mut self, category: Category, rate: Rate) {
        let slot = match category {
            Category::System => &mut self.system,
            Category::Error => &mut self.error,
            Category::Application => &mut self.application,
            Category::Access => &mut self.access,
        };
        *slot = rate;
    }

    /// Categories with a positive rate, in scan order
    pub fn active(&self) -> impl Iterator<Item = (Category, Rate)> + '_ {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, r)| r.is_active())
    }
}

// ============================================================================
// LogLine
// ============================================================================

/// A fully rendered line, produced, written and dropped per emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub category: Category,
    text: String,
}

impl LogLine {
    /// Line breaks are replaced so the result always stays on one line
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.contains(['\n', '\r']) {
            text = text.replace(['\n', '\r'], " ");
        }
        Self { category, text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
