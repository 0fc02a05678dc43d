//! Fraud-risk labels and the filters and choices built on them.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The category used for transactions without a risk level when grouping by
/// risk level.
pub const NO_RISK_LABEL: &str = "No risk";

/// A fraud-risk label assigned to a transaction by an analyst.
///
/// A transaction without a label is represented as `Option::<RiskLevel>::None`
/// and stored as `NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Very likely to be fraudulent.
    High,
    /// Possibly fraudulent.
    Medium,
    /// Unlikely to be fraudulent.
    Low,
}

impl RiskLevel {
    /// The value stored in the `risk_level` column.
    pub fn as_sql_str(self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        }
    }

    /// The label shown to the analyst.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    /// Parse a risk level, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(RiskLevel::High),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "LOW" => Ok(RiskLevel::Low),
            _ => Err(Error::InvalidRiskLevel(s.to_owned())),
        }
    }
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ToSql for RiskLevel {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_sql_str()))
    }
}

impl FromSql for RiskLevel {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// Which transactions to show, based on their risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskFilter {
    /// Every transaction.
    #[default]
    All,
    /// Transactions labelled high risk.
    High,
    /// Transactions labelled medium risk.
    Medium,
    /// Transactions labelled low risk.
    Low,
    /// Transactions without a risk level.
    Empty,
}

impl RiskFilter {
    /// The filters in the order they are offered to the analyst.
    pub const OPTIONS: [RiskFilter; 5] = [
        RiskFilter::All,
        RiskFilter::High,
        RiskFilter::Medium,
        RiskFilter::Low,
        RiskFilter::Empty,
    ];

    /// The value used for this filter in query strings and forms.
    pub fn as_query_value(self) -> &'static str {
        match self {
            RiskFilter::All => "all",
            RiskFilter::High => "high",
            RiskFilter::Medium => "medium",
            RiskFilter::Low => "low",
            RiskFilter::Empty => "empty",
        }
    }

    /// The label shown to the analyst.
    pub fn label(self) -> &'static str {
        match self {
            RiskFilter::All => "All",
            RiskFilter::High => "High",
            RiskFilter::Medium => "Medium",
            RiskFilter::Low => "Low",
            RiskFilter::Empty => "Empty",
        }
    }

    /// Whether a transaction with `risk_level` passes this filter.
    pub fn matches(self, risk_level: Option<RiskLevel>) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::High => risk_level == Some(RiskLevel::High),
            RiskFilter::Medium => risk_level == Some(RiskLevel::Medium),
            RiskFilter::Low => risk_level == Some(RiskLevel::Low),
            RiskFilter::Empty => risk_level.is_none(),
        }
    }
}

impl FromStr for RiskFilter {
    type Err = Error;

    /// Parse a filter from its query value, where a blank string means all
    /// transactions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Ok(RiskFilter::All);
        }

        RiskFilter::OPTIONS
            .into_iter()
            .find(|filter| filter.as_query_value().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidRiskFilter(s.to_owned()))
    }
}

impl Display for RiskFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_value())
    }
}

/// The risk level an analyst picks when labelling a transaction.
///
/// Unlike [RiskLevel], this includes [RiskChoice::Empty] for clearing the
/// label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskChoice {
    /// Label the transaction high risk.
    High,
    /// Label the transaction medium risk.
    Medium,
    /// Label the transaction low risk.
    Low,
    /// Remove the risk label.
    Empty,
}

impl RiskChoice {
    /// The choices in the order they are offered to the analyst.
    pub const OPTIONS: [RiskChoice; 4] = [
        RiskChoice::High,
        RiskChoice::Medium,
        RiskChoice::Low,
        RiskChoice::Empty,
    ];

    /// The risk level to store, `None` meaning the label is removed.
    pub fn risk_level(self) -> Option<RiskLevel> {
        match self {
            RiskChoice::High => Some(RiskLevel::High),
            RiskChoice::Medium => Some(RiskLevel::Medium),
            RiskChoice::Low => Some(RiskLevel::Low),
            RiskChoice::Empty => None,
        }
    }

    /// The value used for this choice in forms.
    pub fn as_form_value(self) -> &'static str {
        match self {
            RiskChoice::High => "high",
            RiskChoice::Medium => "medium",
            RiskChoice::Low => "low",
            RiskChoice::Empty => "empty",
        }
    }

    /// The label shown to the analyst.
    pub fn label(self) -> &'static str {
        match self.risk_level() {
            Some(risk_level) => risk_level.label(),
            None => "Empty",
        }
    }
}

impl FromStr for RiskChoice {
    type Err = Error;

    /// Parse a choice, where "empty" or a blank string removes the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("empty") {
            return Ok(RiskChoice::Empty);
        }

        match trimmed.parse::<RiskLevel>() {
            Ok(RiskLevel::High) => Ok(RiskChoice::High),
            Ok(RiskLevel::Medium) => Ok(RiskChoice::Medium),
            Ok(RiskLevel::Low) => Ok(RiskChoice::Low),
            Err(_) => Err(Error::InvalidRiskLevel(s.to_owned())),
        }
    }
}
