//! Initial-funding-requirement models.
//!
//! Two independent fixed line-item sets: the up-front uses of funds and the
//! committed sources covering them. Values are non-negative whole amounts.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A use-of-funds line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseOfFunds {
    /// Building works and fit-out of the site.
    WorksAndFitOut,
    /// Furniture.
    Furniture,
    /// Teaching and office equipment.
    Equipment,
    /// IT systems and software.
    ItSystems,
    /// Pre-opening costs (marketing, recruiting, authorisations).
    PreOpeningCosts,
    /// Rental and utility deposits.
    Deposits,
    /// Working-capital reserve for the first months of operation.
    WorkingCapitalReserve,
}

impl UseOfFunds {
    /// All use-of-funds lines in display order.
    pub const ALL: [UseOfFunds; 7] = [
        UseOfFunds::WorksAndFitOut,
        UseOfFunds::Furniture,
        UseOfFunds::Equipment,
        UseOfFunds::ItSystems,
        UseOfFunds::PreOpeningCosts,
        UseOfFunds::Deposits,
        UseOfFunds::WorkingCapitalReserve,
    ];
}

/// A source-of-funds line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOfFunds {
    /// Founders' share capital.
    ShareCapital,
    /// Founder loans.
    FounderLoans,
    /// Bank loan.
    BankLoan,
    /// Public grants.
    PublicGrants,
    /// Donations.
    Donations,
}

impl SourceOfFunds {
    /// All source-of-funds lines in display order.
    pub const ALL: [SourceOfFunds; 5] = [
        SourceOfFunds::ShareCapital,
        SourceOfFunds::FounderLoans,
        SourceOfFunds::BankLoan,
        SourceOfFunds::PublicGrants,
        SourceOfFunds::Donations,
    ];
}

/// User-entered funding line items, both sides.
///
/// Amounts are non-negative whole units; the boundary layer rejects
/// anything else before the checker runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingPlan {
    /// Use-of-funds amounts per line.
    #[serde(default)]
    pub uses: BTreeMap<UseOfFunds, u64>,
    /// Source-of-funds amounts per line.
    #[serde(default)]
    pub sources: BTreeMap<SourceOfFunds, u64>,
}

impl FundingPlan {
    /// The amount for a use line, defaulting to zero.
    pub fn use_amount(&self, line: UseOfFunds) -> u64 {
        self.uses.get(&line).copied().unwrap_or(0)
    }

    /// The amount for a source line, defaulting to zero.
    pub fn source_amount(&self, line: SourceOfFunds) -> u64 {
        self.sources.get(&line).copied().unwrap_or(0)
    }
}

/// Classification of the funding balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingVerdict {
    /// Sources exceed uses.
    Surplus,
    /// Sources exactly cover uses.
    Covered,
    /// Sources fall short of uses.
    Shortfall,
}

/// The result of the funding-requirement check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingCheck {
    /// Sum of all use-of-funds lines.
    pub total_uses: Decimal,
    /// Sum of all source-of-funds lines.
    pub total_sources: Decimal,
    /// `total_sources - total_uses`, signed.
    pub difference: Decimal,
    /// Classification of the difference; exactly zero is `Covered`.
    pub verdict: FundingVerdict,
}
