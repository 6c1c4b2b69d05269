//! Balance sheet models.
//!
//! A balance sheet is a snapshot of a fixed set of line codes for one
//! tracked year (only years 1 and 2 are modeled). Leaf lines are either
//! derived from upstream statement totals or free-form user input; the
//! tagged [`BalanceEntry`] keeps the two apart so stale edits can never
//! overwrite a formula. Subtotals are computed on demand from fixed
//! membership lists, never stored.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of years the balance sheet is modeled for.
pub const TRACKED_BALANCE_YEARS: usize = 2;

/// A balance-sheet leaf line, keyed by its semantic code.
///
/// The serialized codes follow the Italian civil-code statement layout
/// (e.g. `CASSA`, `DEB_FORNITORI`), which is also the key layout of the
/// session state the presentation layer persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BalanceLineCode {
    /// Intangible fixed assets.
    #[serde(rename = "IMM_IMMATERIALI")]
    IntangibleAssets,
    /// Buildings.
    #[serde(rename = "IMM_FABBRICATI")]
    Buildings,
    /// Plant and machinery.
    #[serde(rename = "IMM_IMPIANTI")]
    Plant,
    /// Equipment.
    #[serde(rename = "IMM_ATTREZZATURE")]
    Equipment,
    /// Furniture and fittings.
    #[serde(rename = "IMM_ARREDI")]
    Furniture,
    /// Financial fixed assets.
    #[serde(rename = "IMM_FINANZIARIE")]
    FinancialAssets,
    /// Inventory.
    #[serde(rename = "RIMANENZE")]
    Inventory,
    /// Trade receivables (derived: 30% of revenue).
    #[serde(rename = "CRED_CLIENTI")]
    TradeReceivables,
    /// Tax receivables (derived: 1% of total cost).
    #[serde(rename = "CRED_TRIBUTARI")]
    TaxReceivables,
    /// Other receivables.
    #[serde(rename = "CRED_ALTRI")]
    OtherReceivables,
    /// Current financial assets.
    #[serde(rename = "ATT_FINANZIARIE")]
    CurrentFinancialAssets,
    /// Accrued income and prepayments.
    #[serde(rename = "RATEI_ATTIVI")]
    AccruedIncome,
    /// Cash on hand (derived from initial cash and negative net results).
    #[serde(rename = "CASSA")]
    Cash,
    /// Bank deposits.
    #[serde(rename = "BANCA")]
    Bank,
    /// Share capital.
    #[serde(rename = "CAPITALE_SOCIALE")]
    ShareCapital,
    /// Reserves.
    #[serde(rename = "RISERVE")]
    Reserves,
    /// Net result for the year (derived from the income statement).
    #[serde(rename = "RISULTATO_ESERCIZIO")]
    NetResult,
    /// Accrued severance liability (derived: cumulative 7% of personnel).
    #[serde(rename = "TFR")]
    Severance,
    /// Provisions for risks and charges.
    #[serde(rename = "FONDI_RISCHI")]
    OtherFunds,
    /// Trade payables (derived: total cost / 6).
    #[serde(rename = "DEB_FORNITORI")]
    TradePayables,
    /// Tax payables (derived: 1% of revenue).
    #[serde(rename = "DEB_TRIBUTARI")]
    TaxPayables,
    /// Social-security payables (derived: 7% of personnel).
    #[serde(rename = "DEB_PREVIDENZIALI")]
    SocialSecurityPayables,
    /// Other payables.
    #[serde(rename = "DEB_ALTRI")]
    OtherPayables,
    /// Bank borrowings.
    #[serde(rename = "DEB_BANCHE")]
    BankBorrowings,
    /// Accrued liabilities and deferrals.
    #[serde(rename = "RATEI_PASSIVI")]
    AccruedLiabilities,
}

impl BalanceLineCode {
    /// The six fixed-asset lines summed into `TOT_IMMOBILIZZAZIONI`.
    pub const FIXED_ASSETS: [BalanceLineCode; 6] = [
        BalanceLineCode::IntangibleAssets,
        BalanceLineCode::Buildings,
        BalanceLineCode::Plant,
        BalanceLineCode::Equipment,
        BalanceLineCode::Furniture,
        BalanceLineCode::FinancialAssets,
    ];

    /// Current-asset lines, liquidity included.
    pub const CURRENT_ASSETS: [BalanceLineCode; 8] = [
        BalanceLineCode::Inventory,
        BalanceLineCode::TradeReceivables,
        BalanceLineCode::TaxReceivables,
        BalanceLineCode::OtherReceivables,
        BalanceLineCode::CurrentFinancialAssets,
        BalanceLineCode::AccruedIncome,
        BalanceLineCode::Cash,
        BalanceLineCode::Bank,
    ];

    /// Liquid-asset lines summed into total liquidity.
    pub const LIQUIDITY: [BalanceLineCode; 2] = [BalanceLineCode::Cash, BalanceLineCode::Bank];

    /// Equity lines.
    pub const EQUITY: [BalanceLineCode; 3] = [
        BalanceLineCode::ShareCapital,
        BalanceLineCode::Reserves,
        BalanceLineCode::NetResult,
    ];

    /// Severance and other funds.
    pub const FUNDS: [BalanceLineCode; 2] =
        [BalanceLineCode::Severance, BalanceLineCode::OtherFunds];

    /// Debt lines.
    pub const DEBTS: [BalanceLineCode; 6] = [
        BalanceLineCode::TradePayables,
        BalanceLineCode::TaxPayables,
        BalanceLineCode::SocialSecurityPayables,
        BalanceLineCode::OtherPayables,
        BalanceLineCode::BankBorrowings,
        BalanceLineCode::AccruedLiabilities,
    ];

    /// Every leaf line in statement order.
    pub const ALL: [BalanceLineCode; 25] = [
        BalanceLineCode::IntangibleAssets,
        BalanceLineCode::Buildings,
        BalanceLineCode::Plant,
        BalanceLineCode::Equipment,
        BalanceLineCode::Furniture,
        BalanceLineCode::FinancialAssets,
        BalanceLineCode::Inventory,
        BalanceLineCode::TradeReceivables,
        BalanceLineCode::TaxReceivables,
        BalanceLineCode::OtherReceivables,
        BalanceLineCode::CurrentFinancialAssets,
        BalanceLineCode::AccruedIncome,
        BalanceLineCode::Cash,
        BalanceLineCode::Bank,
        BalanceLineCode::ShareCapital,
        BalanceLineCode::Reserves,
        BalanceLineCode::NetResult,
        BalanceLineCode::Severance,
        BalanceLineCode::OtherFunds,
        BalanceLineCode::TradePayables,
        BalanceLineCode::TaxPayables,
        BalanceLineCode::SocialSecurityPayables,
        BalanceLineCode::OtherPayables,
        BalanceLineCode::BankBorrowings,
        BalanceLineCode::AccruedLiabilities,
    ];

    /// Whether this line is derived by the balance-sheet builder.
    ///
    /// Derived lines cannot be overridden by user input.
    pub fn is_computed(self) -> bool {
        matches!(
            self,
            BalanceLineCode::TradeReceivables
                | BalanceLineCode::TaxReceivables
                | BalanceLineCode::Cash
                | BalanceLineCode::NetResult
                | BalanceLineCode::Severance
                | BalanceLineCode::TradePayables
                | BalanceLineCode::TaxPayables
                | BalanceLineCode::SocialSecurityPayables
        )
    }

    /// Whether this line accepts user input.
    pub fn is_editable(self) -> bool {
        !self.is_computed()
    }

    /// The serialized semantic code for this line.
    pub fn code(self) -> &'static str {
        match self {
            BalanceLineCode::IntangibleAssets => "IMM_IMMATERIALI",
            BalanceLineCode::Buildings => "IMM_FABBRICATI",
            BalanceLineCode::Plant => "IMM_IMPIANTI",
            BalanceLineCode::Equipment => "IMM_ATTREZZATURE",
            BalanceLineCode::Furniture => "IMM_ARREDI",
            BalanceLineCode::FinancialAssets => "IMM_FINANZIARIE",
            BalanceLineCode::Inventory => "RIMANENZE",
            BalanceLineCode::TradeReceivables => "CRED_CLIENTI",
            BalanceLineCode::TaxReceivables => "CRED_TRIBUTARI",
            BalanceLineCode::OtherReceivables => "CRED_ALTRI",
            BalanceLineCode::CurrentFinancialAssets => "ATT_FINANZIARIE",
            BalanceLineCode::AccruedIncome => "RATEI_ATTIVI",
            BalanceLineCode::Cash => "CASSA",
            BalanceLineCode::Bank => "BANCA",
            BalanceLineCode::ShareCapital => "CAPITALE_SOCIALE",
            BalanceLineCode::Reserves => "RISERVE",
            BalanceLineCode::NetResult => "RISULTATO_ESERCIZIO",
            BalanceLineCode::Severance => "TFR",
            BalanceLineCode::OtherFunds => "FONDI_RISCHI",
            BalanceLineCode::TradePayables => "DEB_FORNITORI",
            BalanceLineCode::TaxPayables => "DEB_TRIBUTARI",
            BalanceLineCode::SocialSecurityPayables => "DEB_PREVIDENZIALI",
            BalanceLineCode::OtherPayables => "DEB_ALTRI",
            BalanceLineCode::BankBorrowings => "DEB_BANCHE",
            BalanceLineCode::AccruedLiabilities => "RATEI_PASSIVI",
        }
    }
}

/// A balance-sheet leaf value tagged by its origin.
///
/// `Computed` values come from the builder's formulas; `Editable` values
/// come from user input (default zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum BalanceEntry {
    /// Derived from upstream statement totals.
    Computed(Decimal),
    /// Free-form user input.
    Editable(Decimal),
}

impl BalanceEntry {
    /// The numeric value regardless of origin.
    pub fn value(self) -> Decimal {
        match self {
            BalanceEntry::Computed(v) | BalanceEntry::Editable(v) => v,
        }
    }
}

/// User-supplied values for the editable balance-sheet lines of one year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceOverrides {
    /// Override value per editable line code.
    pub values: BTreeMap<BalanceLineCode, Decimal>,
}

impl BalanceOverrides {
    /// The override for a line, defaulting to zero.
    pub fn get(&self, code: BalanceLineCode) -> Decimal {
        self.values.get(&code).copied().unwrap_or(Decimal::ZERO)
    }

    /// The first override that targets a derived line, if any.
    pub fn first_computed_target(&self) -> Option<BalanceLineCode> {
        self.values.keys().copied().find(|code| code.is_computed())
    }
}

/// A fully-populated balance-sheet snapshot for one tracked year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// The 1-based plan year of this snapshot.
    pub year: u32,
    /// Leaf entries keyed by line code.
    pub entries: BTreeMap<BalanceLineCode, BalanceEntry>,
}

impl BalanceSheet {
    /// The value of a leaf line, zero if absent.
    pub fn value(&self, code: BalanceLineCode) -> Decimal {
        self.entries
            .get(&code)
            .map(|entry| entry.value())
            .unwrap_or(Decimal::ZERO)
    }

    fn sum(&self, codes: &[BalanceLineCode]) -> Decimal {
        codes.iter().map(|&code| self.value(code)).sum()
    }

    /// `TOT_IMMOBILIZZAZIONI`: the six fixed-asset lines.
    pub fn total_fixed_assets(&self) -> Decimal {
        self.sum(&BalanceLineCode::FIXED_ASSETS)
    }

    /// `TOT_ATTIVO_CIRCOLANTE`: all current-asset lines.
    pub fn total_current_assets(&self) -> Decimal {
        self.sum(&BalanceLineCode::CURRENT_ASSETS)
    }

    /// `TOT_LIQUIDITA`: cash plus bank deposits.
    pub fn total_liquidity(&self) -> Decimal {
        self.sum(&BalanceLineCode::LIQUIDITY)
    }

    /// `TOT_ATTIVO`: fixed plus current assets.
    pub fn total_assets(&self) -> Decimal {
        self.total_fixed_assets() + self.total_current_assets()
    }

    /// `TOT_PATRIMONIO_NETTO`: equity lines.
    pub fn total_equity(&self) -> Decimal {
        self.sum(&BalanceLineCode::EQUITY)
    }

    /// `TOT_DEBITI`: debt lines.
    pub fn total_debts(&self) -> Decimal {
        self.sum(&BalanceLineCode::DEBTS)
    }

    /// `TOT_PASSIVO`: equity, funds and debts.
    pub fn total_liabilities_and_equity(&self) -> Decimal {
        self.total_equity() + self.sum(&BalanceLineCode::FUNDS) + self.total_debts()
    }

    /// Whether total assets equal total liabilities plus equity.
    ///
    /// Not enforced: an out-of-balance snapshot is surfaced as an audit
    /// warning by the builder.
    pub fn is_balanced(&self) -> bool {
        self.total_assets() == self.total_liabilities_and_equity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sheet_with(values: &[(BalanceLineCode, &str)]) -> BalanceSheet {
        let mut entries = BTreeMap::new();
        for &(code, value) in values {
            entries.insert(code, BalanceEntry::Editable(dec(value)));
        }
        BalanceSheet { year: 1, entries }
    }

    #[test]
    fn test_membership_lists_cover_every_leaf_once() {
        let mut seen: Vec<BalanceLineCode> = Vec::new();
        seen.extend(BalanceLineCode::FIXED_ASSETS);
        seen.extend(BalanceLineCode::CURRENT_ASSETS);
        seen.extend(BalanceLineCode::EQUITY);
        seen.extend(BalanceLineCode::FUNDS);
        seen.extend(BalanceLineCode::DEBTS);

        assert_eq!(seen.len(), BalanceLineCode::ALL.len());
        for code in BalanceLineCode::ALL {
            assert!(seen.contains(&code), "missing {:?}", code);
        }
    }

    #[test]
    fn test_subtotals_reflect_leaf_edits() {
        let sheet = sheet_with(&[
            (BalanceLineCode::Buildings, "100000"),
            (BalanceLineCode::Furniture, "20000"),
            (BalanceLineCode::Cash, "5000"),
            (BalanceLineCode::Bank, "15000"),
        ]);

        assert_eq!(sheet.total_fixed_assets(), dec("120000"));
        assert_eq!(sheet.total_liquidity(), dec("20000"));
        assert_eq!(sheet.total_current_assets(), dec("20000"));
        assert_eq!(sheet.total_assets(), dec("140000"));
    }

    #[test]
    fn test_balance_identity_reported_not_enforced() {
        let unbalanced = sheet_with(&[(BalanceLineCode::Cash, "1000")]);
        assert!(!unbalanced.is_balanced());

        let balanced = sheet_with(&[
            (BalanceLineCode::Cash, "1000"),
            (BalanceLineCode::ShareCapital, "1000"),
        ]);
        assert!(balanced.is_balanced());
    }

    #[test]
    fn test_computed_lines_reject_edits_via_classification() {
        assert!(BalanceLineCode::Cash.is_computed());
        assert!(BalanceLineCode::TradePayables.is_computed());
        assert!(BalanceLineCode::Buildings.is_editable());
        assert!(BalanceLineCode::ShareCapital.is_editable());

        let mut overrides = BalanceOverrides::default();
        overrides
            .values
            .insert(BalanceLineCode::Buildings, dec("100"));
        assert_eq!(overrides.first_computed_target(), None);

        overrides.values.insert(BalanceLineCode::Cash, dec("100"));
        assert_eq!(
            overrides.first_computed_target(),
            Some(BalanceLineCode::Cash)
        );
    }

    #[test]
    fn test_line_codes_serialize_to_semantic_keys() {
        let json = serde_json::to_string(&BalanceLineCode::Cash).unwrap();
        assert_eq!(json, "\"CASSA\"");
        let json = serde_json::to_string(&BalanceLineCode::TradePayables).unwrap();
        assert_eq!(json, "\"DEB_FORNITORI\"");

        for code in BalanceLineCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.code()));
        }
    }
}
