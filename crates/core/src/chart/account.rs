//! Account code parsing and classification.

use serde::{Deserialize, Serialize};

/// Account classification derived from the leading digit of the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// `1.x` accounts.
    Asset,
    /// `2.x` accounts.
    Liability,
    /// `3.x` accounts.
    Equity,
    /// `4.x` accounts.
    Income,
    /// `5.x` (expenses) and `6.x` (costs) accounts.
    Expense,
    /// Anything else, including memorandum accounts.
    Other,
}

impl AccountType {
    /// Classifies an account code by its first digit.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim_start().chars().next() {
            Some('1') => Self::Asset,
            Some('2') => Self::Liability,
            Some('3') => Self::Equity,
            Some('4') => Self::Income,
            Some('5' | '6') => Self::Expense,
            _ => Self::Other,
        }
    }

    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Other => "OTHER",
        }
    }

    /// Returns true for accounts that close into equity at year end.
    #[must_use]
    pub const fn is_profit_and_loss(&self) -> bool {
        matches!(self, Self::Income | Self::Expense)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry of the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Hierarchical dotted (`1.1.02`) or flat (`110201`) code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Depth in the hierarchy, 1 for top-level codes.
    pub level: i32,
    /// Classification derived from the leading digit.
    pub account_type: AccountType,
    /// Code of the parent account, if any.
    pub parent_code: Option<String>,
}

impl Account {
    /// Builds an account, deriving level, type and parent from the code.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into().trim().to_string();
        let level = code.split('.').count() as i32;
        let parent_code = code.rsplit_once('.').map(|(parent, _)| parent.to_string());

        Self {
            account_type: AccountType::from_code(&code),
            code,
            name: name.into(),
            level,
            parent_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.1.02", AccountType::Asset)]
    #[case("2.1", AccountType::Liability)]
    #[case("3", AccountType::Equity)]
    #[case("4.1.01", AccountType::Income)]
    #[case("5.2.10", AccountType::Expense)]
    #[case("6.1", AccountType::Expense)]
    #[case("9.9", AccountType::Other)]
    #[case("", AccountType::Other)]
    #[case("X-100", AccountType::Other)]
    fn test_account_type_from_code(#[case] code: &str, #[case] expected: AccountType) {
        assert_eq!(AccountType::from_code(code), expected);
    }

    #[test]
    fn test_dotted_account_hierarchy() {
        let account = Account::new("1.1.02", "Bancos");
        assert_eq!(account.level, 3);
        assert_eq!(account.parent_code.as_deref(), Some("1.1"));
        assert_eq!(account.account_type, AccountType::Asset);
        assert_eq!(account.name, "Bancos");
    }

    #[test]
    fn test_flat_account_has_no_parent() {
        let account = Account::new("410101", "Ingresos");
        assert_eq!(account.level, 1);
        assert_eq!(account.parent_code, None);
        assert_eq!(account.account_type, AccountType::Income);
    }

    #[test]
    fn test_code_is_trimmed() {
        let account = Account::new("  2.1 ", "Proveedores");
        assert_eq!(account.code, "2.1");
        assert_eq!(account.parent_code.as_deref(), Some("2"));
    }

    #[test]
    fn test_profit_and_loss_types() {
        assert!(AccountType::Income.is_profit_and_loss());
        assert!(AccountType::Expense.is_profit_and_loss());
        assert!(!AccountType::Asset.is_profit_and_loss());
        assert!(!AccountType::Equity.is_profit_and_loss());
    }
}
