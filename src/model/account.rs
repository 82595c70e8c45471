use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pricing tier. Controls which rules-table price column applies and
/// whether VAT is charged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum AccountType {
    #[serde(rename = "Internal")]
    Internal,
    #[serde(rename = "External Academic")]
    ExternalAcademic,
    #[serde(rename = "External Commercial")]
    ExternalCommercial,
}

pub const VAT_RATE: f64 = 0.2;

impl AccountType {
    pub const ALL: [AccountType; 3] = [
        AccountType::Internal,
        AccountType::ExternalAcademic,
        AccountType::ExternalCommercial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AccountType::Internal => "Internal",
            AccountType::ExternalAcademic => "External Academic",
            AccountType::ExternalCommercial => "External Commercial",
        }
    }

    pub fn price_column(self) -> String {
        format!("{} Price", self.label())
    }

    pub fn vat_liable(self) -> bool {
        !matches!(self, AccountType::Internal)
    }

    pub fn vat_rate(self) -> f64 {
        if self.vat_liable() { VAT_RATE } else { 0.0 }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        AccountType::ALL
            .into_iter()
            .find(|a| a.label().to_ascii_lowercase() == key)
            .ok_or_else(|| format!("unknown account type: {}", s.trim()))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/account.rs"]
mod tests;
