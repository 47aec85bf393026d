// Contract-expiry parsing: years left on a deal from free-text expiry dates.

use chrono::Datelike;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Years remaining on a player's contract.
///
/// `Unknown` is distinct from `Years(0)`: a deal expiring this year is known
/// to be in its last months, a blank cell tells us nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractTerm {
    Years(u32),
    Unknown,
}

impl ContractTerm {
    pub fn years(&self) -> Option<u32> {
        match self {
            ContractTerm::Years(y) => Some(*y),
            ContractTerm::Unknown => None,
        }
    }
}

impl fmt::Display for ContractTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractTerm::Years(y) => write!(f, "+{y}"),
            ContractTerm::Unknown => write!(f, "+?"),
        }
    }
}

/// ASCII digits only: `\d` would also match other scripts' digits.
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20[0-9]{2}").expect("year pattern is valid"));

/// Find the first `20dd` year anywhere in the text.
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Years left on a contract given its expiry text, relative to `current_year`.
///
/// Expired deals clamp to zero. Text without a recognisable year yields
/// `ContractTerm::Unknown` rather than an error.
pub fn contract_years(text: &str, current_year: i32) -> ContractTerm {
    match extract_year(text.trim()) {
        Some(year) => ContractTerm::Years((year - current_year).max(0) as u32),
        None => ContractTerm::Unknown,
    }
}

/// `contract_years` against the local calendar year.
pub fn contract_years_today(text: &str) -> ContractTerm {
    contract_years(text, chrono::Local::now().year())
}

/// Display classification of a player's contract situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    OnLoan,
    OutOfContract,
    FinalYear,
    Contracted,
}

impl ContractStatus {
    /// Loan status wins over the contract term.
    pub fn classify(term: ContractTerm, on_loan: bool) -> Self {
        if on_loan {
            return ContractStatus::OnLoan;
        }
        match term {
            ContractTerm::Years(0) => ContractStatus::OutOfContract,
            ContractTerm::Years(1) => ContractStatus::FinalYear,
            _ => ContractStatus::Contracted,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContractStatus::OnLoan => "On Loan",
            ContractStatus::OutOfContract => "Out of Contract",
            ContractStatus::FinalYear => "Final Year",
            ContractStatus::Contracted => "Contracted",
        }
    }
}
