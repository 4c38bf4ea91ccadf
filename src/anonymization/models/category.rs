//! Sensitivity categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sensitivity category of a spreadsheet column
///
/// Covers identity, organizational, financial, and equity-plan fields found in
/// HR exports. Variants are declared in detection order, which is the order the
/// classifier walks them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Employee names
    Name,
    /// Employee / worker / person identifiers
    EmpId,
    /// Grant, award, and option identifiers
    GrantId,
    /// Social Security Numbers
    Ssn,
    /// Tax identifiers (EIN, ITIN, TIN)
    TaxId,
    /// Tax amounts and withholding
    TaxValue,
    /// Salary, bonus, and other pay amounts
    Compensation,
    /// Email addresses and logins
    Email,
    /// Telephone numbers
    Phone,
    /// Street addresses
    Address,
    /// Bank account and routing numbers
    Bank,
    /// Dates of birth
    Dob,
    /// Visa, work permit, and passport data
    Visa,
    /// Gender, ethnicity, marital status
    Demographics,
    /// ESPP / purchase / vest transaction identifiers
    Transaction,
    /// Grant and award dates
    GrantDate,
    /// Vesting, exercise, and release dates
    VestDate,
    /// Option exercise / strike prices
    ExercisePrice,
    /// Fair market values
    Fmv,
    /// Share quantities
    Shares,
    /// Departments, divisions, teams
    Department,
    /// Managers and supervisors
    Manager,
    /// Cities
    City,
    /// States, provinces, regions
    State,
    /// ZIP and postal codes
    Zip,
}

impl Category {
    /// Every category, in detection order
    pub const ALL: [Category; 25] = [
        Self::Name,
        Self::EmpId,
        Self::GrantId,
        Self::Ssn,
        Self::TaxId,
        Self::TaxValue,
        Self::Compensation,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::Bank,
        Self::Dob,
        Self::Visa,
        Self::Demographics,
        Self::Transaction,
        Self::GrantDate,
        Self::VestDate,
        Self::ExercisePrice,
        Self::Fmv,
        Self::Shares,
        Self::Department,
        Self::Manager,
        Self::City,
        Self::State,
        Self::Zip,
    ];

    /// Precedence used to pick the transform for a field that carries more than
    /// one category after suppression.
    pub const DISPATCH_ORDER: [Category; 25] = [
        Self::Name,
        Self::EmpId,
        Self::GrantId,
        Self::Email,
        Self::Ssn,
        Self::Address,
        Self::City,
        Self::State,
        Self::Zip,
        Self::Phone,
        Self::Dob,
        Self::Compensation,
        Self::Department,
        Self::Manager,
        Self::Bank,
        Self::TaxId,
        Self::TaxValue,
        Self::Visa,
        Self::Demographics,
        Self::Transaction,
        Self::GrantDate,
        Self::VestDate,
        Self::ExercisePrice,
        Self::Fmv,
        Self::Shares,
    ];

    /// Stable identifier used in pattern libraries and reports
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::EmpId => "empId",
            Self::GrantId => "grantId",
            Self::Ssn => "ssn",
            Self::TaxId => "taxId",
            Self::TaxValue => "taxValue",
            Self::Compensation => "compensation",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Bank => "bank",
            Self::Dob => "dob",
            Self::Visa => "visa",
            Self::Demographics => "demographics",
            Self::Transaction => "transaction",
            Self::GrantDate => "grantDate",
            Self::VestDate => "vestDate",
            Self::ExercisePrice => "exercisePrice",
            Self::Fmv => "fmv",
            Self::Shares => "shares",
            Self::Department => "department",
            Self::Manager => "manager",
            Self::City => "city",
            Self::State => "state",
            Self::Zip => "zip",
        }
    }

    /// Position in [`Category::DISPATCH_ORDER`]
    pub fn dispatch_rank(&self) -> usize {
        Self::DISPATCH_ORDER
            .iter()
            .position(|c| c == self)
            .unwrap_or(usize::MAX)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when parsing an unknown category identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_category_lists_are_complete() {
        let all: HashSet<_> = Category::ALL.iter().collect();
        let dispatch: HashSet<_> = Category::DISPATCH_ORDER.iter().collect();
        assert_eq!(all.len(), 25);
        assert_eq!(all, dispatch);
    }

    #[test]
    fn test_parse_category() {
        assert_eq!("empId".parse::<Category>().unwrap(), Category::EmpId);
        assert_eq!("GRANTDATE".parse::<Category>().unwrap(), Category::GrantDate);
        assert!("salary".parse::<Category>().is_err());
    }

    #[test]
    fn test_key_round_trip_serde() {
        let json = serde_json::to_string(&Category::ExercisePrice).unwrap();
        assert_eq!(json, "\"exercisePrice\"");
    }

    #[test]
    fn test_dispatch_rank() {
        assert!(Category::Name.dispatch_rank() < Category::EmpId.dispatch_rank());
        assert!(Category::Ssn.dispatch_rank() < Category::TaxValue.dispatch_rank());
    }
}
