//! Regex-based detectors for PII-shaped values in unclassified columns
//!
//! Detectors run in a fixed order (email, phone, SSN, credit card, bank
//! account) and the first one that fires wins, so a cell gets at most one
//! regex-driven transform.

use crate::anonymization::detector::header::normalize_header;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const EMAIL_PATTERN: &str = r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b";
const PHONE_PATTERN: &str = r"\b(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b";
const SSN_PATTERN: &str = r"\b\d{3}-\d{2}-\d{4}\b";
const CREDIT_CARD_PATTERN: &str = r"\b\d{4}[-\s]?(?:\d{4}[-\s]?){2}\d{1,4}\b";
const BANK_ACCOUNT_PATTERN: &str = r"\b\d{8,17}\b";

/// Header terms that allow the bank-account heuristic to fire
const BANK_HEADER_TERMS: [&str; 4] = ["bank", "account", "routing", "iban"];

/// Shape of a detected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `local@domain.tld`
    Email,
    /// North-American phone number
    Phone,
    /// `###-##-####`
    Ssn,
    /// 13 to 16 digits in groups of four
    CreditCard,
    /// 8 to 17 consecutive digits under a bank-like header
    BankAccount,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Ssn => "ssn",
            Self::CreditCard => "credit_card",
            Self::BankAccount => "bank_account",
        };
        f.write_str(label)
    }
}

/// Ordered set of value-shape detectors
pub struct ValuePatternMatcher {
    detectors: Vec<(ValueKind, Regex)>,
}

impl ValuePatternMatcher {
    /// Compile the built-in detectors
    pub fn new() -> Result<Self, regex::Error> {
        let detectors = vec![
            (ValueKind::Email, Regex::new(EMAIL_PATTERN)?),
            (ValueKind::Phone, Regex::new(PHONE_PATTERN)?),
            (ValueKind::Ssn, Regex::new(SSN_PATTERN)?),
            (ValueKind::CreditCard, Regex::new(CREDIT_CARD_PATTERN)?),
            (ValueKind::BankAccount, Regex::new(BANK_ACCOUNT_PATTERN)?),
        ];
        Ok(Self { detectors })
    }

    /// Detector order
    pub fn priority(&self) -> Vec<ValueKind> {
        self.detectors.iter().map(|(kind, _)| *kind).collect()
    }

    /// First detector that fires on `value`, if any
    ///
    /// The bank-account heuristic only fires when `header` mentions a bank,
    /// account, routing, or IBAN term.
    pub fn detect(&self, value: &str, header: &str) -> Option<ValueKind> {
        let (kind, _) = self
            .detectors
            .iter()
            .find(|(_, regex)| regex.is_match(value))?;

        if *kind == ValueKind::BankAccount && !Self::is_bank_header(header) {
            return None;
        }
        Some(*kind)
    }

    fn is_bank_header(header: &str) -> bool {
        let normalized = normalize_header(header);
        BANK_HEADER_TERMS
            .iter()
            .any(|term| normalized.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("jdoe@corp.com", Some(ValueKind::Email) ; "email")]
    #[test_case("Contact: JANE.DOE@Example.ORG", Some(ValueKind::Email) ; "embedded email")]
    #[test_case("(555) 123-4567", Some(ValueKind::Phone) ; "phone with parens")]
    #[test_case("+1 555.123.4567", Some(ValueKind::Phone) ; "phone with country code")]
    #[test_case("123-45-6789", Some(ValueKind::Ssn) ; "ssn")]
    #[test_case("4111-1111-1111-1111", Some(ValueKind::CreditCard) ; "card with dashes")]
    #[test_case("4111 1111 1111 1", Some(ValueKind::CreditCard) ; "thirteen digit card")]
    #[test_case("hello world", None ; "plain text")]
    #[test_case("12345678", None ; "digits without bank header")]
    fn test_detect(value: &str, expected: Option<ValueKind>) {
        let matcher = ValuePatternMatcher::new().unwrap();
        assert_eq!(matcher.detect(value, "Notes"), expected);
    }

    #[test]
    fn test_bank_heuristic_requires_header() {
        let matcher = ValuePatternMatcher::new().unwrap();
        assert_eq!(
            matcher.detect("12345678", "Primary Acct / Routing"),
            Some(ValueKind::BankAccount)
        );
        assert_eq!(
            matcher.detect("000123456789", "Payroll Account"),
            Some(ValueKind::BankAccount)
        );
        assert_eq!(matcher.detect("000123456789", "Reference"), None);
    }

    #[test]
    fn test_priority_is_fixed() {
        let matcher = ValuePatternMatcher::new().unwrap();
        assert_eq!(
            matcher.priority(),
            vec![
                ValueKind::Email,
                ValueKind::Phone,
                ValueKind::Ssn,
                ValueKind::CreditCard,
                ValueKind::BankAccount
            ]
        );
    }

    #[test]
    fn test_email_wins_over_phone() {
        let matcher = ValuePatternMatcher::new().unwrap();
        assert_eq!(
            matcher.detect("5551234567@sms.example.com", "Notes"),
            Some(ValueKind::Email)
        );
    }
}
