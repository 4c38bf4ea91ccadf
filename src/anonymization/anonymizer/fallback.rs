//! Transforms for selected columns that no category claimed

use super::masking::{
    format_amount, is_date_shaped, mask_phone, mask_ssn, round_to_step, shift_date,
    shift_date_text, MASKED_CARD, PLACEHOLDER_DATE,
};
use super::tokenization::TokenVault;
use crate::anonymization::config::AnonymizationMode;
use crate::anonymization::detector::ValueKind;
use crate::anonymization::models::CellValue;

const GENERIC_PREFIX: &str = "GEN";
const BANK_PREFIX: &str = "BANK";
const GENERIC_NUMBER_STEP: f64 = 10.0;
const GENERIC_DATE_SHIFT_DAYS: i64 = 30;

/// Replacement for a value whose shape was recognized by a detector
pub fn replace_detected(
    kind: ValueKind,
    column: usize,
    text: &str,
    vault: &mut TokenVault,
) -> String {
    match kind {
        ValueKind::Email => vault.email_for(column, text),
        ValueKind::Phone => mask_phone(text),
        ValueKind::Ssn => mask_ssn(text),
        ValueKind::CreditCard => MASKED_CARD.to_string(),
        ValueKind::BankAccount => vault.token_for(column, BANK_PREFIX, text),
    }
}

/// Shape-based fallback for any other non-blank cell
///
/// Numbers are wiped or rounded to the nearest ten, email-like text gets a
/// synthetic address, date-like text is wiped or shifted, and anything else
/// becomes a `GEN` token.
pub fn generic_replacement(
    mode: AnonymizationMode,
    column: usize,
    cell: &CellValue,
    vault: &mut TokenVault,
) -> String {
    let text = cell.to_string();
    let trimmed = text.trim();

    if let Some(number) = whole_number(cell, trimmed) {
        return match mode {
            AnonymizationMode::Strict => "***".to_string(),
            _ => format_amount(round_to_step(number, GENERIC_NUMBER_STEP), 0),
        };
    }

    if trimmed.contains('@') && trimmed.contains('.') {
        return vault.email_for(column, &text);
    }

    let date = match cell {
        CellValue::Date(date) => Some(shift_date(*date, GENERIC_DATE_SHIFT_DAYS)),
        _ if is_date_shaped(trimmed) => Some(shift_date_text(trimmed, GENERIC_DATE_SHIFT_DAYS)),
        _ => None,
    };
    if let Some(shifted) = date {
        return match mode {
            AnonymizationMode::Strict => PLACEHOLDER_DATE.to_string(),
            _ => shifted.unwrap_or_else(|| PLACEHOLDER_DATE.to_string()),
        };
    }

    vault.token_for(column, GENERIC_PREFIX, &text)
}

/// The cell as a number, when the whole value is numeric
fn whole_number(cell: &CellValue, trimmed: &str) -> Option<f64> {
    match cell {
        CellValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        CellValue::Text(_) => {
            let starts_numeric =
                trimmed.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'));
            if !starts_numeric {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn generic(mode: AnonymizationMode, cell: CellValue) -> String {
        let mut vault = TokenVault::new();
        generic_replacement(mode, 0, &cell, &mut vault)
    }

    #[test_case(AnonymizationMode::Strict, "1234", "***" ; "number strict")]
    #[test_case(AnonymizationMode::Contextual, "1234", "1230" ; "number contextual")]
    #[test_case(AnonymizationMode::Range, " 45.2 ", "50" ; "number with whitespace")]
    #[test_case(AnonymizationMode::Range, "a@b.co", "user0001@example.invalid" ; "email shaped")]
    #[test_case(AnonymizationMode::Strict, "2024-03-15", "1900-01-01" ; "date strict")]
    #[test_case(AnonymizationMode::Contextual, "2024-03-15", "2024-04-14" ; "date shifted")]
    #[test_case(AnonymizationMode::Contextual, "99/99/9999", "1900-01-01" ; "date shaped but invalid")]
    #[test_case(AnonymizationMode::Contextual, "Remote worker", "GEN0001" ; "text token")]
    #[test_case(AnonymizationMode::Contextual, "12 apples", "GEN0001" ; "numeric prefix is not a number")]
    fn test_generic_replacement(mode: AnonymizationMode, input: &str, expected: &str) {
        assert_eq!(generic(mode, CellValue::text(input)), expected);
    }

    #[test]
    fn test_generic_native_values() {
        assert_eq!(generic(AnonymizationMode::Contextual, CellValue::Number(87.0)), "90");
        assert_eq!(generic(AnonymizationMode::Strict, CellValue::Boolean(true)), "GEN0001");
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(generic(AnonymizationMode::Range, CellValue::Date(date)), "2024-04-14");
    }

    #[test]
    fn test_replace_detected() {
        let mut vault = TokenVault::new();
        assert_eq!(
            replace_detected(ValueKind::CreditCard, 0, "4111 1111 1111 1111", &mut vault),
            "****-****-****-1234"
        );
        assert_eq!(
            replace_detected(ValueKind::Ssn, 0, "123-45-6789", &mut vault),
            "***-**-6789"
        );
        assert_eq!(
            replace_detected(ValueKind::Phone, 0, "555.123.4567", &mut vault),
            "***-***-4567"
        );
        assert_eq!(
            replace_detected(ValueKind::BankAccount, 0, "000123456789", &mut vault),
            "BANK0001"
        );
        assert_eq!(
            replace_detected(ValueKind::Email, 0, "x@y.com", &mut vault),
            "user0001@example.invalid"
        );
    }
}
