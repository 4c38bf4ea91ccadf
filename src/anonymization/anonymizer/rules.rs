//! Transform rule table: what each category does to a cell in each mode

use super::masking::{
    format_amount, mask_phone, mask_ssn, parse_amount, round_to_step, salary_band,
    shift_date, shift_date_text, MASKED_ZIP, PLACEHOLDER_DATE,
};
use super::tokenization::TokenVault;
use crate::anonymization::config::AnonymizationMode;
use crate::anonymization::models::{CellValue, Category};

/// Numeric rounding rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRule {
    /// Written in strict mode and whenever the value does not parse
    pub placeholder: &'static str,
    /// Rounding step outside strict mode
    pub step: f64,
    /// Decimals in the rendered result
    pub decimals: usize,
    /// Whether range mode buckets the value into salary bands
    pub banded: bool,
}

/// Per-category transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformRule {
    /// Deterministic `<PREFIX>####` token in every mode
    Tokenize { prefix: &'static str },
    /// Deterministic `user####@example.invalid` in every mode
    SyntheticEmail,
    /// `***-**-<last4>`
    MaskSsn,
    /// `***-***-<last4>`
    MaskPhone,
    /// Token in strict mode, otherwise `label`
    Generalize {
        prefix: &'static str,
        label: &'static str,
    },
    /// Two-letter state handling
    State,
    /// Constant replacement
    Fixed(&'static str),
    /// Placeholder date in strict mode, otherwise shift by `offset_days`
    DateShift { offset_days: i64 },
    /// Placeholder in strict mode, otherwise round (or band)
    Numeric(NumericRule),
}

const STATE_PREFIX: &str = "ST";
const STATE_LABEL: &str = "State";

/// Rule applied to cells of a column whose primary category is `category`
pub fn rule_for(category: Category) -> TransformRule {
    use TransformRule::*;

    match category {
        Category::Name => Tokenize { prefix: "EMP" },
        Category::EmpId => Tokenize { prefix: "EID" },
        Category::GrantId => Tokenize { prefix: "GRT" },
        Category::Email => SyntheticEmail,
        Category::Ssn => MaskSsn,
        Category::Phone => MaskPhone,
        Category::Address => Generalize {
            prefix: "ADR",
            label: "Address",
        },
        Category::City => Tokenize { prefix: "CTY" },
        Category::State => State,
        Category::Zip => Fixed(MASKED_ZIP),
        Category::Dob => DateShift { offset_days: 90 },
        Category::GrantDate | Category::VestDate => DateShift { offset_days: 30 },
        Category::Compensation => Numeric(NumericRule {
            placeholder: "***,***",
            step: 100.0,
            decimals: 0,
            banded: true,
        }),
        Category::TaxValue | Category::Shares => Numeric(NumericRule {
            placeholder: "***",
            step: 100.0,
            decimals: 0,
            banded: false,
        }),
        Category::ExercisePrice | Category::Fmv => Numeric(NumericRule {
            placeholder: "***.**",
            step: 1.0,
            decimals: 2,
            banded: false,
        }),
        Category::Department => Tokenize { prefix: "DEP" },
        Category::Manager => Tokenize { prefix: "MGR" },
        Category::Bank => Tokenize { prefix: "BANK" },
        Category::TaxId => Tokenize { prefix: "TAX" },
        Category::Visa => Tokenize { prefix: "VISA" },
        Category::Demographics => Tokenize { prefix: "DEMO" },
        Category::Transaction => Tokenize { prefix: "TRANS" },
    }
}

impl TransformRule {
    /// Apply the rule to a non-blank cell
    pub fn apply(
        &self,
        mode: AnonymizationMode,
        column: usize,
        cell: &CellValue,
        vault: &mut TokenVault,
    ) -> String {
        let text = cell.to_string();

        match *self {
            Self::Tokenize { prefix } => vault.token_for(column, prefix, &text),
            Self::SyntheticEmail => vault.email_for(column, &text),
            Self::MaskSsn => mask_ssn(&text),
            Self::MaskPhone => mask_phone(&text),
            Self::Generalize { prefix, label } => match mode {
                AnonymizationMode::Strict => vault.token_for(column, prefix, &text),
                _ => label.to_string(),
            },
            Self::State => apply_state(mode, column, &text, vault),
            Self::Fixed(value) => value.to_string(),
            Self::DateShift { offset_days } => apply_date_shift(mode, cell, offset_days),
            Self::Numeric(rule) => apply_numeric(mode, cell, &rule),
        }
    }
}

fn apply_state(mode: AnonymizationMode, column: usize, text: &str, vault: &mut TokenVault) -> String {
    if mode == AnonymizationMode::Strict {
        return vault.token_for(column, STATE_PREFIX, text);
    }

    let upper = text.trim().to_uppercase();
    let is_code = upper.chars().count() == 2 && upper.chars().all(|c| c.is_ascii_alphabetic());

    match mode {
        AnonymizationMode::Contextual if is_code => upper,
        _ if upper.chars().count() > 2 => STATE_LABEL.to_string(),
        _ => upper,
    }
}

fn apply_date_shift(mode: AnonymizationMode, cell: &CellValue, offset_days: i64) -> String {
    if mode == AnonymizationMode::Strict {
        return PLACEHOLDER_DATE.to_string();
    }

    let shifted = match cell {
        CellValue::Date(date) => shift_date(*date, offset_days),
        other => shift_date_text(&other.to_string(), offset_days),
    };
    shifted.unwrap_or_else(|| PLACEHOLDER_DATE.to_string())
}

fn apply_numeric(mode: AnonymizationMode, cell: &CellValue, rule: &NumericRule) -> String {
    if mode == AnonymizationMode::Strict {
        return rule.placeholder.to_string();
    }

    let amount = match cell {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        other => parse_amount(&other.to_string()),
    };
    let Some(amount) = amount else {
        return rule.placeholder.to_string();
    };

    if mode == AnonymizationMode::Range && rule.banded {
        return salary_band(amount).to_string();
    }

    format_amount(round_to_step(amount, rule.step), rule.decimals)
}
