//! Deterministic per-run tokenization

use std::collections::HashMap;

/// Domain used for synthetic email addresses
pub const SYNTHETIC_EMAIL_DOMAIN: &str = "example.invalid";

/// Counter prefix for synthetic email addresses
const EMAIL_PREFIX: &str = "EML";

/// Per-run token state: one dictionary per column and one counter per prefix
///
/// Within a column, the same value (compared case-insensitively) always maps
/// to the same replacement. Counters are shared by every column using the same
/// prefix, so two columns never hand out the same token for different values.
/// A vault lives for exactly one anonymization run.
#[derive(Debug, Default)]
pub struct TokenVault {
    dictionaries: HashMap<usize, HashMap<String, String>>,
    counters: HashMap<String, u32>,
}

impl TokenVault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for `value` in `column`, e.g. `EMP0001`
    pub fn token_for(&mut self, column: usize, prefix: &str, value: &str) -> String {
        self.lookup_or_insert(column, value, |vault| {
            let n = vault.next_counter(prefix);
            format!("{prefix}{n:04}")
        })
    }

    /// Synthetic address for `value` in `column`, e.g. `user0001@example.invalid`
    pub fn email_for(&mut self, column: usize, value: &str) -> String {
        self.lookup_or_insert(column, value, |vault| {
            let n = vault.next_counter(EMAIL_PREFIX);
            format!("user{n:04}@{SYNTHETIC_EMAIL_DOMAIN}")
        })
    }

    /// Last counter value handed out for `prefix`
    pub fn counter(&self, prefix: &str) -> u32 {
        self.counters.get(prefix).copied().unwrap_or(0)
    }

    /// Number of distinct values replaced in `column`
    pub fn dictionary_len(&self, column: usize) -> usize {
        self.dictionaries.get(&column).map(HashMap::len).unwrap_or(0)
    }

    fn lookup_or_insert<F>(&mut self, column: usize, value: &str, make: F) -> String
    where
        F: FnOnce(&mut Self) -> String,
    {
        let key = value.to_lowercase();
        if let Some(existing) = self
            .dictionaries
            .get(&column)
            .and_then(|dictionary| dictionary.get(&key))
        {
            return existing.clone();
        }

        let replacement = make(self);
        self.dictionaries
            .entry(column)
            .or_default()
            .insert(key, replacement.clone());
        replacement
    }

    fn next_counter(&mut self, prefix: &str) -> u32 {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }
}
