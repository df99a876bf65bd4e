use chrono::{Local, NaiveDateTime};

use crate::error::{MoliyaError, Result};
use crate::models::{Kind, NewTransaction};

/// Stored timestamp layout. Sorts correctly as plain text.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Raw entry-form fields as the user typed them.
#[derive(Debug, Clone)]
pub struct TransactionForm {
    pub amount: String,
    pub kind: Kind,
    pub category: Option<String>,
    pub note: String,
}

impl TransactionForm {
    /// Check the fields and stamp the entry with the current local time.
    pub fn validate(&self) -> Result<NewTransaction> {
        self.validate_at(now_stamp())
    }

    /// Same as [`validate`](Self::validate) with an explicit timestamp.
    pub fn validate_at(&self, date: String) -> Result<NewTransaction> {
        if self.amount.trim().is_empty() {
            return Err(MoliyaError::Validation("Enter an amount".to_string()));
        }
        let category = match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => return Err(MoliyaError::Validation("Choose a category".to_string())),
        };
        let amount = parse_amount(&self.amount)?;

        Ok(NewTransaction {
            date,
            kind: self.kind,
            category,
            amount,
            note: self.note.trim().to_string(),
        })
    }
}

/// Numeric check only: zero and negative values are let through.
pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoliyaError::Validation("Enter an amount".to_string()));
    }
    let invalid = || MoliyaError::Validation(format!("Invalid amount: {trimmed}"));
    let plain = strip_grouping(trimmed).ok_or_else(invalid)?;
    match plain.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid()),
    }
}

// Thousands separators must sit every three digits: 1,250,000.50
fn strip_grouping(input: &str) -> Option<String> {
    if !input.contains(',') {
        return Some(input.to_string());
    }
    let (sign, rest) = match input.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", input.strip_prefix('+').unwrap_or(input)),
    };
    let (int_part, frac) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let groups: Vec<&str> = int_part.split(',').collect();
    let grouped = (1..=3).contains(&groups[0].len())
        && groups[1..].iter().all(|g| g.len() == 3)
        && groups.iter().all(|g| g.chars().all(|c| c.is_ascii_digit()));
    if !grouped {
        return None;
    }
    let mut plain = format!("{sign}{}", groups.concat());
    if let Some(f) = frac {
        plain.push('.');
        plain.push_str(f);
    }
    Some(plain)
}

pub fn now_stamp() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// Accept a user-supplied timestamp only in the stored layout.
pub fn parse_date(input: &str) -> Result<String> {
    let trimmed = input.trim();
    NaiveDateTime::parse_from_str(trimmed, DATE_FORMAT)
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .map_err(|_| {
            MoliyaError::Validation(format!("Invalid date: {trimmed} (expected YYYY-MM-DD HH:MM)"))
        })
}
