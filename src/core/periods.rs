//! Period labels (`YYYY/MM`) and chronological column ordering

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// A fiscal period parsed from a `YYYY/MM` column label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

/// Parse a `YYYY/MM` label. The month may be written with one digit.
pub fn parse_period(label: &str) -> Option<Period> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    // chrono has no year-month type, pin the day to the first
    let date = NaiveDate::parse_from_str(&format!("{}/01", label), "%Y/%m/%d").ok()?;
    Some(Period {
        year: date.year(),
        month: date.month(),
    })
}

/// Index permutation that puts `labels` in chronological order.
///
/// The sort is stable, so labels naming the same month keep their relative
/// order. Returns the first label that is not a `YYYY/MM` date as the error.
pub fn chronological_order<S: AsRef<str>>(labels: &[S]) -> Result<Vec<usize>, String> {
    let mut keyed = Vec::with_capacity(labels.len());
    for (idx, label) in labels.iter().enumerate() {
        let label = label.as_ref();
        let period = parse_period(label).ok_or_else(|| label.to_string())?;
        keyed.push((period, idx));
    }

    keyed.sort_by_key(|(period, _)| *period);
    Ok(keyed.into_iter().map(|(_, idx)| idx).collect())
}
