//! Loan draft and the loan period rule
//!
//! A loan may only be submitted when both dates are set, the end date is
//! strictly after the start date and the span is at most [`MAX_LOAN_DAYS`].

use super::entity::{Client, Game, Loan};
use chrono::NaiveDate;

/// Longest allowed loan span, in days
pub const MAX_LOAN_DAYS: i64 = 14;

/// Inline message shown while the date range is not acceptable
pub const DATE_RANGE_MESSAGE: &str = "El periodo de préstamo no puede ser mayor a 14 días.";

/// Why a start/end pair was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeError {
    /// One or both dates are not set
    Missing,
    /// End date is on or before the start date
    EndNotAfterStart,
    /// Span exceeds the maximum loan period
    TooLong { days: i64 },
}

/// Check the date-range half of the loan validity predicate
pub fn check_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), DateRangeError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(DateRangeError::Missing);
    };
    if end <= start {
        return Err(DateRangeError::EndNotAfterStart);
    }
    let days = (end - start).num_days();
    if days > MAX_LOAN_DAYS {
        return Err(DateRangeError::TooLong { days });
    }
    Ok(())
}

/// Parse a date typed by the user. Accepts `YYYY-MM-DD` and `DD/MM/YYYY`.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .ok()
}

/// In-progress loan held by the creation dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanDraft {
    pub id: String,
    pub game: Option<Game>,
    pub client: Option<Client>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl LoanDraft {
    /// Pre-populate a draft from an existing loan
    pub fn from_loan(loan: &Loan) -> Self {
        Self {
            id: loan.id.clone(),
            game: loan.game.clone(),
            client: loan.client.clone(),
            start_date: Some(loan.start_date),
            end_date: Some(loan.end_date),
        }
    }

    pub fn date_range(&self) -> Result<(), DateRangeError> {
        check_date_range(self.start_date, self.end_date)
    }

    pub fn is_date_range_valid(&self) -> bool {
        self.date_range().is_ok()
    }

    /// Full validity predicate: every field set and the date range accepted
    pub fn is_valid(&self) -> bool {
        self.game.is_some() && self.client.is_some() && self.is_date_range_valid()
    }

    /// Build the loan handed back on confirm. The id is always blank, so
    /// confirming a pre-populated draft submits a new loan.
    pub fn to_submission(&self) -> Option<Loan> {
        if !self.is_valid() {
            return None;
        }
        Some(Loan {
            id: String::new(),
            game: self.game.clone(),
            client: self.client.clone(),
            start_date: self.start_date?,
            end_date: self.end_date?,
        })
    }
}
