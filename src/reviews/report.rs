//! Rating report
//!
//! Plain-text rendering of a rating summary: average, total, and a histogram row per star.

use std::io;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::reviews::summary::RatingSummary;

const BAR_WIDTH: u32 = 20;

/// Errors that can occur when writing a rating report.
#[derive(Debug, Error)]
pub enum RatingReportError {
    /// Failed to write to the output.
    #[error("failed to write rating report")]
    Io(#[source] io::Error),
}

/// Renders a [`RatingSummary`].
#[derive(Debug)]
pub struct RatingReport<'a> {
    summary: &'a RatingSummary,
}

impl<'a> RatingReport<'a> {
    /// Create a report for the given summary.
    pub fn new(summary: &'a RatingSummary) -> Self {
        Self { summary }
    }

    /// Write the report to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`RatingReportError::Io`] if the output fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), RatingReportError> {
        if self.summary.is_empty() {
            return writeln!(out, "No ratings yet").map_err(RatingReportError::Io);
        }

        writeln!(
            out,
            "{} out of 5 ({} rating{})",
            self.summary.average().round_dp(1),
            self.summary.total(),
            if self.summary.total() == 1 { "" } else { "s" }
        )
        .map_err(RatingReportError::Io)?;

        let mut builder = Builder::default();

        for entry in self.summary.distribution() {
            let share = self.summary.percentage(entry.star) * Decimal::ONE;

            builder.push_record([
                format!("{} ★", entry.star),
                bar(share),
                entry.count.to_string(),
                format!("{}%", (share * Decimal::ONE_HUNDRED).round_dp(0)),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::blank());
        table.modify(Columns::new(2..4), Alignment::right());

        writeln!(out, "{table}").map_err(RatingReportError::Io)
    }
}

/// Histogram bar for a fractional share.
fn bar(share: Decimal) -> String {
    let filled = (share * Decimal::from(BAR_WIDTH))
        .round_dp(0)
        .to_usize()
        .unwrap_or_default();

    let width = usize::try_from(BAR_WIDTH).unwrap_or_default();

    format!(
        "{}{}",
        "█".repeat(filled.min(width)),
        "░".repeat(width.saturating_sub(filled))
    )
}
