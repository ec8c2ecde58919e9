//! History filter controls.

use alertdesk_core::{AlertFilter, Error, Result, Severity};
use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;

/// Raw values of the history filter controls.
///
/// Dates are calendar days as picked by the user; they become instants only
/// when converted with [`HistoryControls::to_filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryControls {
    pub severity: Option<Severity>,
    pub source: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl HistoryControls {
    /// Creates controls with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_start_date(mut self, start_date: Date) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: Date) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Converts the controls into a backend filter.
    ///
    /// Each date becomes the instant of midnight at the start of that day in
    /// `time_zone`. An empty source counts as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`](alertdesk_core::ErrorKind) if a
    /// date cannot be placed in the time zone.
    pub fn to_filter(&self, time_zone: &TimeZone) -> Result<AlertFilter> {
        let mut filter = AlertFilter::new();
        filter.severity = self.severity;
        filter.source = self.source.clone().filter(|source| !source.is_empty());
        filter.start_date = self
            .start_date
            .map(|date| local_midnight(date, time_zone))
            .transpose()?;
        filter.end_date = self
            .end_date
            .map(|date| local_midnight(date, time_zone))
            .transpose()?;
        Ok(filter)
    }
}

fn local_midnight(date: Date, time_zone: &TimeZone) -> Result<Timestamp> {
    date.to_zoned(time_zone.clone())
        .map(|zoned| zoned.timestamp())
        .map_err(|e| {
            Error::invalid_input()
                .with_message(format!("cannot place {date} in the local time zone"))
                .with_source(e)
        })
}
