use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, TimeZone, Utc};

use super::{AsHtml, LinkResolver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Date {
    value: DateTime<FixedOffset>,
}
impl Date {
    pub fn new(value: DateTime<FixedOffset>) -> Self {
        Self { value }
    }
    /// A calendar day, taken as midnight UTC.
    pub fn from_day(day: NaiveDate) -> Self {
        let midnight = day.and_time(chrono::NaiveTime::MIN);
        Self {
            value: Utc.from_utc_datetime(&midnight).fixed_offset(),
        }
    }
    pub fn value(&self) -> &DateTime<FixedOffset> {
        &self.value
    }
    /// ISO-8601 with millisecond precision, `Z` for UTC.
    pub fn iso8601(&self) -> String {
        self.value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.iso8601())
    }
}
impl AsHtml for Date {
    fn as_html(&self, _resolver: &dyn LinkResolver) -> String {
        format!("<time>{}</time>", self.iso8601())
    }
}
