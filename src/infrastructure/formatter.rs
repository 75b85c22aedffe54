use chrono::{Datelike, NaiveDate};

/// Turns a date into display text. Must be deterministic.
pub trait DateFormatter {
    fn format(&self, date: NaiveDate) -> String;
}

/// `Jan 1, 100 BC` / `Jul 14, 1789 AD`
#[derive(Debug, Clone, Copy, Default)]
pub struct EraDateFormatter;

impl DateFormatter for EraDateFormatter {
    fn format(&self, date: NaiveDate) -> String {
        let (year, era) = if date.year() <= 0 {
            (1 - date.year(), "BC")
        } else {
            (date.year(), "AD")
        };
        format!("{} {}, {} {}", date.format("%b"), date.day(), year, era)
    }
}

/// ISO 8601 with signed astronomical years, e.g. `-0099-01-01`
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoDateFormatter;

impl DateFormatter for IsoDateFormatter {
    fn format(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    #[default]
    Era,
    Iso,
}

impl DateStyle {
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "iso" => Self::Iso,
            _ => Self::Era,
        }
    }

    pub fn formatter(self) -> Box<dyn DateFormatter> {
        match self {
            Self::Era => Box::new(EraDateFormatter),
            Self::Iso => Box::new(IsoDateFormatter),
        }
    }
}
