//! Natural language period parsing.
//!
//! Resolves expressions such as:
//! - Years: `1789`, `44 BC`, `AD 79`
//! - Months and days: `March 1789`, `14 July 1789`, `July 14, 1789`, `1789-07-14`
//! - Decades, centuries, millennia: `1780s`, `1st century BC`, `2nd millennium`
//! - Modifiers: `early 19th century`, `mid-1789`, `first half of the 20th century`
//! - Ranges: `mid 1789 to 1799`, `100 to 50 BC`, `1914-18`, `between 1789 and 1799`
//!
//! Years are astronomical (1 BC is year 0) on the proleptic Gregorian calendar.

use crate::entities::{DateRange, Interpretation};
use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};
use std::str::FromStr;
use std::sync::OnceLock;

/// Resolves free text into a date range.
///
/// Implementations must be pure and total: the same text always gives the
/// same answer, and text that makes no sense is [`Interpretation::Unresolved`].
pub trait Interpreter {
    fn interpret(&self, text: &str) -> Interpretation;
}

/// The built-in English period interpreter
#[derive(Debug, Clone, Copy, Default)]
pub struct Epochizer;

impl Epochizer {
    pub fn new() -> Self {
        Self
    }
}

impl Interpreter for Epochizer {
    fn interpret(&self, text: &str) -> Interpretation {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Interpretation::Unresolved;
        }

        let range = parse_single(&normalized).or_else(|| parse_range(&normalized));
        log::trace!("Interpreted {:?} as {:?}", text, range);
        range.into()
    }
}

const MONTH: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

const FILLERS: [&str; 10] = [
    "the", "circa", "c.", "ca.", "ca", "c", "around", "about", "approximately", "approx.",
];

const RANGE_SEPARATORS: [&str; 7] = [
    " to ", " until ", " till ", " through ", " thru ", " - ", "-",
];

const ORDINAL_WORDS: [&str; 21] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
    "eleventh", "twelfth", "thirteenth", "fourteenth", "fifteenth", "sixteenth", "seventeenth",
    "eighteenth", "nineteenth", "twentieth", "twenty-first",
];

fn patterns() -> &'static PeriodPatterns {
    static PATTERNS: OnceLock<PeriodPatterns> = OnceLock::new();
    PATTERNS.get_or_init(PeriodPatterns::new)
}

struct PeriodPatterns {
    modifier_hyphen: Regex,

    // 1789-07-14, 1789-07
    iso_date: Regex,
    iso_month: Regex,

    // 19th century, 2nd millennium bc, 1780s
    century: Regex,
    millennium: Regex,
    decade: Regex,

    // 14 july 1789, july 14 1789, july 1789
    day_month_year: Regex,
    month_day_year: Regex,
    month_year: Regex,

    // 1789, 44 bc, ad 79
    year: Regex,

    // Range helpers
    trailing_year: Regex,
    trailing_ordinal: Regex,
    short_year: Regex,
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in period pattern compiles")
}

impl PeriodPatterns {
    fn new() -> Self {
        let era = r"(?:\s*(bc|ad))?";
        Self {
            modifier_hyphen: pattern(r"\b(early|mid|late)-"),

            iso_date: pattern(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$"),
            iso_month: pattern(r"^([0-9]{4})-([0-9]{2})$"),

            century: pattern(&format!(r"^([0-9]{{1,3}})(?:st|nd|rd|th)\s+century{era}$")),
            millennium: pattern(&format!(
                r"^([0-9]{{1,3}})(?:st|nd|rd|th)\s+millenn?ium{era}$"
            )),
            decade: pattern(&format!(r"^([0-9]{{1,3}})0'?s{era}$")),

            day_month_year: pattern(&format!(
                r"^([0-9]{{1,2}})(?:st|nd|rd|th)?\s+{MONTH}\s+([0-9]{{1,4}}){era}$"
            )),
            month_day_year: pattern(&format!(
                r"^{MONTH}\s+([0-9]{{1,2}})(?:st|nd|rd|th)?\s+([0-9]{{1,4}}){era}$"
            )),
            month_year: pattern(&format!(r"^{MONTH}\s+([0-9]{{1,4}}){era}$")),

            year: pattern(&format!(r"^(?:(ad)\s*)?([0-9]{{1,4}}){era}$")),

            trailing_year: pattern(r"(?:^|\s)([0-9]{3,4})$"),
            trailing_ordinal: pattern(r"(?:^|\s)[0-9]+(?:st|nd|rd|th)$"),
            short_year: pattern(r"^[0-9]{1,2}$"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Era {
    Bc,
    Ad,
}

impl Era {
    fn from_capture(caps: &Captures, index: usize) -> Self {
        match caps.get(index).map(|m| m.as_str()) {
            Some("bc") => Self::Bc,
            _ => Self::Ad,
        }
    }

    /// There is no year zero in either era
    fn astronomical(self, year: i32) -> Option<i32> {
        if year <= 0 {
            return None;
        }
        match self {
            Self::Bc => Some(1 - year),
            Self::Ad => Some(year),
        }
    }
}

/// A period before any modifier is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Period {
    /// Inclusive astronomical years
    Years { first: i32, last: i32 },
    Month { year: i32, month: u32 },
    Day(NaiveDate),
}

impl Period {
    /// The `n`th block of `size` years, e.g. the 19th century
    fn ordinal_span(n: i32, size: i32, era: Era) -> Option<Self> {
        if n <= 0 {
            return None;
        }
        let (first, last) = match era {
            Era::Ad => ((n - 1) * size + 1, n * size),
            Era::Bc => (1 - n * size, -(n - 1) * size),
        };
        Some(Self::Years { first, last })
    }

    fn decade(start: i32, era: Era) -> Option<Self> {
        if start <= 0 {
            return None;
        }
        let (first, last) = match era {
            Era::Ad => (start, start + 9),
            Era::Bc => (1 - (start + 9), 1 - start),
        };
        Some(Self::Years { first, last })
    }

    fn range(self) -> Option<DateRange> {
        match self {
            Self::Years { first, last } => Some(DateRange::new(
                NaiveDate::from_ymd_opt(first, 1, 1)?,
                NaiveDate::from_ymd_opt(last, 12, 31)?,
            )),
            Self::Month { year, month } => Some(DateRange::new(
                NaiveDate::from_ymd_opt(year, month, 1)?,
                last_day_of_month(year, month)?,
            )),
            Self::Day(date) => Some(DateRange::new(date, date)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Early,
    Mid,
    Late,
    FirstHalf,
    SecondHalf,
}

impl Modifier {
    const PREFIXES: [(&'static str, Modifier); 5] = [
        // Ordinal words are already numeric here
        ("1st half", Modifier::FirstHalf),
        ("2nd half", Modifier::SecondHalf),
        ("early", Modifier::Early),
        ("mid", Modifier::Mid),
        ("late", Modifier::Late),
    ];

    /// Split a leading modifier off `text`
    fn strip(text: &str) -> Option<(Self, &str)> {
        Self::PREFIXES.iter().find_map(|(prefix, modifier)| {
            let rest = text.strip_prefix(prefix)?.strip_prefix(' ')?;
            let rest = rest.strip_prefix("of ").unwrap_or(rest);
            Some((*modifier, rest))
        })
    }

    /// Narrow an inclusive run of units to the part this modifier names
    fn split(self, first: i32, last: i32) -> Option<(i32, i32)> {
        let len = last - first + 1;
        let third = len / 3;
        let half = len / 2;
        let (a, b) = match self {
            Self::Early => (first, first + third - 1),
            Self::Mid => (first + third, last - third),
            Self::Late => (last - third + 1, last),
            Self::FirstHalf => (first, first + half - 1),
            Self::SecondHalf => (first + half, last),
        };
        (a <= b).then_some((a, b))
    }

    fn apply(self, period: Period) -> Option<DateRange> {
        match period {
            Period::Years { first, last } if first == last => {
                let (from, to) = self.split(1, 12)?;
                Some(DateRange::new(
                    NaiveDate::from_ymd_opt(first, from as u32, 1)?,
                    last_day_of_month(first, to as u32)?,
                ))
            }
            Period::Years { first, last } => {
                let (first, last) = self.split(first, last)?;
                Period::Years { first, last }.range()
            }
            Period::Month { year, month } => {
                let month_end = last_day_of_month(year, month)?.day();
                let (from, to) = match self {
                    Self::Early => (1, 10),
                    Self::Mid => (11, 20),
                    Self::Late => (21, month_end),
                    Self::FirstHalf => (1, 15),
                    Self::SecondHalf => (16, month_end),
                };
                Some(DateRange::new(
                    NaiveDate::from_ymd_opt(year, month, from)?,
                    NaiveDate::from_ymd_opt(year, month, to)?,
                ))
            }
            Period::Day(_) => None,
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn number<T: FromStr>(caps: &Captures, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn normalize_word(word: &str) -> String {
    match word {
        "bc" | "bce" | "b.c." | "b.c" | "bc." | "b.c.e." | "bce." => "bc".to_string(),
        "ad" | "ce" | "a.d." | "a.d" | "ad." | "c.e." | "ce." => "ad".to_string(),
        "middle" => "mid".to_string(),
        _ => match ORDINAL_WORDS.iter().position(|w| *w == word) {
            Some(index) => ordinal(index + 1),
            None => word.to_string(),
        },
    }
}

/// Lowercase, unify dashes and era spellings, collapse whitespace
fn normalize(text: &str) -> String {
    let lowered = text
        .to_lowercase()
        .replace(['\u{2013}', '\u{2014}'], " - ")
        .replace(',', " ");
    let lowered = patterns().modifier_hyphen.replace_all(&lowered, "$1 ");

    lowered
        .split_whitespace()
        .map(normalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_fillers(mut text: &str) -> &str {
    loop {
        let trimmed = text.trim();
        let rest = FILLERS
            .iter()
            .find_map(|filler| trimmed.strip_prefix(filler)?.strip_prefix(' '));
        match rest {
            Some(rest) => text = rest,
            None => return trimmed,
        }
    }
}

/// A single period, optionally narrowed by a modifier
fn parse_single(text: &str) -> Option<DateRange> {
    let text = strip_fillers(text);
    match Modifier::strip(text) {
        Some((modifier, rest)) => modifier.apply(parse_period(strip_fillers(rest))?),
        None => parse_period(text)?.range(),
    }
}

fn parse_period(text: &str) -> Option<Period> {
    let p = patterns();

    if let Some(caps) = p.iso_date.captures(text) {
        let date =
            NaiveDate::from_ymd_opt(number(&caps, 1)?, number(&caps, 2)?, number(&caps, 3)?)?;
        return Some(Period::Day(date));
    }

    if let Some(caps) = p.iso_month.captures(text) {
        let month: u32 = number(&caps, 2)?;
        return (1..=12)
            .contains(&month)
            .then_some(Period::Month { year: number(&caps, 1)?, month });
    }

    if let Some(caps) = p.century.captures(text) {
        return Period::ordinal_span(number(&caps, 1)?, 100, Era::from_capture(&caps, 2));
    }

    if let Some(caps) = p.millennium.captures(text) {
        return Period::ordinal_span(number(&caps, 1)?, 1000, Era::from_capture(&caps, 2));
    }

    if let Some(caps) = p.decade.captures(text) {
        let tens: i32 = number(&caps, 1)?;
        return Period::decade(tens * 10, Era::from_capture(&caps, 2));
    }

    if let Some(caps) = p.day_month_year.captures(text) {
        let year = Era::from_capture(&caps, 4).astronomical(number(&caps, 3)?)?;
        let month = month_number(caps.get(2)?.as_str())?;
        return NaiveDate::from_ymd_opt(year, month, number(&caps, 1)?).map(Period::Day);
    }

    if let Some(caps) = p.month_day_year.captures(text) {
        let year = Era::from_capture(&caps, 4).astronomical(number(&caps, 3)?)?;
        let month = month_number(caps.get(1)?.as_str())?;
        return NaiveDate::from_ymd_opt(year, month, number(&caps, 2)?).map(Period::Day);
    }

    if let Some(caps) = p.month_year.captures(text) {
        let year = Era::from_capture(&caps, 3).astronomical(number(&caps, 2)?)?;
        let month = month_number(caps.get(1)?.as_str())?;
        return Some(Period::Month { year, month });
    }

    if let Some(caps) = p.year.captures(text) {
        let era = match (caps.get(1), caps.get(3).map(|m| m.as_str())) {
            (Some(_), Some("bc")) => return None,
            (_, Some("bc")) => Era::Bc,
            _ => Era::Ad,
        };
        let year = era.astronomical(number(&caps, 2)?)?;
        return Some(Period::Years { first: year, last: year });
    }

    None
}

/// `A to B` and friends: A's start through B's end
fn parse_range(text: &str) -> Option<DateRange> {
    let text = strip_fillers(text);
    let text = text.strip_prefix("from ").unwrap_or(text);

    if let Some(rest) = text.strip_prefix("between ") {
        let (left, right) = rest.split_once(" and ")?;
        return combine(left, right);
    }

    RANGE_SEPARATORS.iter().find_map(|separator| {
        let (left, right) = text.split_once(separator)?;
        combine(left, right)
    })
}

fn combine(left: &str, right: &str) -> Option<DateRange> {
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return None;
    }

    let right = expand_short_year(left, right);
    let left = inherit_from_end(left, &right);

    let start = parse_single(&left)?;
    let end = parse_single(&right)?;
    let range = DateRange::new(start.start, end.end);
    range.is_ordered().then_some(range)
}

/// `1914-18` ends in 1918
fn expand_short_year(left: &str, right: &str) -> String {
    let p = patterns();
    if !p.short_year.is_match(right) {
        return right.to_string();
    }
    p.trailing_year
        .captures(left)
        .and_then(|caps| caps.get(1))
        .map(|year| year.as_str())
        .and_then(|year| year.get(..year.len().checked_sub(right.len())?))
        .filter(|prefix| !prefix.is_empty())
        .map_or_else(|| right.to_string(), |prefix| format!("{prefix}{right}"))
}

/// Carry the end's unit and era over to a start that lacks them
fn inherit_from_end(left: &str, right: &str) -> String {
    let mut left = left.to_string();

    if patterns().trailing_ordinal.is_match(&left) {
        if let Some(unit) = ["century", "millennium"].iter().find(|unit| right.contains(*unit)) {
            left.push(' ');
            left.push_str(unit);
        }
    }

    let has_era = |text: &str| {
        text.ends_with("bc") || text.ends_with("ad") || text.starts_with("ad ")
    };
    if right.ends_with("bc") && !has_era(&left) {
        left.push_str(" bc");
    }

    left
}
