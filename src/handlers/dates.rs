//! Date parsing and formatting: `parseDate`, `formatDate` (§4.4).
//!
//! The spec's default format list is LDML-shaped but not machine-parsed
//! generically for *input* — each of the seven defaults gets its own
//! fixed-shape regex (locale-independent, unlike `chrono`'s lenient
//! parser) so the `en_US_POSIX`-equivalent behavior the spec calls for is
//! exact rather than best-effort. `formatDate`'s *output* format is
//! freeform, so that direction goes through a small LDML→strftime
//! token translator instead.

use super::{as_key, ExecutionContext};
use crate::constants::DEFAULT_DATE_FORMATS;
use crate::error::{InterpError, Result};
use crate::model::Step;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

struct FormatSpec {
    ldml: &'static str,
    regex: Lazy<Regex>,
}

fn month_index(abbr: &str) -> Option<u32> {
    const NAMES: &[&str] = &[
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = abbr.to_ascii_lowercase();
    NAMES.iter().position(|n| *n == lower).map(|i| i as u32 + 1)
}

fn to_24h(hour12: u32, meridiem: &str) -> u32 {
    let pm = meridiem.eq_ignore_ascii_case("pm");
    match (hour12 % 12, pm) {
        (0, false) => 0,
        (h, false) => h,
        (0, true) => 12,
        (h, true) => h + 12,
    }
}

static RE_MDY_HMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})\s+(\d{1,2}):(\d{2})\s*([AaPp][Mm])$").unwrap()
});
static RE_MD_HMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})/(\d{2})\s+(\d{1,2}):(\d{2})\s*([AaPp][Mm])$").unwrap());
static RE_HMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})\s*([AaPp][Mm])$").unwrap());
static RE_YMD_HMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})\s+(\d{2}):(\d{2}):(\d{2})$").unwrap());
static RE_YMD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());
static RE_MMM_DD_YYYY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{3})\s+(\d{1,2}),\s*(\d{4})$").unwrap());
static RE_MMM_D: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z]{3})\s+(\d{1,2})$").unwrap());

fn try_format(ldml: &str, input: &str) -> Option<NaiveDateTime> {
    let today = Local::now().date_naive();
    match ldml {
        "M/d/yyyy h:mm a" => {
            let c = RE_MDY_HMA.captures(input)?;
            let date = NaiveDate::from_ymd_opt(
                c[3].parse().ok()?,
                c[1].parse().ok()?,
                c[2].parse().ok()?,
            )?;
            let minute: u32 = c[5].parse().ok()?;
            let time = NaiveTime::from_hms_opt(to_24h(c[4].parse().ok()?, &c[6]), minute, 0)?;
            Some(NaiveDateTime::new(date, time))
        }
        "MM/dd h:mm a" => {
            let c = RE_MD_HMA.captures(input)?;
            let date = NaiveDate::from_ymd_opt(today.year(), c[1].parse().ok()?, c[2].parse().ok()?)?;
            let minute: u32 = c[4].parse().ok()?;
            let time = NaiveTime::from_hms_opt(to_24h(c[3].parse().ok()?, &c[5]), minute, 0)?;
            Some(NaiveDateTime::new(date, time))
        }
        "h:mm a" => {
            let c = RE_HMA.captures(input)?;
            let minute: u32 = c[2].parse().ok()?;
            let time = NaiveTime::from_hms_opt(to_24h(c[1].parse().ok()?, &c[3]), minute, 0)?;
            Some(NaiveDateTime::new(today, time))
        }
        "yyyy-MM-dd HH:mm:ss" => {
            let c = RE_YMD_HMS.captures(input)?;
            let date = NaiveDate::from_ymd_opt(c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?)?;
            let time = NaiveTime::from_hms_opt(c[4].parse().ok()?, c[5].parse().ok()?, c[6].parse().ok()?)?;
            Some(NaiveDateTime::new(date, time))
        }
        "yyyy-MM-dd" => {
            let c = RE_YMD.captures(input)?;
            let date = NaiveDate::from_ymd_opt(c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?)?;
            Some(date.and_hms_opt(0, 0, 0)?)
        }
        "MMM dd, yyyy" => {
            let c = RE_MMM_DD_YYYY.captures(input)?;
            let month = month_index(&c[1])?;
            let date = NaiveDate::from_ymd_opt(c[3].parse().ok()?, month, c[2].parse().ok()?)?;
            Some(date.and_hms_opt(0, 0, 0)?)
        }
        "MMM d" => {
            let c = RE_MMM_D.captures(input)?;
            let month = month_index(&c[1])?;
            let date = NaiveDate::from_ymd_opt(today.year(), month, c[2].parse().ok()?)?;
            Some(date.and_hms_opt(0, 0, 0)?)
        }
        _ => None,
    }
}

/// `parseDate{input|value, formats?[], as}` — tries each format in order,
/// first match wins; writes the timestamp plus sibling date/time
/// components (§4.4, §3).
pub async fn parse_date(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let input = step
        .arg_str("input")
        .or_else(|| step.arg_str("value"))
        .ok_or_else(|| InterpError::invalid_argument("'input' (or 'value') is required"))?;
    let formats: Vec<String> = step
        .arg("formats")
        .and_then(|v| v.as_array())
        .map(|a| a.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_else(|| DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect());

    let parsed = formats.iter().find_map(|f| try_format(f, input));
    let dt = parsed.ok_or_else(|| {
        InterpError::invalid_argument(format!("could not parse '{input}' with any supplied format"))
    })?;

    if let Some(key) = as_key(step) {
        ctx.store.set_date(
            key,
            dt.and_utc().timestamp(),
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
        );
    }
    Ok(())
}

/// Translate an LDML-style output format into a `chrono` strftime
/// pattern, longest-token-first.
fn ldml_to_strftime(fmt: &str) -> String {
    const TOKENS: &[(&str, &str)] = &[
        ("yyyy", "%Y"),
        ("yy", "%y"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("M", "%-m"),
        ("dd", "%d"),
        ("d", "%-d"),
        ("HH", "%H"),
        ("H", "%-H"),
        ("hh", "%I"),
        ("h", "%-I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("a", "%p"),
    ];
    let mut out = String::new();
    let chars: Vec<char> = fmt.chars().collect();
    let mut i = 0;
    'outer: while i < chars.len() {
        for (token, repl) in TOKENS {
            let tlen = token.chars().count();
            if chars[i..].iter().collect::<String>().starts_with(token) {
                out.push_str(repl);
                i += tlen;
                continue 'outer;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// `formatDate{format, timestamp?|timestampVar?, as}` — timestamp absent
/// means now (§4.4).
pub async fn format_date(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let format = step
        .arg_str("format")
        .ok_or_else(|| InterpError::invalid_argument("'format' is required"))?;
    let timestamp = if let Some(ts) = step.arg_f64("timestamp") {
        ts as i64
    } else if let Some(name) = step.arg_str("timestampVar") {
        ctx.store
            .get_variable(name)
            .and_then(|v| v.as_f64())
            .map(|v| v as i64)
            .ok_or_else(|| InterpError::invalid_argument(format!("'{name}' is not a known timestamp")))?
    } else {
        chrono::Utc::now().timestamp()
    };

    let dt = chrono::DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| InterpError::invalid_argument("timestamp out of range"))?
        .naive_utc();
    let strftime = ldml_to_strftime(format);
    let formatted = dt.format(&strftime).to_string();

    if let Some(key) = as_key(step) {
        ctx.store.set_both(key, crate::value::VarValue::String(formatted));
    }
    Ok(())
}

#[cfg(test)]
mod dates_test;
