//! PDF date strings (`D:YYYYMMDDHHmmSSOHH'mm'`).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};

/// Parse a PDF date string into a timestamp with its UTC offset.
///
/// Everything after the four-digit year is optional, as is the `D:`
/// prefix. A missing offset, or `Z`, means UTC. Returns `None` for strings
/// that do not follow the format or name an impossible date.
pub fn parse_pdf_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = raw.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);

    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, rest) = s.split_at(digits_end);
    if digits.len() < 4 || digits.len() > 14 || digits.len() % 2 != 0 {
        return None;
    }

    let field = |start: usize, default: u32| -> Option<u32> {
        match digits.get(start..start + 2) {
            Some(d) => d.parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = digits[..4].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(4, 1)?, field(6, 1)?)?;
    let time = NaiveTime::from_hms_opt(field(8, 0)?, field(10, 0)?, field(12, 0)?)?;
    let offset = parse_offset(rest)?;

    offset.from_local_datetime(&date.and_time(time)).single()
}

fn parse_offset(rest: &str) -> Option<FixedOffset> {
    let mut chars = rest.trim().chars();
    let sign = match chars.next() {
        None | Some('Z') | Some('z') => return FixedOffset::east_opt(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };

    // HH'mm' with apostrophes that some producers omit
    let tail: String = chars.filter(char::is_ascii_digit).collect();
    let hours: i32 = match tail.get(0..2) {
        Some(h) => h.parse().ok()?,
        None => 0,
    };
    let minutes: i32 = match tail.get(2..4) {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
