use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use crate::error::{TypeError, TypeResult};

/// Zone marker trailing a generalized time value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    /// `Z`
    Utc,
    /// `+HHMM` / `-HHMM`, stored as seconds east of UTC.
    Offset(i32),
}

/// Compact directory timestamp: `YYYYMMDDHHMMSS`, an optional fraction, and
/// an optional zone marker (`Z` or `±HHMM`).
///
/// Used to label entries that are missing on one side with the time they
/// were created on the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneralizedTime {
    /// Wall-clock date and time as written (fraction dropped).
    pub datetime: NaiveDateTime,
    /// Zone marker, if present.
    pub zone: Option<Zone>,
}

impl GeneralizedTime {
    /// Parse a generalized time value such as `20240131120000Z`.
    pub fn parse(raw: &str) -> TypeResult<Self> {
        let value = raw.trim();
        let invalid = |reason: &str| TypeError::InvalidTimestamp {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        if value.len() < 14 || !value.is_char_boundary(14) {
            return Err(invalid("expected at least 14 digits"));
        }
        let (digits, mut rest) = value.split_at(14);
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected at least 14 digits"));
        }
        let datetime = NaiveDateTime::parse_from_str(digits, "%Y%m%d%H%M%S")
            .map_err(|e| invalid(&e.to_string()))?;

        if let Some(fraction) = rest.strip_prefix(&['.', ','][..]) {
            let end = fraction
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(fraction.len());
            if end == 0 {
                return Err(invalid("empty fraction"));
            }
            rest = &fraction[end..];
        }

        let zone = match rest {
            "" => None,
            "Z" | "z" => Some(Zone::Utc),
            offset => Some(parse_offset(offset).ok_or_else(|| invalid("bad zone marker"))?),
        };

        Ok(Self { datetime, zone })
    }

    /// The instant as a zoned date-time, when a zone marker is present.
    pub fn to_fixed(&self) -> Option<DateTime<FixedOffset>> {
        let seconds = match self.zone? {
            Zone::Utc => 0,
            Zone::Offset(seconds) => seconds,
        };
        FixedOffset::east_opt(seconds)?
            .from_local_datetime(&self.datetime)
            .single()
    }
}

fn parse_offset(text: &str) -> Option<Zone> {
    let (sign, digits) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(Zone::Offset(sign * (hours * 3600 + minutes * 60)))
}

impl fmt::Display for GeneralizedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime.format("%Y-%m-%d %H:%M:%S"))?;
        match self.zone {
            None => Ok(()),
            Some(Zone::Utc) => f.write_str(" UTC"),
            Some(Zone::Offset(seconds)) => {
                let sign = if seconds < 0 { '-' } else { '+' };
                let abs = seconds.abs();
                write!(f, " {sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
            }
        }
    }
}
