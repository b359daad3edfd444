use chrono::{DateTime, Local, TimeZone, Utc};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TimestampError {
    #[error("malformed timestamp encoding '{encoded}': {problem}")]
    MalformedTimestampEncoding { encoded: String, problem: String },
    #[error("character {0:?} has a code point above 999 and can't be encoded")]
    UnencodableChar(char),
    #[error("'{0}' is not a valid publish timestamp")]
    InvalidTimestamp(String),
}

/// Writes every character as its code point padded to three digits.
///
/// `"1.5"` becomes `"049046053"`
pub fn encode(text: &str) -> Result<String, TimestampError> {
    let mut encoded = String::with_capacity(text.len() * 3);
    for c in text.chars() {
        let code = c as u32;
        if code > 999 {
            return Err(TimestampError::UnencodableChar(c));
        }
        encoded.push_str(&format!("{:03}", code));
    }
    Ok(encoded)
}

pub fn decode(encoded: &str) -> Result<String, TimestampError> {
    let malformed = |problem: String| TimestampError::MalformedTimestampEncoding {
        encoded: encoded.to_string(),
        problem,
    };

    let bytes = encoded.as_bytes();
    if bytes.len() % 3 != 0 {
        return Err(malformed(format!("length {} is not a multiple of 3", bytes.len())));
    }

    let mut decoded = String::with_capacity(bytes.len() / 3);
    for group in bytes.chunks(3) {
        if !group.iter().all(u8::is_ascii_digit) {
            return Err(malformed(format!("group '{}' is not a 3 digit code", String::from_utf8_lossy(group))));
        }
        let code = group.iter().fold(0u32, |acc, d| acc * 10 + (d - b'0') as u32);
        match char::from_u32(code) {
            Some(c) => decoded.push(c),
            None => return Err(malformed(format!("{} is not a valid code point", code))),
        }
    }

    Ok(decoded)
}

/// Publish time in seconds since the epoch.
///
/// The text is kept next to the value, it is what ends up encoded in the
/// published file name and it has to come back out unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct PostTimestamp {
    text: String,
    seconds: f64,
}

impl PostTimestamp {
    pub fn from_datetime<Tz: TimeZone>(date_time: &DateTime<Tz>) -> PostTimestamp {
        let seconds = date_time.timestamp_micros() as f64 / 1_000_000.0;
        // Debug keeps the fractional part for whole seconds: 1700000000.0
        PostTimestamp {
            text: format!("{:?}", seconds),
            seconds,
        }
    }

    pub fn parse(text: &str) -> Result<PostTimestamp, TimestampError> {
        let seconds = match text.parse::<f64>() {
            Ok(x) if x.is_finite() && x >= 0.0 => x,
            _ => return Err(TimestampError::InvalidTimestamp(text.to_string())),
        };

        Ok(PostTimestamp {
            text: text.to_string(),
            seconds,
        })
    }

    pub fn from_encoded(encoded: &str) -> Result<PostTimestamp, TimestampError> {
        Self::parse(&decode(encoded)?)
    }

    pub fn encoded(&self) -> String {
        encode(&self.text).expect("timestamp text is ASCII, it always parses as an f64")
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    pub fn to_local(&self) -> Result<DateTime<Local>, TimestampError> {
        let secs = self.seconds.trunc() as i64;
        let nanos = (self.seconds.fract() * 1_000_000_000.0) as u32;
        match DateTime::<Utc>::from_timestamp(secs, nanos) {
            Some(utc) => Ok(utc.with_timezone(&Local)),
            None => Err(TimestampError::InvalidTimestamp(self.text.clone())),
        }
    }
}
