use chrono::{DateTime, TimeZone};

/// Date shown on posts and on the index, `November 14, 2023` by default
pub fn format_post_date<Tz: TimeZone>(date_time: &DateTime<Tz>, date_format: &str) -> String
    where Tz::Offset: std::fmt::Display
{
    date_time.format(date_format).to_string()
}

pub fn format_year<Tz: TimeZone>(date_time: &DateTime<Tz>) -> String
    where Tz::Offset: std::fmt::Display
{
    date_time.format("%Y").to_string()
}

/// First letter in upper case, everything else in lower case.
/// `"infra AS code"` becomes `"Infra as code"`
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
    }
}

/// Draft base name for a title: spaces become underscores, all lower case
pub fn draft_stem(title: &str) -> String {
    format!("post_{}", title.replace(' ', "_").to_lowercase())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    #[test]
    fn test_format_post_date() {
        let date_time = NaiveDate::from_ymd_opt(2023, 11, 4).unwrap()
            .and_hms_opt(22, 13, 20).unwrap()
            .and_utc();
        assert_eq!(format_post_date(&date_time, "%B %d, %Y"), "November 04, 2023");
        assert_eq!(format_post_date(&date_time, "%Y-%m-%d"), "2023-11-04");
        assert_eq!(format_year(&date_time), "2023");

        let date_time = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        assert_eq!(format_post_date(&date_time, "%B %d, %Y"), "January 01, 1970");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello WORLD"), "Hello world");
        assert_eq!(capitalize("infra as code"), "Infra as code");
        assert_eq!(capitalize("ábaco"), "Ábaco");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_draft_stem() {
        assert_eq!(draft_stem("Hello World"), "post_hello_world");
        assert_eq!(draft_stem("My  Azure Tips"), "post_my__azure_tips");
    }
}
