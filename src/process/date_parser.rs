use chrono::NaiveDate;

use super::utils::normalise_whitespace;

/// Parse `dd.mm.yyyy` or `dd.mm.yy`.
///
/// Day and month take one or two digits; the year takes exactly two or
/// four. Two-digit years pivot at 69: `00..=68` → 20xx, `69..=99` → 19xx.
/// Year `0000` is not a calendar year and yields `None`.
pub fn parse_single_date(raw: &str) -> Option<NaiveDate> {
    let text = normalise_whitespace(raw);
    if text.is_empty() {
        return None;
    }

    let mut parts = text.split('.');
    let (d, m, y) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let day = parse_digits(d, 1, 2)?;
    let month = parse_digits(m, 1, 2)?;
    let year = match y.len() {
        4 => match parse_digits(y, 4, 4)? {
            0 => return None,
            yyyy => yyyy as i32,
        },
        2 => {
            let yy = parse_digits(y, 2, 2)? as i32;
            if yy < 69 {
                2000 + yy
            } else {
                1900 + yy
            }
        }
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_digits(s: &str, min: usize, max: usize) -> Option<u32> {
    if s.len() < min || s.len() > max || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Split a `start-end` cell into two ISO `YYYY-MM-DD` strings.
///
/// A start written without a year (`01.03-15.03.24`) borrows the end's year.
/// A cell without a dash is a single day used for both ends.
pub fn parse_date_range(raw: &str) -> (Option<String>, Option<String>) {
    let text = normalise_whitespace(raw);
    if text.is_empty() {
        return (None, None);
    }

    let Some((start, end)) = text.split_once('-') else {
        let single = format_date(parse_single_date(&text));
        return (single.clone(), single);
    };

    let mut start = normalise_whitespace(start);
    let end = normalise_whitespace(end);
    if start.matches('.').count() == 1 && end.matches('.').count() >= 2 {
        if let Some(year) = end.rsplit('.').next() {
            start = format!("{}.{}", start, year);
        }
    }

    (
        format_date(parse_single_date(&start)),
        format_date(parse_single_date(&end)),
    )
}

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}
