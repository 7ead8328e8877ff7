// File: crates/biblio-core/src/date.rs
// Summary: Canonical-day normalization for heterogeneous date strings.

use chrono::NaiveDate;

/// Normalize a raw date string to the canonical `YYYY-MM-DD` bucket key.
///
/// Accepts full dates (`2021-03-05`, `2021/3/5`), year-month (`2021-03`
/// becomes the first of the month) and bare years (`2021` becomes
/// January 1st). A date fragment embedded in a longer string is picked
/// up. As a last resort the first whitespace token is run through a few
/// chrono formats. Returns `None` when nothing recognizable exists;
/// never panics.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let folded = raw.replace('/', "-");

    if let Some(day) = scan_ymd(&folded) {
        return Some(day);
    }
    if let Some(day) = scan_ym(&folded) {
        return Some(day);
    }
    if let Some(day) = scan_year(&folded) {
        return Some(day);
    }

    let token = folded.split_whitespace().next()?;
    parse_free_form(token)
}

/// Find `YYYY-M-D` anywhere in the string and zero-pad it.
fn scan_ymd(s: &str) -> Option<String> {
    for (start, year) in year_candidates(s) {
        let rest = &s[start + 4..];
        let (month, after_month) = dash_number(rest)?;
        let (day, _) = dash_number(after_month)?;
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            return Some(format!("{}-{:02}-{:02}", year, month, day));
        }
    }
    None
}

/// Find `YYYY-M` anywhere in the string; the day defaults to `01`.
fn scan_ym(s: &str) -> Option<String> {
    for (start, year) in year_candidates(s) {
        let rest = &s[start + 4..];
        if let Some((month, _)) = dash_number(rest) {
            if (1..=12).contains(&month) {
                return Some(format!("{}-{:02}-01", year, month));
            }
        }
    }
    None
}

/// Find a bare `YYYY`; month and day default to `01-01`.
fn scan_year(s: &str) -> Option<String> {
    year_candidates(s)
        .into_iter()
        .next()
        .map(|(_, year)| format!("{}-01-01", year))
}

/// All positions where a four-digit run starts that is not part of a
/// longer digit run.
fn year_candidates(s: &str) -> Vec<(usize, &str)> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i - start == 4 {
                out.push((start, &s[start..i]));
            }
        } else {
            i += 1;
        }
    }
    out
}

/// Parse `-N` (one or two digits) at the head of `rest`, returning the
/// number and the remainder after it.
fn dash_number(rest: &str) -> Option<(u32, &str)> {
    let rest = rest.strip_prefix('-')?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).take(2).collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse().ok()?;
    Some((value, &rest[digits.len()..]))
}

fn parse_free_form(token: &str) -> Option<String> {
    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%b-%Y", "%b-%d-%Y"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::normalize_date;

    #[test]
    fn full_dates_zero_pad() {
        assert_eq!(normalize_date("2021/3/5").as_deref(), Some("2021-03-05"));
        assert_eq!(normalize_date("2021-03-05").as_deref(), Some("2021-03-05"));
        assert_eq!(normalize_date("2021-12-31").as_deref(), Some("2021-12-31"));
    }

    #[test]
    fn year_month_defaults_day() {
        assert_eq!(normalize_date("2021-3").as_deref(), Some("2021-03-01"));
        assert_eq!(normalize_date("2021/11").as_deref(), Some("2021-11-01"));
    }

    #[test]
    fn bare_year_defaults_month_and_day() {
        assert_eq!(normalize_date("2021").as_deref(), Some("2021-01-01"));
        assert_eq!(normalize_date("published in 2019, print").as_deref(), Some("2019-01-01"));
    }

    #[test]
    fn embedded_fragment_found() {
        assert_eq!(
            normalize_date("submitted 2020-07-04 (revised)").as_deref(),
            Some("2020-07-04")
        );
    }

    #[test]
    fn unrecognizable_is_none() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("   "), None);
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date("forthcoming"), None);
    }

    #[test]
    fn out_of_range_components_do_not_match_full_date() {
        // 2021-13-40 is not a date; the year still rescues it.
        assert_eq!(normalize_date("2021-13-40").as_deref(), Some("2021-01-01"));
    }

    #[test]
    fn deterministic() {
        for _ in 0..3 {
            assert_eq!(normalize_date("2022/1/9").as_deref(), Some("2022-01-09"));
        }
    }
}
