use chrono::NaiveDate;

/// Outcome of validating a `TIME`-typed field's textual form.
pub struct TimeCheck {
    /// Set when the value parses but carries more than 3 fractional-second
    /// digits — accepted, per §9 Open Question b, but worth flagging.
    pub warning: Option<String>,
}

/// Validates `text` against `YYYY-DDDTHH:MM:SS[.sss]` (0–9 fractional digits).
pub fn validate_time(text: &str) -> Result<TimeCheck, String> {
    let (date_part, time_part) = text
        .split_once('T')
        .ok_or_else(|| format!("{text} is not a valid TIME: missing 'T' separator"))?;
    let (year_str, day_str) = date_part
        .split_once('-')
        .ok_or_else(|| format!("{text} is not a valid TIME: missing '-' in date part"))?;

    if year_str.len() != 4 || !year_str.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("{text} is not a valid TIME: year must be 4 digits"));
    }
    if day_str.len() != 3 || !day_str.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("{text} is not a valid TIME: day-of-year must be 3 digits"));
    }
    let year: i32 = year_str
        .parse()
        .map_err(|_| format!("{text} is not a valid TIME: bad year"))?;
    let ordinal: u32 = day_str
        .parse()
        .map_err(|_| format!("{text} is not a valid TIME: bad day-of-year"))?;
    NaiveDate::from_yo_opt(year, ordinal)
        .ok_or_else(|| format!("{text} is not a valid TIME: day {ordinal} out of range for year {year}"))?;

    let (hms, fraction) = match time_part.split_once('.') {
        Some((h, f)) => (h, Some(f)),
        None => (time_part, None),
    };

    let hms_parts: Vec<&str> = hms.split(':').collect();
    if hms_parts.len() != 3 {
        return Err(format!("{text} is not a valid TIME: expected HH:MM:SS"));
    }
    for (part, max) in hms_parts.iter().zip([23, 59, 60]) {
        if part.len() != 2 || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("{text} is not a valid TIME: malformed time component {part}"));
        }
        let value: u32 = part.parse().expect("validated all-digit above");
        if value > max {
            return Err(format!("{text} is not a valid TIME: {part} exceeds {max}"));
        }
    }

    let warning = match fraction {
        None => None,
        Some(f) if f.is_empty() || f.len() > 9 || !f.chars().all(|c| c.is_ascii_digit()) => {
            return Err(format!(
                "{text} is not a valid TIME: fractional seconds must be 1-9 digits"
            ));
        }
        Some(f) if f.len() > 3 => Some(format!(
            "{} fractional-second digits exceeds the conventional 3",
            f.len()
        )),
        Some(_) => None,
    };

    Ok(TimeCheck { warning })
}
