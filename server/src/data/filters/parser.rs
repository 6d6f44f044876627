//! Filter parsing
//!
//! Turns raw query parameters into a typed [`StrainFilter`], then validates ranges.

use std::collections::HashMap;

use crate::api::types::ApiError;
use crate::data::types::{Category, StrainType};

use super::types::{SortColumn, SortDirection, StrainFilter};

/// Upper bound for THC/CBD percentages
const MAX_PERCENT: f64 = 100.0;

/// Maximum rows per listing page
pub const MAX_LIMIT: u32 = 100;

/// Parse and validate a strain filter from query parameters
///
/// Keys use the external snake_case names; unknown keys are ignored.
/// Numbers are read best-effort from their leading numeric prefix and an
/// unparseable value is treated as absent, never as zero.
pub fn parse_strain_filter(raw: &HashMap<String, String>) -> Result<StrainFilter, ApiError> {
    let get = |key: &str| {
        raw.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };

    let category = match get("category") {
        Some(v) => Some(Category::parse(v).ok_or_else(|| {
            invalid(format!(
                "Unknown category: {}. Expected one of: {}",
                v,
                Category::ALL.map(|c| c.as_str()).join(", ")
            ))
        })?),
        None => None,
    };

    let strain_type = match get("strain_type") {
        Some(v) => Some(StrainType::parse(v).ok_or_else(|| {
            invalid(format!(
                "Unknown strain_type: {}. Expected Sativa, Indica or Hybrid",
                v
            ))
        })?),
        None => None,
    };

    let filter = StrainFilter {
        category,
        thc_min: get("thc_min").and_then(parse_float_prefix),
        thc_max: get("thc_max").and_then(parse_float_prefix),
        cbd_min: get("cbd_min").and_then(parse_float_prefix),
        cbd_max: get("cbd_max").and_then(parse_float_prefix),
        strain_type,
        location: get("location").map(str::to_string),
        special: raw.get("special").is_some_and(|v| v == "true"),
        min_price: get("min_price").and_then(parse_float_prefix),
        max_price: get("max_price").and_then(parse_float_prefix),
        sort_by: get("sort_by")
            .map(SortColumn::parse_or_default)
            .unwrap_or_default(),
        sort_dir: get("sort_dir")
            .map(SortDirection::parse_or_default)
            .unwrap_or_default(),
        limit: int_field("limit", get("limit"))?,
        offset: int_field("offset", get("offset"))?,
    };

    validate(&filter)?;
    Ok(filter)
}

fn invalid(message: impl Into<String>) -> ApiError {
    ApiError::bad_request("INVALID_FILTER", message)
}

fn int_field(name: &str, value: Option<&str>) -> Result<Option<u32>, ApiError> {
    match value.and_then(parse_int_prefix) {
        None => Ok(None),
        Some(n) if n < 0 => Err(invalid(format!("{} must be a non-negative integer", name))),
        Some(n) => u32::try_from(n).map(Some).map_err(|_| match name {
            "limit" => invalid(format!("limit must be between 1 and {}", MAX_LIMIT)),
            _ => invalid(format!("{} is too large (max {})", name, u32::MAX)),
        }),
    }
}

fn validate(filter: &StrainFilter) -> Result<(), ApiError> {
    let percents = [
        ("thc_min", filter.thc_min),
        ("thc_max", filter.thc_max),
        ("cbd_min", filter.cbd_min),
        ("cbd_max", filter.cbd_max),
    ];
    for (name, value) in percents {
        if let Some(v) = value
            && !(0.0..=MAX_PERCENT).contains(&v)
        {
            return Err(invalid(format!("{} must be between 0 and 100", name)));
        }
    }

    for (name, value) in [("min_price", filter.min_price), ("max_price", filter.max_price)] {
        if let Some(v) = value
            && v < 0.0
        {
            return Err(invalid(format!("{} must be >= 0", name)));
        }
    }

    if let Some(limit) = filter.limit
        && !(1..=MAX_LIMIT).contains(&limit)
    {
        return Err(invalid(format!("limit must be between 1 and {}", MAX_LIMIT)));
    }

    Ok(())
}

/// Length of the leading run of ASCII digits
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parse the longest leading decimal number, e.g. `"15.5mg"` -> 15.5
///
/// Returns `None` when no digits lead the input or the value is not finite.
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.trim_start().as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = digit_run(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(&bytes[end + 1..]);
        if frac_digits > 0 || int_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digit_run(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let text = std::str::from_utf8(&bytes[..end]).ok()?;
    let value = if int_digits == 0 {
        // ".5" / "-.5"
        let (sign, rest) = text.split_at(text.len() - text.trim_start_matches(['+', '-']).len());
        format!("{}0{}", sign, rest).parse::<f64>().ok()?
    } else {
        text.parse::<f64>().ok()?
    };

    value.is_finite().then_some(value)
}

/// Parse the leading integer, e.g. `"10px"` -> 10
pub(crate) fn parse_int_prefix(s: &str) -> Option<i64> {
    let bytes = s.trim_start().as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = digit_run(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    let text = std::str::from_utf8(&bytes[..sign + digits]).ok()?;
    // Digit runs past the i64 range saturate so range checks still see them
    Some(text.parse::<i64>().unwrap_or(if text.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}
