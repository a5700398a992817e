//! Cell-level parsers for product report values.
//!
//! Reports come out of a Brazilian ERP, so numbers use `.` for thousands and
//! `,` for decimals (`"1.234,56"`), margins carry a trailing `%`, and flags are
//! written in Portuguese or English. Every parser here distinguishes "unknown"
//! (`None`) from a real value so callers never mistake a blank cell for zero.

use crate::table::RawRecord;

/// Ordered column aliases for one logical field.
///
/// The legacy report header comes first, then the canonical snake_case name,
/// so either export shape maps onto the same field.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases(pub &'static [&'static str]);

impl FieldAliases {
    pub const CODE: Self = Self(&["CODIGO", "code"]);
    pub const DESCRIPTION: Self = Self(&["DESCRICAO PRODUTO", "name", "description"]);
    pub const BRAND: Self = Self(&["brand"]);
    pub const IS_ACTIVE: Self = Self(&["is_active"]);
    pub const COST_PRICE: Self = Self(&["P_CUSTO", "cost_price"]);
    pub const SALE_PRICE: Self = Self(&["P_VENDA", "sale_price"]);
    pub const MARGIN: Self = Self(&["%MG_VD", "margin"]);
}

/// Returns the first non-blank, trimmed value among `aliases`, or `""`.
#[must_use]
pub fn lookup<'a>(row: &'a RawRecord, aliases: FieldAliases) -> &'a str {
    aliases
        .0
        .iter()
        .filter_map(|key| row.get(key))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or("")
}

/// Parses a number written in the Brazilian convention.
///
/// Strips `%` and thousands separators, swaps the decimal comma for a dot and
/// reads the leading numeric part, so `"1.234,56"` is `1234.56`, `"35,5%"` is
/// `35.5` and `"12,5 kg"` is `12.5`. Blank or non-numeric text is `None`.
///
/// A dot is always a thousands separator here: `"10.5"` reads as `105`.
#[must_use]
pub fn parse_number_br(value: &str) -> Option<f64> {
    let normalized = value.replace(['%', '.'], "").replace(',', ".");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return None;
    }

    let prefix = numeric_prefix(normalized);
    if prefix.is_empty() {
        return None;
    }

    prefix.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses a yes/no flag. Unrecognized or blank input is `None`.
#[must_use]
pub fn parse_boolean(value: &str) -> Option<bool> {
    let normalized = value.trim().to_lowercase();
    match normalized.as_str() {
        "true" | "1" | "sim" | "s" | "yes" | "y" | "verdadeiro" => Some(true),
        "false" | "0" | "nao" | "no" | "n" | "falso" => Some(false),
        _ => None,
    }
}

/// Returns the longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
///
/// At least one digit is required in the mantissa; an exponent marker without
/// digits is left out of the prefix.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
