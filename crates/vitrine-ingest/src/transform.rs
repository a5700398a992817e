//! Row-to-record transformation for the product import.
//!
//! Each report row becomes a [`ProductUpsert`] or is skipped when it carries
//! neither a code nor a description. The name falls back to the raw
//! description when brand stripping empties it, and to the code when the row
//! has no description at all. Field-level problems never fail a row:
//! unparsable prices become `None` and an unreadable active flag defaults to
//! `true`.

use vitrine_core::{ProductUpsert, TenantId, FALLBACK_BRAND};

use crate::brands::{clean_name, BrandMatcher};
use crate::code::generate_code;
use crate::parse::{lookup, parse_boolean, parse_number_br, FieldAliases};
use crate::table::RawRecord;

/// Products extracted from a report, plus the count of rows without identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOutcome {
    pub products: Vec<ProductUpsert>,
    pub skipped: usize,
}

/// Transforms every row, preserving source order.
#[must_use]
pub fn transform_rows(rows: &[RawRecord], tenant: &TenantId) -> TransformOutcome {
    let matcher = BrandMatcher::known();
    rows.iter()
        .enumerate()
        .fold(TransformOutcome::default(), |mut outcome, (index, row)| {
            match transform_row(matcher, row, index, tenant) {
                Some(product) => outcome.products.push(product),
                None => outcome.skipped += 1,
            }
            outcome
        })
}

/// Maps one row at 0-based `index` to a product, or `None` to skip it.
#[must_use]
pub fn transform_row(
    matcher: &BrandMatcher,
    row: &RawRecord,
    index: usize,
    tenant: &TenantId,
) -> Option<ProductUpsert> {
    let code = lookup(row, FieldAliases::CODE);
    let description = lookup(row, FieldAliases::DESCRIPTION);

    if code.is_empty() && description.is_empty() {
        tracing::debug!(row = index + 1, "skipping row — no code and no description");
        return None;
    }

    let brand = match lookup(row, FieldAliases::BRAND) {
        "" => matcher.detect(description).unwrap_or(FALLBACK_BRAND),
        explicit => explicit,
    };

    let cleaned = clean_name(&matcher.remove(description, brand));
    let name = [cleaned.as_str(), description, code]
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_default()
        .to_owned();

    let code = if code.is_empty() {
        generate_code(&name, index + 1)
    } else {
        code.to_owned()
    };

    Some(ProductUpsert {
        tenant_id: tenant.as_str().to_owned(),
        code,
        name,
        brand: brand.to_owned(),
        cost_price: parse_number_br(lookup(row, FieldAliases::COST_PRICE)),
        sale_price: parse_number_br(lookup(row, FieldAliases::SALE_PRICE)),
        margin: parse_number_br(lookup(row, FieldAliases::MARGIN)),
        is_active: parse_boolean(lookup(row, FieldAliases::IS_ACTIVE)).unwrap_or(true),
    })
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
