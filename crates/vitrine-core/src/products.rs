use serde::{Deserialize, Serialize};

/// Brand assigned when neither the row nor the description names a known brand.
pub const FALLBACK_BRAND: &str = "Other";

/// Prefix marking a code as generated rather than read from the report.
pub const GENERATED_CODE_PREFIX: &str = "AUTO-";

/// A catalog product ready to be upserted into the store's `products` table.
///
/// `(tenant_id, code)` is the idempotency key: writing the same record twice
/// updates the existing row instead of inserting a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpsert {
    pub tenant_id: String,
    /// Either the code from the source report or an `AUTO-` generated one.
    pub code: String,
    pub name: String,
    pub brand: String,
    /// `None` means unknown; serialized as `null`, never as zero.
    pub cost_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub margin: Option<f64>,
    pub is_active: bool,
}

impl ProductUpsert {
    /// Returns `true` when the code was derived rather than read from the source.
    #[must_use]
    pub fn has_generated_code(&self) -> bool {
        self.code.starts_with(GENERATED_CODE_PREFIX)
    }
}
