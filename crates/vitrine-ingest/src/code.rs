//! Deterministic product codes for rows that arrive without one.

use sha1::{Digest, Sha1};
pub use vitrine_core::GENERATED_CODE_PREFIX;

const MAX_SLUG_LEN: usize = 32;
const DIGEST_LEN: usize = 8;
const FALLBACK_SLUG: &str = "produto";

/// Builds `AUTO-{slug}-{digest}` for a product name at a 1-based row position.
///
/// The digest is the first 8 hex characters of SHA-1 over `"{name}|{position}"`,
/// so the same row always gets the same code and duplicate names at different
/// positions get different codes. The format matches codes written by earlier
/// imports, so re-importing unchanged data updates rows instead of adding new ones.
#[must_use]
pub fn generate_code(name: &str, position: usize) -> String {
    let slug = slugify(name);
    let slug = if slug.is_empty() { FALLBACK_SLUG } else { &slug };

    let digest = Sha1::digest(format!("{name}|{position}").as_bytes());
    let hex = format!("{digest:x}");

    format!("{GENERATED_CODE_PREFIX}{slug}-{}", &hex[..DIGEST_LEN])
}

/// Lowercases `name`, turns runs of anything outside `[a-z0-9]` into one `-`,
/// trims edge hyphens, and keeps the first 32 characters.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    slug
}
