//! Inventory Models

use crate::{domain::products::models::ProductId, ids::TypedId};

/// Variant Id
pub type VariantId = TypedId<Variant>;

/// A sized variant of a product and its stock counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub id: VariantId,
    pub product: ProductId,
    pub size: String,
    pub stock: u32,
}

/// Result of a conditional decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Stock was taken; `remaining` is the stock left afterwards.
    Applied { remaining: u32 },

    /// The variant exists but holds fewer than the requested units.
    Insufficient { available: u32 },

    /// No variant exists for the product and size.
    NotFound,
}

impl DecrementOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Normalize a size label: trimmed and uppercased. Blank input has no size.
#[must_use]
pub fn normalize_size(size: Option<&str>) -> Option<String> {
    let size = size?.trim();

    if size.is_empty() {
        None
    } else {
        Some(size.to_uppercase())
    }
}
