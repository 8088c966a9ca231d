//! The fixed category registry
//!
//! Categories are an ordered, immutable set. Both the interpreters and the
//! analytics layer treat anything outside this set as [`OTHER_CATEGORY`].

/// All allowed transaction categories, in display order.
/// "Other" is always present and always last.
pub const CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Healthcare",
    "Utilities",
    "Other",
];

/// The catch-all category substituted for anything unrecognized.
pub const OTHER_CATEGORY: &str = "Other";

/// Whether a label is a member of the registry.
pub fn is_known_category(label: &str) -> bool {
    CATEGORIES.contains(&label)
}
