//! Label-to-category decision table.
//!
//! A photo of bottom-wear asks for a top, a photo of top-wear asks for a
//! bottom, anything else gets outerwear. Bottom-wear is checked first.

use crate::models::ClothingType;

pub const BOTTOM_WEAR: [&str; 10] = [
    "jeans",
    "trousers",
    "skirt",
    "pants",
    "shorts",
    "leggings",
    "capris",
    "sweatpants",
    "joggers",
    "denim",
];

pub const TOP_WEAR: [&str; 11] = [
    "shirt",
    "t-shirt",
    "blouse",
    "top",
    "sweater",
    "hoodie",
    "tank top",
    "polo shirt",
    "camisole",
    "tunic",
    "vest",
];

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

fn any_in<S: AsRef<str>>(labels: &[S], vocabulary: &[&str]) -> bool {
    labels
        .iter()
        .any(|label| vocabulary.contains(&normalize(label.as_ref()).as_str()))
}

/// Decide which category to recommend for a photo with the given labels.
///
/// Matching is whole-term and case-insensitive: `"Denim"` matches, `"denim jacket"` does not.
pub fn classify<S: AsRef<str>>(labels: &[S]) -> ClothingType {
    if any_in(labels, &BOTTOM_WEAR) {
        ClothingType::Top
    } else if any_in(labels, &TOP_WEAR) {
        ClothingType::Bottom
    } else {
        ClothingType::Outer
    }
}
