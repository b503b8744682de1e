//! Color handling for language cards.
//!
//! Hex canonicalization and the per-language color overlay applied on top of
//! the colors GitHub reports.

use std::collections::HashMap;

use crate::stats::LanguageProfile;

/// Fallback color for languages GitHub reports without one.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#858585";

/// Canonicalizes a hex color string to carry exactly one leading `#`.
///
/// Purely syntactic: the input is not checked for valid hex digits.
pub fn normalize_hex(raw: &str) -> String {
    format!("#{}", raw.trim().trim_start_matches('#'))
}

/// Whether a string is a plausible hex color (3, 4, 6 or 8 hex digits,
/// leading `#` optional).
pub fn is_valid_hex(raw: &str) -> bool {
    let digits = raw.trim().trim_start_matches('#');
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Applies user-supplied color overrides onto a language profile.
///
/// Matching is case-insensitive on language name; the lookup table is
/// lower-cased once up front so the pass stays linear in profile size.
/// Only matched entries have their color replaced (canonicalized to a single
/// leading `#`); everything else is copied through untouched. The input
/// profile is never mutated.
pub fn apply_language_color_overrides(
    profile: &LanguageProfile,
    overrides: Option<&HashMap<String, String>>,
) -> LanguageProfile {
    let overrides = match overrides {
        Some(map) if !map.is_empty() => map,
        _ => return profile.clone(),
    };

    let lookup: HashMap<String, &str> = overrides
        .iter()
        .map(|(name, color)| (name.to_lowercase(), color.as_str()))
        .collect();

    profile
        .iter()
        .map(|(name, record)| {
            let record = match lookup.get(&name.to_lowercase()) {
                Some(color) => {
                    let mut record = record.clone();
                    record.color = normalize_hex(color);
                    record
                }
                None => record.clone(),
            };
            (name.clone(), record)
        })
        .collect()
}
