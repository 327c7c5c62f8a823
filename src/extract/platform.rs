//! Venue label resolution.

use crate::types::Platform;

/// Known spellings, normalized (alphanumeric, lower-case).
/// Order matters for substring fallback: the first contained alias wins.
const PLATFORM_ALIASES: &[(&str, Platform)] = &[
    ("lighter", Platform::Lighter),
    ("zklighter", Platform::Lighter),
    ("hyperliquid", Platform::Hyperliquid),
    ("hyperliquidv2", Platform::Hyperliquid),
    ("hyper", Platform::Hyperliquid),
];

fn clean_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a free-text platform label (or path segment) to a venue.
///
/// Exact alias match first, then substring containment.
pub fn resolve_platform(label: &str) -> Option<Platform> {
    let key = clean_label(label);
    if key.is_empty() {
        return None;
    }

    PLATFORM_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .or_else(|| PLATFORM_ALIASES.iter().find(|(alias, _)| key.contains(alias)))
        .map(|(_, platform)| *platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_aliases() {
        assert_eq!(resolve_platform("zkLighter"), Some(Platform::Lighter));
        assert_eq!(resolve_platform("HyperliquidV2"), Some(Platform::Hyperliquid));
        assert_eq!(resolve_platform("hyper"), Some(Platform::Hyperliquid));
    }

    #[test]
    fn test_punctuation_is_ignored() {
        assert_eq!(resolve_platform("Hyper-Liquid"), Some(Platform::Hyperliquid));
        assert_eq!(resolve_platform(" zk_lighter "), Some(Platform::Lighter));
    }

    #[test]
    fn test_substring_fallback() {
        assert_eq!(resolve_platform("lighter_perps"), Some(Platform::Lighter));
        assert_eq!(resolve_platform("hyperliquid-mainnet"), Some(Platform::Hyperliquid));
    }

    #[test]
    fn test_unresolved_labels() {
        assert_eq!(resolve_platform("dYdX"), None);
        assert_eq!(resolve_platform(""), None);
        assert_eq!(resolve_platform("0"), None);
        assert_eq!(resolve_platform("--"), None);
    }
}
