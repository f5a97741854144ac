//! Model name resolution
//!
//! Turns a requested model name into a cache key and, for keys that can be
//! built on demand, the kind to build.

use modelcache_core::ModelKind;

/// Key of the always-present fallback model
pub const FALLBACK_KEY: &str = "humanoid";

/// Key every numeric block id maps onto
pub const BLOCK_KEY: &str = "block";

/// Names that can be constructed on demand, matched exactly.
///
/// The fallback kind has no entry: it only exists as the entry created with
/// the cache.
pub const CONSTRUCTORS: [(&str, ModelKind); 8] = [
    ("chicken", ModelKind::Chicken),
    ("creeper", ModelKind::Creeper),
    ("pig", ModelKind::Pig),
    ("sheep", ModelKind::Sheep),
    ("skeleton", ModelKind::Skeleton),
    ("spider", ModelKind::Spider),
    ("zombie", ModelKind::Zombie),
    (BLOCK_KEY, ModelKind::Block),
];

/// Cache key for a requested model name
///
/// Names that read as a byte are block ids and share the block model. Leading
/// and trailing whitespace is ignored and a sign is allowed, so " 7", "+7" and
/// "-0" all count. Other names, including out of range numbers such as "999"
/// or "-1", are used as-is.
pub fn cache_key(name: &str) -> &str {
    if is_block_id(name) {
        BLOCK_KEY
    } else {
        name
    }
}

fn is_block_id(name: &str) -> bool {
    let number = name.trim();
    match number.strip_prefix('-') {
        // Negative zero is the only negative value that fits in a byte
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b == b'0'),
        None => number.parse::<u8>().is_ok(),
    }
}

/// Kind constructed for a cache key, if the key has a constructor
pub fn constructible_kind(key: &str) -> Option<ModelKind> {
    CONSTRUCTORS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, kind)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_names_map_to_block() {
        assert_eq!(cache_key("0"), BLOCK_KEY);
        assert_eq!(cache_key("7"), BLOCK_KEY);
        assert_eq!(cache_key("42"), BLOCK_KEY);
        assert_eq!(cache_key("255"), BLOCK_KEY);
        assert_eq!(cache_key("007"), BLOCK_KEY);
        assert_eq!(cache_key("+7"), BLOCK_KEY);
    }

    #[test]
    fn test_padded_and_signed_numbers_map_to_block() {
        assert_eq!(cache_key(" 7"), BLOCK_KEY);
        assert_eq!(cache_key("7 "), BLOCK_KEY);
        assert_eq!(cache_key("\t42\n"), BLOCK_KEY);
        assert_eq!(cache_key(" +7 "), BLOCK_KEY);
        assert_eq!(cache_key("-0"), BLOCK_KEY);
        assert_eq!(cache_key("-000"), BLOCK_KEY);
    }

    #[test]
    fn test_out_of_range_numbers_pass_through() {
        assert_eq!(cache_key("256"), "256");
        assert_eq!(cache_key("999"), "999");
        assert_eq!(cache_key("-1"), "-1");
        assert_eq!(cache_key("-"), "-");
        assert_eq!(cache_key("-+0"), "-+0");
        assert_eq!(cache_key("1.5"), "1.5");
        assert_eq!(cache_key("7 7"), "7 7");
        assert_eq!(cache_key(" "), " ");
        assert_eq!(cache_key(""), "");
    }

    #[test]
    fn test_names_pass_through() {
        assert_eq!(cache_key("pig"), "pig");
        assert_eq!(cache_key("humanoid"), FALLBACK_KEY);
        assert_eq!(cache_key("dragon"), "dragon");
    }

    #[test]
    fn test_constructor_table() {
        assert_eq!(constructible_kind("pig"), Some(ModelKind::Pig));
        assert_eq!(constructible_kind("block"), Some(ModelKind::Block));
        assert_eq!(constructible_kind("Pig"), None);
        assert_eq!(constructible_kind("dragon"), None);
    }

    #[test]
    fn test_fallback_has_no_constructor() {
        assert_eq!(constructible_kind(FALLBACK_KEY), None);
        assert!(CONSTRUCTORS
            .iter()
            .all(|(_, kind)| !kind.is_fallback()));
    }

    #[test]
    fn test_constructor_names_are_canonical() {
        for (name, kind) in CONSTRUCTORS {
            assert_eq!(name, kind.as_str());
        }
    }
}
