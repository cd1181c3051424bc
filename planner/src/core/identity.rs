//! Address identity
//!
//! Maps free-text addresses to a stable [`AddressKey`]. The digest is a
//! 32-bit rolling hash over UTF-16 code units, so distinct addresses can
//! collide; callers tolerate the occasional false merge.

use shared::AddressKey;

/// Lower-case, collapse whitespace runs to one space, trim both ends
pub fn normalize_address(address: &str) -> String {
    address
        .to_lowercase()
        .split(is_address_space)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace as browsers match it: the byte order mark counts, NEL does not
fn is_address_space(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

/// Key of an address, stable across process runs
pub fn address_key(address: &str) -> AddressKey {
    let normalized = normalize_address(address);

    let mut hash: i32 = 0;
    for unit in normalized.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }

    // i32::MIN has no positive i32 counterpart
    AddressKey::new(i64::from(hash).abs().to_string())
}
