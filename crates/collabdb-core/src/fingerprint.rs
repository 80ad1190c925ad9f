//! Deterministic dedup key for collaboration records.

/// Separator placed between sorted brand names before hashing.
const BRAND_SEPARATOR: &str = "-";

/// Compute the dedup fingerprint for a title and brand set.
///
/// Brands are sorted by ordinal comparison and joined with `-`, appended to
/// the title, and the whole string is lowercased. Its UTF-16 code units are
/// folded with `hash = (hash << 5) - hash + unit` in wrapping 32-bit signed
/// arithmetic, starting from zero, and the result is rendered in base 36.
///
/// Collisions are possible and are treated as duplicates by the store.
#[must_use]
pub fn fingerprint<S: AsRef<str>>(title: &str, brands: &[S]) -> String {
    let mut sorted: Vec<&str> = brands.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();

    let key = format!("{title}{}", sorted.join(BRAND_SEPARATOR)).to_lowercase();

    let hash = key.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });

    to_base36(hash)
}

fn to_base36(value: i32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut magnitude = i64::from(value).unsigned_abs();
    if magnitude == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while magnitude > 0 {
        // `magnitude % 36` is always < 36.
        #[allow(clippy::cast_possible_truncation)]
        out.push(DIGITS[(magnitude % 36) as usize]);
        magnitude /= 36;
    }
    if value < 0 {
        out.push(b'-');
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
