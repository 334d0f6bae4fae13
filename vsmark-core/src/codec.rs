//! Byte <-> Unicode variation-selector codec.
//!
//! Maps the 256 possible byte values onto the 256 variation-selector
//! code points split across two Unicode blocks:
//!
//! - Primary: U+FE00..=U+FE0F (16 points, bytes 0-15).
//! - Supplement: U+E0100..=U+E01EF (240 points, bytes 16-255).
//!
//! The mapping is total and bijective: every byte maps to exactly one
//! code point and vice versa.

/// Start of the primary variation-selector block (VS1).
pub const VS_START: u32 = 0xFE00;
/// End of the primary variation-selector block (VS16), inclusive.
pub const VS_END: u32 = 0xFE0F;
/// Start of the variation-selector supplement block (VS17).
pub const VS_SUPPLEMENT_START: u32 = 0xE0100;
/// End of the variation-selector supplement block (VS256), inclusive.
pub const VS_SUPPLEMENT_END: u32 = 0xE01EF;

/// Convert a byte to its variation-selector code point.
pub fn byte_to_vs(byte: u8) -> u32 {
    if byte < 16 {
        VS_START + byte as u32
    } else {
        VS_SUPPLEMENT_START + (byte as u32 - 16)
    }
}

/// Convert a code point back to a byte, if it falls in either
/// variation-selector block.
pub fn vs_to_byte(code_point: u32) -> Option<u8> {
    if (VS_START..=VS_END).contains(&code_point) {
        Some((code_point - VS_START) as u8)
    } else if (VS_SUPPLEMENT_START..=VS_SUPPLEMENT_END).contains(&code_point) {
        Some((code_point - VS_SUPPLEMENT_START + 16) as u8)
    } else {
        None
    }
}

/// Returns `true` if `code_point` is a variation selector in either block.
pub fn is_variation_selector(code_point: u32) -> bool {
    vs_to_byte(code_point).is_some()
}

/// Encode a byte slice as a string of variation-selector characters.
///
/// Every byte value 0-255 has a defined mapping, so this never fails.
pub fn encode_bytes(data: &[u8]) -> String {
    data.iter()
        .map(|&b| char::from_u32(byte_to_vs(b)).expect("vs codec range is always valid char"))
        .collect()
}

/// Decode a string, recovering the bytes hidden in any trailing run of
/// variation selectors.
///
/// Code points before the run starts (the carrier / anchor characters)
/// are skipped. The run ends at the first non-variation-selector code
/// point encountered after at least one byte has been collected. If no
/// variation selectors are present at all, returns an empty vector.
pub fn decode_bytes(text: &str) -> Vec<u8> {
    let mut decoded = Vec::new();
    for ch in text.chars() {
        match vs_to_byte(ch as u32) {
            Some(byte) => decoded.push(byte),
            None if !decoded.is_empty() => break,
            None => continue,
        }
    }
    decoded
}
