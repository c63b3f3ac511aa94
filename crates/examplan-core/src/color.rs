//! Stable pastel colors keyed by subject name.
//!
//! The hash walks UTF-16 code units with `h = h * 31 + unit` in wrapping
//! 32-bit arithmetic, so every caller (calendar, progress export, picker)
//! gets the same color for the same key.
//!
//! Red takes `h % 80` of the unsigned hash. Green and blue shift the hash
//! reinterpreted as a signed 32-bit value and take a truncating remainder,
//! so hashes at or above `2^31` give them offsets down to -79.

use serde::{Deserialize, Serialize};
use std::fmt;

const CHANNEL_BASE: i32 = 150;
const CHANNEL_SPAN: i32 = 80;

/// An RGB color. Red stays in `150..230`; green and blue lie in `71..230`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PastelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PastelColor {
    /// Derive the color for `key`.
    pub fn of(key: &str) -> Self {
        let h = key
            .encode_utf16()
            .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)));
        // h % 80 < 80, so the cast is lossless
        let unsigned_rest = (h % CHANNEL_SPAN as u32) as i32;
        let signed = h as i32;
        Self {
            r: channel(unsigned_rest),
            g: channel(signed >> 3),
            b: channel(signed >> 6),
        }
    }

    /// `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn channel(bits: i32) -> u8 {
    // bits % 80 is in -79..=79, so the sum is in 71..=229
    (CHANNEL_BASE + bits % CHANNEL_SPAN) as u8
}

impl fmt::Display for PastelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_the_base_gray() {
        assert_eq!(PastelColor::of("").to_string(), "rgb(150, 150, 150)");
    }

    #[test]
    fn known_keys_hash_exactly() {
        // h("a") = 97
        assert_eq!(PastelColor::of("a"), PastelColor { r: 167, g: 162, b: 151 });
        // h("ab") = 97 * 31 + 98 = 3105
        assert_eq!(PastelColor::of("ab"), PastelColor { r: 215, g: 218, b: 198 });
    }

    #[test]
    fn high_hashes_use_signed_shifts() {
        // h("Korean") = 2253193508, above i32::MAX
        assert_eq!(PastelColor::of("Korean").to_string(), "rgb(218, 106, 74)");
        assert_eq!(PastelColor::of("Korean").to_hex(), "#da6a4a");
    }

    #[test]
    fn long_keys_wrap_without_panicking() {
        let c = PastelColor::of(&"수학".repeat(64));
        assert!((150..230).contains(&c.r));
        assert!((71..230).contains(&c.g));
        assert!((71..230).contains(&c.b));
    }

    #[test]
    fn same_key_same_color() {
        assert_eq!(PastelColor::of("English"), PastelColor::of("English"));
        assert_eq!(PastelColor::of("a").to_hex(), "#a7a297");
    }
}
