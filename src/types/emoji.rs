//! Emoji codes and the fixed target catalog

use serde::{Deserialize, Serialize};

/// A Unicode code point identifying an emoji
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmojiCode(pub u32);

/// Every emoji the face classifier can report, in catalog order
pub const EMOJI_CATALOG: [EmojiCode; 13] = [
    EmojiCode(128528), // 😐
    EmojiCode(9786),   // ☺
    EmojiCode(128515), // 😃
    EmojiCode(128524), // 😌
    EmojiCode(128527), // 😏
    EmojiCode(128521), // 😉
    EmojiCode(128535), // 😗
    EmojiCode(128539), // 😛
    EmojiCode(128540), // 😜
    EmojiCode(128542), // 😞
    EmojiCode(128545), // 😡
    EmojiCode(128563), // 😳
    EmojiCode(128561), // 😱
];

const HIGH_SURROGATE_START: u16 = 0xD800;
const HIGH_SURROGATE_END: u16 = 0xDBFF;
const LOW_SURROGATE_START: u16 = 0xDC00;
const LOW_SURROGATE_END: u16 = 0xDFFF;

/// Convert a 1-or-2 unit UTF-16 sequence into its code point.
///
/// A surrogate pair decodes as `(hi - 0xD800) * 0x400 + (lo - 0xDC00) + 0x10000`.
/// Any other sequence yields its first unit, so a BMP emoji followed by a
/// variation selector still maps to the base character.
pub fn normalize(units: &[u16]) -> EmojiCode {
    match units {
        [] => EmojiCode(0),
        [hi, lo, ..]
            if (HIGH_SURROGATE_START..=HIGH_SURROGATE_END).contains(hi)
                && (LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(lo) =>
        {
            let hi = u32::from(*hi - HIGH_SURROGATE_START);
            let lo = u32::from(*lo - LOW_SURROGATE_START);
            EmojiCode(hi * 0x400 + lo + 0x10000)
        }
        [unit, ..] => EmojiCode(u32::from(*unit)),
    }
}

impl EmojiCode {
    /// Normalize the classifier's dominant emoji string
    pub fn from_dominant(dominant: &str) -> Self {
        let units: Vec<u16> = dominant.encode_utf16().take(2).collect();
        normalize(&units)
    }

    /// Raw code point value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The emoji as a `char`, if the code point is valid
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.0)
    }

    /// HTML numeric entity, e.g. `&#128515;`
    pub fn html_entity(&self) -> String {
        format!("&#{};", self.0)
    }

    /// Is this one of the catalog targets?
    pub fn in_catalog(&self) -> bool {
        EMOJI_CATALOG.contains(self)
    }
}

impl std::fmt::Display for EmojiCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_char() {
            Some(c) => write!(f, "{}", c),
            None => write!(f, "U+{:X}", self.0),
        }
    }
}
