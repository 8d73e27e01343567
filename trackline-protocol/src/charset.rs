//! Mapping text onto the A00 character ROM
//!
//! The common HD44780 ROM is ASCII for 0x20-0x7D except that 0x5C is `¥` and
//! 0x7E is `→`. Track metadata is arbitrary Unicode, so characters are folded
//! to something the ROM can show.

/// Byte shown for characters the ROM has no glyph for
pub const REPLACEMENT: u8 = b'?';

/// ROM code for a character
pub fn encode_char(c: char) -> u8 {
    match c {
        '\\' => b'/',
        '~' => b'-',
        '¥' => 0x5C,
        '→' => 0x7E,
        '←' => 0x7F,
        '°' => 0xDF,
        ' '..='}' => c as u8,
        _ => fold_latin(c).unwrap_or(REPLACEMENT),
    }
}

/// ROM codes for a string, one per character
pub fn encode_str(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.chars().map(encode_char)
}

/// Strip accents from Latin-1 and common typographic characters
fn fold_latin(c: char) -> Option<u8> {
    let folded = match c {
        'À'..='Å' => b'A',
        'Æ' => b'A',
        'Ç' => b'C',
        'È'..='Ë' => b'E',
        'Ì'..='Ï' => b'I',
        'Ð' => b'D',
        'Ñ' => b'N',
        'Ò'..='Ö' | 'Ø' => b'O',
        'Ù'..='Ü' => b'U',
        'Ý' => b'Y',
        'ß' => b's',
        'à'..='å' => b'a',
        'æ' => b'a',
        'ç' => b'c',
        'è'..='ë' => b'e',
        'ì'..='ï' => b'i',
        'ð' => b'd',
        'ñ' => b'n',
        'ò'..='ö' | 'ø' => b'o',
        'ù'..='ü' => b'u',
        'ý' | 'ÿ' => b'y',
        '\u{2018}' | '\u{2019}' | '\u{00B4}' => b'\'',
        '\u{201C}' | '\u{201D}' => b'"',
        '\u{2013}' | '\u{2014}' => b'-',
        '\u{00A0}' | '\t' => b' ',
        _ => return None,
    };
    Some(folded)
}
