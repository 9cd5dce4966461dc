//! GSM 03.38 default alphabet and septet unpacking.

const ESCAPE: u8 = 0x1B;

// Slot 0x1B is the escape code; it only renders for a doubled escape.
#[rustfmt::skip]
const DEFAULT_ALPHABET: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å',
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', ' ', 'Æ', 'æ', 'ß', 'É',
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§',
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à',
];

fn extension(septet: u8) -> Option<char> {
    match septet {
        0x0A => Some('\u{0C}'),
        0x14 => Some('^'),
        0x28 => Some('{'),
        0x29 => Some('}'),
        0x2F => Some('\\'),
        0x3C => Some('['),
        0x3D => Some('~'),
        0x3E => Some(']'),
        0x40 => Some('|'),
        0x65 => Some('€'),
        _ => None,
    }
}

/// Number of octets needed to hold `count` septets after `skip_bits` bits.
pub(crate) fn packed_len(skip_bits: usize, count: usize) -> usize {
    (skip_bits + count * 7).div_ceil(8)
}

/// Unpack `count` septets starting `skip_bits` into `data`.
///
/// Callers check `packed_len` first; missing trailing octets read as zero.
pub(crate) fn unpack_septets(data: &[u8], skip_bits: usize, count: usize) -> Vec<u8> {
    (0..count)
        .map(|i| {
            let bit = skip_bits + i * 7;
            let (byte, offset) = (bit / 8, bit % 8);
            let lo = data.get(byte).copied().unwrap_or(0) as u16;
            let hi = data.get(byte + 1).copied().unwrap_or(0) as u16;
            (((hi << 8) | lo) >> offset) as u8 & 0x7F
        })
        .collect()
}

/// Map unpacked septets to text, resolving escape sequences.
///
/// An unknown extension code falls back to the default-table character, and a
/// dangling escape at the end is rendered as a space.
pub(crate) fn decode(septets: &[u8]) -> String {
    let mut text = String::with_capacity(septets.len());
    let mut iter = septets.iter().copied();

    while let Some(septet) = iter.next() {
        if septet != ESCAPE {
            text.push(DEFAULT_ALPHABET[septet as usize]);
            continue;
        }
        match iter.next() {
            Some(code) => {
                text.push(extension(code).unwrap_or(DEFAULT_ALPHABET[code as usize]));
            }
            None => text.push(' '),
        }
    }

    text
}
