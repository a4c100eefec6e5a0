//! PAM120 substitution scores over encoded residues.
//!
//! Residues are encoded as `1..=23` following the order `ARNDCQEGHILKMFPSTWYVBZX`.
//! Code `0` marks a position ignored by a spaced seed and always scores `0`.

use lazy_static::lazy_static;

/// Residue order of the substitution table, code `i + 1` is `ALPHABET[i]`
pub const ALPHABET: &[u8; 23] = b"ARNDCQEGHILKMFPSTWYVBZX";

/// Number of residue codes, including the ignored position `0`
pub const NUM_CODES: usize = 24;

/// Code used for `X` and every unrecognised symbol
pub const UNKNOWN: u8 = 23;

#[rustfmt::skip]
const PAM120_23: [[i16; 23]; 23] = [
    //A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X
    [ 3, -3, -1,  0, -3, -1,  0,  1, -3, -1, -3, -2, -2, -4,  1,  1,  1, -7, -4,  0,  0, -1, -1],
    [-3,  6, -1, -3, -4,  1, -3, -4,  1, -2, -4,  2, -1, -5, -1, -1, -2,  1, -5, -3, -2, -1, -2],
    [-1, -1,  4,  2, -5,  0,  1,  0,  2, -2, -4,  1, -3, -4, -2,  1,  0, -4, -2, -3,  3,  0, -1],
    [ 0, -3,  2,  5, -7,  1,  3,  0,  0, -3, -5, -1, -4, -7, -3,  0, -1, -8, -5, -3,  4,  3, -2],
    [-3, -4, -5, -7,  9, -7, -7, -4, -4, -3, -7, -7, -6, -6, -4,  0, -3, -8, -1, -3, -6, -7, -4],
    [-1,  1,  0,  1, -7,  6,  2, -3,  3, -3, -2,  0, -1, -6,  0, -2, -2, -6, -5, -3,  0,  4, -1],
    [ 0, -3,  1,  3, -7,  2,  5, -1, -1, -3, -4, -1, -3, -7, -2, -1, -2, -8, -5, -3,  3,  4, -1],
    [ 1, -4,  0,  0, -4, -3, -1,  5, -4, -4, -5, -3, -4, -5, -2,  1, -1, -8, -6, -2,  0, -2, -2],
    [-3,  1,  2,  0, -4,  3, -1, -4,  7, -4, -3, -2, -4, -3, -1, -2, -3, -3, -1, -3,  1,  1, -2],
    [-1, -2, -2, -3, -3, -3, -3, -4, -4,  6,  1, -3,  1,  0, -3, -2,  0, -6, -2,  3, -3, -3, -1],
    [-3, -4, -4, -5, -7, -2, -4, -5, -3,  1,  5, -4,  3,  0, -3, -4, -3, -3, -2,  1, -4, -3, -2],
    [-2,  2,  1, -1, -7,  0, -1, -3, -2, -3, -4,  5,  0, -7, -2, -1, -1, -5, -5, -4,  0, -1, -2],
    [-2, -1, -3, -4, -6, -1, -3, -4, -4,  1,  3,  0,  8, -1, -3, -2, -1, -6, -4,  1, -4, -2, -2],
    [-4, -5, -4, -7, -6, -6, -7, -5, -3,  0,  0, -7, -1,  8, -5, -3, -4, -1,  4, -3, -5, -6, -3],
    [ 1, -1, -2, -3, -4,  0, -2, -2, -1, -3, -3, -2, -3, -5,  6,  1, -1, -7, -6, -2, -2, -1, -2],
    [ 1, -1,  1,  0,  0, -2, -1,  1, -2, -2, -4, -1, -2, -3,  1,  3,  2, -2, -3, -2,  0, -1, -1],
    [ 1, -2,  0, -1, -3, -2, -2, -1, -3,  0, -3, -1, -1, -4, -1,  2,  4, -6, -3,  0,  0, -2, -1],
    [-7,  1, -4, -8, -8, -6, -8, -8, -3, -6, -3, -5, -6, -1, -7, -2, -6, 12, -2, -8, -6, -7, -5],
    [-4, -5, -2, -5, -1, -5, -5, -6, -1, -2, -2, -5, -4,  4, -6, -3, -3, -2,  8, -3, -3, -5, -3],
    [ 0, -3, -3, -3, -3, -3, -3, -2, -3,  3,  1, -4,  1, -3, -2, -2,  0, -8, -3,  5, -3, -3, -1],
    [ 0, -2,  3,  4, -6,  0,  3,  0,  1, -3, -4,  0, -4, -5, -2,  0,  0, -6, -3, -3,  4,  2, -1],
    [-1, -1,  0,  3, -7,  4,  4, -2,  1, -3, -3, -1, -2, -6, -1, -1, -2, -7, -5, -3,  2,  4, -1],
    [-1, -2, -1, -2, -4, -1, -1, -2, -2, -1, -2, -2, -2, -3, -2, -1, -1, -5, -3, -1, -1, -1, -2],
];

lazy_static! {
    /// Scores indexed by residue code, row and column `0` are zero
    static ref PAM120: [[i16; NUM_CODES]; NUM_CODES] = {
        let mut m = [[0i16; NUM_CODES]; NUM_CODES];
        for (i, row) in PAM120_23.iter().enumerate() {
            for (j, &score) in row.iter().enumerate() {
                m[i + 1][j + 1] = score;
            }
        }
        m
    };

    /// Byte to residue code, both cases accepted
    static ref CODE_OF: [u8; 256] = {
        let mut table = [UNKNOWN; 256];
        for (i, &b) in ALPHABET.iter().enumerate() {
            table[b as usize] = (i + 1) as u8;
            table[b.to_ascii_lowercase() as usize] = (i + 1) as u8;
        }
        table
    };

    /// For every code, all residue codes sorted by decreasing score against it
    static ref BEST_FIRST: Vec<Vec<u8>> = (0..NUM_CODES as u8)
        .map(|code| {
            let mut order: Vec<u8> = (1..=UNKNOWN).collect();
            // stable sort keeps ties in alphabet order
            order.sort_by_key(|&other| -score(code, other));
            order
        })
        .collect();

    /// Best score reachable at a position holding `code`
    static ref ROW_MAX: Vec<i16> = (0..NUM_CODES as u8)
        .map(|code| {
            (1..=UNKNOWN)
                .map(|other| score(code, other))
                .max()
                .unwrap_or(0)
        })
        .collect();
}

/// Encode one residue symbol
#[inline]
pub fn encode(symbol: u8) -> u8 {
    CODE_OF[symbol as usize]
}

/// Decode a residue code, `-` for the ignored position
pub fn decode(code: u8) -> char {
    match code {
        0 => '-',
        c if (c as usize) <= ALPHABET.len() => ALPHABET[c as usize - 1] as char,
        _ => 'X',
    }
}

#[inline]
pub fn score(a: u8, b: u8) -> i16 {
    PAM120[a as usize][b as usize]
}

/// Residue codes ordered from the most to the least similar to `code`.
///
/// `B`, `Z` and `X` are included, so the neighbours of an s-mer reach every
/// s-mer that scores against it, whatever residues it holds.
pub fn best_first(code: u8) -> &'static [u8] {
    &BEST_FIRST[code as usize]
}

pub fn row_max(code: u8) -> i16 {
    ROW_MAX[code as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode(b'A'), 1);
        assert_eq!(encode(b'a'), 1);
        assert_eq!(encode(b'V'), 20);
        assert_eq!(encode(b'X'), UNKNOWN);
        assert_eq!(encode(b'U'), UNKNOWN);
        assert_eq!(encode(b'*'), UNKNOWN);
        assert_eq!(decode(encode(b'W')), 'W');
        assert_eq!(decode(0), '-');
    }

    #[test]
    fn test_symmetric() {
        for a in 0..NUM_CODES as u8 {
            for b in 0..NUM_CODES as u8 {
                assert_eq!(score(a, b), score(b, a));
            }
        }
        assert_eq!(score(0, encode(b'W')), 0);
        assert_eq!(score(encode(b'W'), encode(b'W')), 12);
    }

    #[test]
    fn test_best_first() {
        let w = encode(b'W');
        let order = best_first(w);
        assert_eq!(order.len(), ALPHABET.len());
        assert_eq!(order[0], w);
        assert!(best_first(encode(b'D')).contains(&encode(b'B')));
        for pair in order.windows(2) {
            assert!(score(w, pair[0]) >= score(w, pair[1]));
        }
        assert_eq!(row_max(w), 12);
    }
}
