/// [Reflected binary Gray code][gray] of `i`.
///
/// ```text
/// i -> i ^ (i >> 1)
/// ```
///
/// [gray]: https://en.wikipedia.org/wiki/Gray_code
pub fn gray_code(i: usize) -> usize {
    i ^ (i >> 1)
}

/// Inverse of [`gray_code`].
pub fn gray_decode(mut g: usize) -> usize {
    let mut i = g;
    while g > 0 {
        g >>= 1;
        i ^= g;
    }
    i
}

/// Value of the variable at `position` (0 is the most significant) in an
/// assignment index of the given `width`.
pub fn bit_of(index: u32, width: usize, position: usize) -> bool {
    assert!(position < width, "Bit position {} out of range for width {}", position, width);
    (index >> (width - 1 - position)) & 1 != 0
}

/// Left-padded binary rendering of `index`, most significant bit first.
pub fn to_binary(index: u32, width: usize) -> String {
    (0..width)
        .map(|position| if bit_of(index, width, position) { '1' } else { '0' })
        .collect()
}

/// Number of assignments over `width` variables.
pub fn space_size(width: usize) -> u32 {
    assert!(width < 32, "Too many variables: {}", width);
    1 << width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_code() {
        // i     0  1  2  3  4  5  6  7
        // ------------------------------
        // gray  0  1  3  2  6  7  5  4
        assert_eq!(gray_code(0), 0);
        assert_eq!(gray_code(1), 1);
        assert_eq!(gray_code(2), 3);
        assert_eq!(gray_code(3), 2);
        assert_eq!(gray_code(4), 6);
        assert_eq!(gray_code(7), 4);
    }

    #[test]
    fn test_gray_decode() {
        for i in 0..64 {
            assert_eq!(gray_decode(gray_code(i)), i);
        }
    }

    #[test]
    fn test_gray_adjacency() {
        // A 2-bit axis wraps around: 00, 01, 11, 10.
        for i in 0..4 {
            let a = gray_code(i);
            let b = gray_code((i + 1) % 4);
            assert_eq!((a ^ b).count_ones(), 1);
        }
    }

    #[test]
    fn test_bits() {
        assert_eq!(to_binary(5, 3), "101");
        assert_eq!(to_binary(5, 4), "0101");
        assert_eq!(to_binary(0, 2), "00");
        assert!(bit_of(0b1000, 4, 0));
        assert!(!bit_of(0b1000, 4, 3));
        assert_eq!(space_size(4), 16);
    }
}
