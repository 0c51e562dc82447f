//! Automatic names for circuit inputs and outputs.
//!
//! Inputs are named `A` to `M`, then `AA` to `AM`, `BA` to `BM`, and so on:
//! a bijective base-13 numbering over the letters `A..M`. Outputs use the
//! same scheme over the mirrored letters `Z..N`, so input and output names
//! never collide.
//!
//! ```
//! use logic_lab::label::{input_label, output_label};
//!
//! assert_eq!(input_label(0), "A");
//! assert_eq!(input_label(12), "M");
//! assert_eq!(input_label(13), "AA");
//! assert_eq!(input_label(26), "BA");
//! assert_eq!(output_label(0), "Z");
//! assert_eq!(output_label(13), "ZZ");
//! ```

const INPUT_ALPHABET: [char; 13] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M'];
const OUTPUT_ALPHABET: [char; 13] = ['Z', 'Y', 'X', 'W', 'V', 'U', 'T', 'S', 'R', 'Q', 'P', 'O', 'N'];

fn encode(index: usize, alphabet: &[char; 13]) -> String {
    let base = alphabet.len();
    let mut digits = vec![alphabet[index % base]];
    let mut rest = index / base;
    while rest > 0 {
        rest -= 1;
        digits.push(alphabet[rest % base]);
        rest /= base;
    }
    digits.iter().rev().collect()
}

/// Name of the `index`-th input (0-based).
pub fn input_label(index: usize) -> String {
    encode(index, &INPUT_ALPHABET)
}

/// Name of the `index`-th output (0-based).
pub fn output_label(index: usize) -> String {
    encode(index, &OUTPUT_ALPHABET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        let inputs: String = (0..13).map(input_label).collect();
        assert_eq!(inputs, "ABCDEFGHIJKLM");
        let outputs: String = (0..13).map(output_label).collect();
        assert_eq!(outputs, "ZYXWVUTSRQPON");
    }

    #[test]
    fn test_two_letters() {
        assert_eq!(input_label(13), "AA");
        assert_eq!(input_label(25), "AM");
        assert_eq!(input_label(26), "BA");
        assert_eq!(input_label(13 + 13 * 13 - 1), "MM");
        assert_eq!(output_label(14), "ZY");
        assert_eq!(output_label(26), "YZ");
    }

    #[test]
    fn test_three_letters() {
        // 13 one-letter and 169 two-letter names come first.
        assert_eq!(input_label(13 + 169), "AAA");
        assert_eq!(output_label(13 + 169), "ZZZ");
    }

    #[test]
    fn test_labels_unique() {
        let labels: std::collections::HashSet<String> = (0..500).map(input_label).collect();
        assert_eq!(labels.len(), 500);
    }
}
