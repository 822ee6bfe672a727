//! Integer to Roman numeral conversion

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Convert a 1-based ordinal to its Roman numeral. Zero yields an empty
/// string; ordinals never go below one in practice.
pub fn to_roman(mut number: u32) -> String {
    let mut result = String::new();
    for (value, numeral) in NUMERALS {
        while number >= value {
            result.push_str(numeral);
            number -= value;
        }
    }
    result
}
