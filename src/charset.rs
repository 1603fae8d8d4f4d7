// Copyright (c) 2026 rezky_nightky

const KATAKANA: &str = "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン";
const PUNCTUATION: &str = "!@#$%^&*()_+-=[]{};':\",./<>?\\|`~";

/// Digits are repeated this many times so column sequences skew numeric.
const DIGIT_WEIGHT: usize = 8;

fn push_range(out: &mut Vec<char>, start: u32, end: u32) {
    for v in start..=end {
        if let Some(ch) = char::from_u32(v) {
            out.push(ch);
        }
    }
}

/// Weighted alphabet the column sequences draw from: katakana, digits
/// (heavily weighted), and ASCII punctuation.
pub fn build_alphabet() -> Vec<char> {
    let mut out: Vec<char> = Vec::new();
    out.extend(KATAKANA.chars());
    for _ in 0..DIGIT_WEIGHT {
        push_range(&mut out, 0x30, 0x39);
    }
    out.extend(PUNCTUATION.chars());
    out
}
