//! Multi-level string comparison approximating the root collation used by
//! locale-aware sorting in browsers and Node.
//!
//! Primary weights order whitespace, then punctuation and symbols, then
//! digits, then letters (case- and accent-blind), then everything else.
//! Ties fall through to accents, then case, then raw code points, so the
//! result is a total order.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Root-collation order of the ASCII punctuation and symbol characters.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

const WHITESPACE_BAND: u32 = 0x1000;
const PUNCTUATION_BAND: u32 = 0x2000;
const DIGIT_BAND: u32 = 0x3000;
const LETTER_BAND: u32 = 0x4000;
const OTHER_BAND: u32 = 0x20_0000;

/// One collation element: a base character plus the combining marks that
/// follow it after canonical decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    primary: u32,
    marks: Vec<char>,
    upper: bool,
}

/// Letters with no canonical decomposition that still collate as a variant
/// of a Latin base letter. The variant is carried as a secondary mark.
fn fold_variant(ch: char) -> Option<(char, char)> {
    let base = match ch {
        'ł' => 'l',
        'Ł' => 'L',
        'ø' => 'o',
        'Ø' => 'O',
        'đ' => 'd',
        'Đ' => 'D',
        'ħ' => 'h',
        'Ħ' => 'H',
        'ı' => 'i',
        _ => return None,
    };
    Some((base, ch))
}

fn primary_weight(base: char) -> u32 {
    if base.is_whitespace() {
        WHITESPACE_BAND + u32::from(base)
    } else if let Some(pos) = PUNCTUATION_ORDER.find(base) {
        PUNCTUATION_BAND + pos as u32
    } else if base.is_ascii_digit() {
        DIGIT_BAND + (u32::from(base) - u32::from('0'))
    } else if base.is_ascii_alphabetic() {
        LETTER_BAND + (u32::from(base.to_ascii_lowercase()) - u32::from('a'))
    } else if base.is_alphabetic() {
        let folded = base.to_lowercase().next().unwrap_or(base);
        LETTER_BAND + 26 + u32::from(folded)
    } else {
        OTHER_BAND + u32::from(base)
    }
}

fn elements(s: &str) -> Vec<Element> {
    let mut out: Vec<Element> = Vec::new();
    for ch in s.nfd() {
        if is_combining_mark(ch) {
            match out.last_mut() {
                Some(prev) => prev.marks.push(ch),
                // A leading mark has no base; it only weighs at the secondary level.
                None => out.push(Element {
                    primary: 0,
                    marks: vec![ch],
                    upper: false,
                }),
            }
            continue;
        }
        let (base, marks) = match fold_variant(ch) {
            Some((base, variant)) => (base, vec![variant]),
            None => (ch, Vec::new()),
        };
        out.push(Element {
            primary: primary_weight(base),
            marks,
            upper: base.is_uppercase(),
        });
    }
    out
}

/// Compares two strings the way `a.localeCompare(b)` does in the default
/// locale, for the character repertoire found in dataset ids and keys.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let ea = elements(a);
    let eb = elements(b);

    let primary = ea.iter().map(|e| e.primary).cmp(eb.iter().map(|e| e.primary));
    if primary != Ordering::Equal {
        return primary;
    }
    let secondary = ea
        .iter()
        .map(|e| e.marks.as_slice())
        .cmp(eb.iter().map(|e| e.marks.as_slice()));
    if secondary != Ordering::Equal {
        return secondary;
    }
    let tertiary = ea.iter().map(|e| e.upper).cmp(eb.iter().map(|e| e.upper));
    if tertiary != Ordering::Equal {
        return tertiary;
    }
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_ignore_case_at_primary_level() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_tie() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("AA", "Aa"), Ordering::Greater);
    }

    #[test]
    fn punctuation_before_digits_before_letters() {
        assert_eq!(locale_compare("_", ":"), Ordering::Less);
        assert_eq!(locale_compare(":", "0"), Ordering::Less);
        assert_eq!(locale_compare("9", "a"), Ordering::Less);
        assert_eq!(locale_compare("A_B", "A:B"), Ordering::Less);
    }

    #[test]
    fn accents_break_ties_after_base_letters() {
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("résumé", "resumf"), Ordering::Less);
    }

    #[test]
    fn accented_letters_sort_with_their_base_letter() {
        assert_eq!(locale_compare("ā", "b"), Ordering::Less);
        assert_eq!(locale_compare("a", "ā"), Ordering::Less);
        assert_eq!(locale_compare("ő", "p"), Ordering::Less);
        assert_eq!(locale_compare("łz", "m"), Ordering::Less);
        assert_eq!(locale_compare("l", "ł"), Ordering::Less);
    }

    #[test]
    fn decomposed_and_precomposed_forms_collate_alike() {
        assert_eq!(locale_compare("e\u{301}x", "ey"), Ordering::Less);
        assert_eq!(locale_compare("ex", "e\u{301}x"), Ordering::Less);
        assert_eq!(
            locale_compare("e\u{301}x", "éy"),
            locale_compare("éx", "éy")
        );
    }

    #[test]
    fn prefix_sorts_first_and_equal_strings_compare_equal() {
        assert_eq!(locale_compare("PREFLOP", "PREFLOP:RFI"), Ordering::Less);
        assert_eq!(locale_compare("x", "x"), Ordering::Equal);
    }

    #[test]
    fn scenario_ids_order_like_the_dataset() {
        let mut ids = vec![
            "PREFLOP:VS_OPEN:BB:CO:STANDARD",
            "PREFLOP:RFI:BTN:BTN:STANDARD",
            "PREFLOP:RFI:BB:BTN:STANDARD",
            "PREFLOP:VS3BET:BB:CO:STANDARD",
        ];
        ids.sort_by(|a, b| locale_compare(a, b));
        assert_eq!(
            ids,
            vec![
                "PREFLOP:RFI:BB:BTN:STANDARD",
                "PREFLOP:RFI:BTN:BTN:STANDARD",
                "PREFLOP:VS_OPEN:BB:CO:STANDARD",
                "PREFLOP:VS3BET:BB:CO:STANDARD",
            ]
        );
    }
}
