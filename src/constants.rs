//! Character classifier: pure predicates over a single code point, plus the
//! Khmer Unicode ranges they are built from.

// Khmer Unicode Ranges
pub const KHMER_START: char = '\u{1780}';
pub const KHMER_END: char = '\u{17FF}';
pub const KHMER_SYMBOLS_START: char = '\u{19E0}';
pub const KHMER_SYMBOLS_END: char = '\u{19FF}';

pub const COENG: char = '\u{17D2}';
pub const REPETITION_MARK: char = '\u{17D7}';

pub fn is_khmer_char(c: char) -> bool {
    let code = c as u32;
    (code >= 0x1780 && code <= 0x17FF) || (code >= 0x19E0 && code <= 0x19FF)
}

pub fn is_consonant(c: char) -> bool {
    let code = c as u32;
    code >= 0x1780 && code <= 0x17A2
}

pub fn is_independent_vowel(c: char) -> bool {
    let code = c as u32;
    code >= 0x17A3 && code <= 0x17B3
}

pub fn is_dependent_vowel(c: char) -> bool {
    let code = c as u32;
    code >= 0x17B6 && code <= 0x17C5
}

pub fn is_sign(c: char) -> bool {
    let code = c as u32;
    (code >= 0x17C6 && code <= 0x17D1) || c == '\u{17D3}' || c == '\u{17DD}'
}

pub fn is_coeng(c: char) -> bool {
    c == COENG
}

pub fn is_digit(c: char) -> bool {
    let code = c as u32;
    // ASCII 0-9 or Khmer 0-9
    (code >= 0x30 && code <= 0x39) || (code >= 0x17E0 && code <= 0x17E9)
}

pub fn is_currency_symbol(c: char) -> bool {
    matches!(c, '$' | '\u{17DB}' | '\u{20AC}' | '\u{00A3}' | '\u{00A5}')
}

/// Khmer punctuation (U+17D4..17DA), Riel (also a separator, not just a
/// currency symbol), ASCII punctuation, and a few quote/guillemet marks.
pub fn is_separator(c: char) -> bool {
    let code = c as u32;
    if code >= 0x17D4 && code <= 0x17DA {
        return true;
    }
    if c == '\u{17DB}' {
        return true;
    }
    matches!(
        c,
        '!' | '?' | '.' | ',' | ';' | ':' | '"' | '\'' | '(' | ')' | '[' | ']' | '{' | '}' | '-'
            | '/' | '«' | '»' | '“' | '”' | '˝' | '$' | '%' | ' '
    )
}

/// Closed whitelist of single-codepoint words: 15 consonants + 8 independent
/// vowels. A computed range check would over-accept; this is a dense table.
pub fn is_valid_single_word(c: char) -> bool {
    if matches!(
        c,
        'ក' | 'ខ' | 'គ' | 'ង' | 'ច' | 'ឆ' | 'ញ' | 'ដ' | 'ត' | 'ទ' | 'ព' | 'រ' | 'ល' | 'ស' | 'ឡ'
    ) {
        return true;
    }
    matches!(c, 'ឬ' | 'ឮ' | 'ឪ' | 'ឯ' | 'ឱ' | 'ឦ' | 'ឧ' | 'ឳ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_single_is_exactly_23_codepoints() {
        let count = (0x1780u32..=0x17FFu32)
            .chain(0x19E0u32..=0x19FFu32)
            .filter_map(char::from_u32)
            .filter(|&c| is_valid_single_word(c))
            .count();
        assert_eq!(count, 23);
    }

    #[test]
    fn currency_set_matches_spec() {
        for c in ['$', '\u{17DB}', '\u{20AC}', '\u{00A3}', '\u{00A5}'] {
            assert!(is_currency_symbol(c));
        }
        assert!(!is_currency_symbol('ក'));
    }

    #[test]
    fn riel_is_both_currency_and_separator() {
        assert!(is_currency_symbol('\u{17DB}'));
        assert!(is_separator('\u{17DB}'));
    }

    #[test]
    fn separator_includes_quote_and_guillemet_marks() {
        for c in ['«', '»', '\u{201C}', '\u{201D}', '˝'] {
            assert!(is_separator(c));
        }
    }

    #[test]
    fn digit_covers_ascii_and_khmer() {
        assert!(is_digit('5'));
        assert!(is_digit('\u{17E5}'));
        assert!(!is_digit('a'));
    }

    #[test]
    fn khmer_range_union() {
        assert!(is_khmer_char(KHMER_START));
        assert!(is_khmer_char(KHMER_END));
        assert!(is_khmer_char(KHMER_SYMBOLS_START));
        assert!(is_khmer_char(KHMER_SYMBOLS_END));
        assert!(!is_khmer_char('a'));
    }
}
