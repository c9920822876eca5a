//! Character-level scanner for price runs.
//!
//! A run is an optional sign followed by decimal digits of any script, where a
//! single `.` or `,` may sit between two digits. A separator that is not followed by a digit
//! closes the run and stays part of it (`"99."`).

/// First code point of every block of ten Unicode decimal digits (category Nd),
/// as of Unicode 15.
const DIGIT_ZEROS: &[u32] = &[
    0x30, 0x660, 0x6F0, 0x7C0, 0x966, 0x9E6, 0xA66, 0xAE6, 0xB66, 0xBE6, 0xC66, 0xCE6, 0xD66,
    0xDE6, 0xE50, 0xED0, 0xF20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946, 0x19D0, 0x1A80, 0x1A90,
    0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0,
    0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0,
    0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50, 0x11DA0, 0x11F50, 0x16A60,
    0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E4F0,
    0x1E950, 0x1FBF0,
];

/// Value of a decimal digit in any script (`'7'`, `'٧'`, `'७'`).
pub(crate) fn decimal_digit(c: char) -> Option<u32> {
    let code = u32::from(c);
    let block = DIGIT_ZEROS.partition_point(|&zero| zero <= code);
    let zero = DIGIT_ZEROS[block.checked_sub(1)?];
    let value = code - zero;
    (value < 10).then_some(value)
}

fn ascii_digit(c: char) -> Option<char> {
    decimal_digit(c).and_then(|d| char::from_digit(d, 10))
}

/// Character classes seen by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    Separator,
    Sign,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        match c {
            '.' | ',' => CharClass::Separator,
            '+' | '-' => CharClass::Sign,
            _ if decimal_digit(c).is_some() => CharClass::Digit,
            _ => CharClass::Other,
        }
    }
}

/// Scanner state. Every variant except `Idle` carries the byte offset where
/// the current run started.
#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    /// A sign was read; the run only exists if a digit follows.
    Signed(usize),
    /// Last character was a digit.
    Digits(usize),
    /// Last character was a separator directly after a digit.
    Separator(usize),
}

/// Find every maximal, non-overlapping price run in `text`, left to right.
pub(crate) fn find_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut state = State::Idle;

    for (i, c) in text.char_indices() {
        let class = CharClass::of(c);
        state = match (state, class) {
            (State::Idle, CharClass::Digit) => State::Digits(i),
            (State::Idle, CharClass::Sign) => State::Signed(i),
            (State::Idle, _) => State::Idle,

            (State::Signed(start), CharClass::Digit) => State::Digits(start),
            // "+-5": the second sign may still start a run
            (State::Signed(_), CharClass::Sign) => State::Signed(i),
            (State::Signed(_), _) => State::Idle,

            (State::Digits(start), CharClass::Digit) => State::Digits(start),
            (State::Digits(start), CharClass::Separator) => State::Separator(start),
            (State::Digits(start), CharClass::Sign) => {
                runs.push(&text[start..i]);
                State::Signed(i)
            }
            (State::Digits(start), CharClass::Other) => {
                runs.push(&text[start..i]);
                State::Idle
            }

            (State::Separator(start), CharClass::Digit) => State::Digits(start),
            (State::Separator(start), CharClass::Sign) => {
                runs.push(&text[start..i]);
                State::Signed(i)
            }
            (State::Separator(start), _) => {
                runs.push(&text[start..i]);
                State::Idle
            }
        };
    }

    if let State::Digits(start) | State::Separator(start) = state {
        runs.push(&text[start..]);
    }

    runs
}

/// Split an unsigned run into integer and fractional parts.
///
/// The last separator is a decimal point only when exactly one or two digits
/// follow it up to the end of the run. Otherwise every separator is grouping.
pub(crate) fn split_fraction(run: &str) -> (&str, Option<&str>) {
    if let Some(pos) = run.rfind(['.', ',']) {
        let fraction = &run[pos + 1..];
        if pos > 0
            && (1..=2).contains(&fraction.chars().count())
            && fraction.chars().all(|c| decimal_digit(c).is_some())
        {
            return (&run[..pos], Some(fraction));
        }
    }
    (run, None)
}

/// Digits of `text` rewritten as ASCII, everything else dropped.
pub(crate) fn ascii_digits(text: &str) -> String {
    text.chars().filter_map(ascii_digit).collect()
}

/// Keep only the digits of an integer part, as ASCII and without leading zeros.
pub(crate) fn integer_digits(integer: &str) -> String {
    let digits = ascii_digits(integer);
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_run() {
        assert_eq!(find_runs("1,234,567.89"), vec!["1,234,567.89"]);
        assert_eq!(find_runs("USD10,99"), vec!["10,99"]);
        assert_eq!(find_runs("Price:-9.99$"), vec!["-9.99"]);
        assert_eq!(find_runs("1234567"), vec!["1234567"]);
    }

    #[test]
    fn test_trailing_separator_stays_in_run() {
        assert_eq!(find_runs("99."), vec!["99."]);
        assert_eq!(find_runs("1.099,|"), vec!["1.099,"]);
    }

    #[test]
    fn test_double_separator_splits_runs() {
        assert_eq!(find_runs("1...2"), vec!["1.", "2"]);
        assert_eq!(find_runs("1..10"), vec!["1.", "10"]);
    }

    #[test]
    fn test_sign_handling() {
        assert_eq!(find_runs("NotaMINUS-.45"), vec!["45"]);
        assert_eq!(find_runs("NotaPLUS+,45"), vec!["45"]);
        assert_eq!(find_runs("+-5"), vec!["-5"]);
        assert_eq!(find_runs("90-60"), vec!["90", "-60"]);
        assert_eq!(find_runs("5,-3"), vec!["5,", "-3"]);
    }

    #[test]
    fn test_no_runs() {
        assert!(find_runs("").is_empty());
        assert!(find_runs("+").is_empty());
        assert!(find_runs("-NuN").is_empty());
        assert!(find_runs("+inf").is_empty());
        assert!(find_runs(".,.,").is_empty());
    }

    #[test]
    fn test_non_ascii_text_around_run() {
        assert_eq!(find_runs("Price:-9,99₪"), vec!["-9,99"]);
        assert_eq!(find_runs("451°F=233°C"), vec!["451", "233"]);
    }

    #[test]
    fn test_split_fraction() {
        assert_eq!(split_fraction("1.234.567,89"), ("1.234.567", Some("89")));
        assert_eq!(split_fraction("99,77,11,000.1"), ("99,77,11,000", Some("1")));
        assert_eq!(split_fraction("12.345"), ("12.345", None));
        assert_eq!(split_fraction("1,034.550"), ("1,034.550", None));
        assert_eq!(split_fraction("1234"), ("1234", None));
    }

    #[test]
    fn test_decimal_digit() {
        assert_eq!(decimal_digit('0'), Some(0));
        assert_eq!(decimal_digit('9'), Some(9));
        assert_eq!(decimal_digit('٣'), Some(3));
        assert_eq!(decimal_digit('۹'), Some(9));
        assert_eq!(decimal_digit('७'), Some(7));
        assert_eq!(decimal_digit('５'), Some(5));
        assert_eq!(decimal_digit('𝟘'), Some(0));
        for c in ['a', '/', ':', '½', '²', 'Ⅻ', '\u{1f}', '٪'] {
            assert_eq!(decimal_digit(c), None, "char {:?}", c);
        }
    }

    #[test]
    fn test_runs_in_other_scripts() {
        assert_eq!(find_runs("١٢٣"), vec!["١٢٣"]);
        assert_eq!(find_runs("₹१,२३४.५०"), vec!["१,२३४.५०"]);
        assert_eq!(split_fraction("١.٢٣٤,٥٠"), ("١.٢٣٤", Some("٥٠")));
    }

    #[test]
    fn test_ascii_digits() {
        assert_eq!(ascii_digits("١٢٣"), "123");
        assert_eq!(ascii_digits("१,२३४"), "1234");
        assert_eq!(integer_digits("٠٠٧"), "7");
    }

    #[test]
    fn test_integer_digits() {
        assert_eq!(integer_digits("1.234.567"), "1234567");
        assert_eq!(integer_digits("00012"), "12");
        assert_eq!(integer_digits("000"), "0");
        assert_eq!(integer_digits("0,0"), "0");
    }
}
