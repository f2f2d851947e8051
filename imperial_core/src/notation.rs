//! # Imperial Notation
//!
//! Conversion between decimal feet and the feet-inch-fraction notation used on
//! North American construction drawings, e.g. `12'-6 1/2"`.
//!
//! ## Grammar
//!
//! ```text
//! [ws] [-] [<feet> '] [-] [<inches>] [<numerator> / <denominator>] ["] [ws]
//! ```
//!
//! Every component is optional. Feet precede `'`, the fraction precedes `"`
//! and the inch count sits between them. `-` after the feet is a joiner, not
//! a sign. Empty or whitespace-only text is zero.
//!
//! ## Example
//!
//! ```rust
//! use imperial_core::notation::{format_from_feet, parse_to_feet};
//!
//! let feet = parse_to_feet("-2'-1 7/32\"", 32).unwrap();
//! assert!((feet + (2.0 + (1.0 + 7.0 / 32.0) / 12.0)).abs() < 1e-9);
//!
//! assert_eq!(format_from_feet(25.222, 32).unwrap(), "25'-2 21/32\"");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{UnitsError, UnitsResult};

/// Resolution used when parsing, in fractions of an inch
pub const DEFAULT_PARSE_DENOMINATOR: i32 = 32;

/// Resolution used when formatting, in fractions of an inch
pub const DEFAULT_FORMAT_DENOMINATOR: i32 = 8;

const INCHES_PER_FOOT: f64 = 12.0;

// ============================================================================
// Parsing
// ============================================================================

/// Parse Imperial notation into decimal feet.
///
/// The result is `sign * (feet + (inches + numerator / denominator) / 12)`.
/// `denominator_hint` names the resolution the caller works in; it must be
/// positive but does not round the result.
///
/// # Errors
///
/// * `UnitsError::Format` - the text does not follow the notation
/// * `UnitsError::Precondition` - `denominator_hint` is zero or negative
///
/// # Example
///
/// ```rust
/// use imperial_core::notation::parse_to_feet;
///
/// assert_eq!(parse_to_feet("1'", 32).unwrap(), 1.0);
/// assert_eq!(parse_to_feet("  ", 32).unwrap(), 0.0);
/// assert!(parse_to_feet("1'x", 32).is_err());
/// ```
pub fn parse_to_feet(text: &str, denominator_hint: i32) -> UnitsResult<f64> {
    check_denominator("denominator_hint", denominator_hint)?;

    let parsed = Scanner::new(text).run().map_err(|e| {
        debug!(input = text, error = %e, "rejected imperial notation");
        e
    })?;

    let feet = parsed.feet + (parsed.inches + parsed.fraction) / INCHES_PER_FOOT;

    Ok(if parsed.negative { -feet } else { feet })
}

/// Tolerant variant of [`parse_to_feet`]: `None` instead of an error.
pub fn try_parse_to_feet(text: &str, denominator_hint: i32) -> Option<f64> {
    parse_to_feet(text, denominator_hint).ok()
}

/// Components accumulated by the scanner, all non-negative
#[derive(Debug, Default, PartialEq)]
struct Parsed {
    negative: bool,
    feet: f64,
    inches: f64,
    fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number,
    Foot,
    Inch,
    Dash,
    Slash,
}

#[derive(Debug, Clone, Copy)]
struct Lexeme<'a> {
    token: Token,
    position: usize,
    text: &'a str,
}

/// Last component the scanner accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Sign,
    Feet,
    Joiner,
    Inches,
    Numerator,
    Denominator,
    Closed,
}

struct Scanner<'a> {
    input: &'a str,
    lexemes: Vec<Lexeme<'a>>,
    cursor: usize,
    state: State,
    parsed: Parsed,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner {
            input,
            lexemes: Vec::new(),
            cursor: 0,
            state: State::Start,
            parsed: Parsed::default(),
        }
    }

    fn run(mut self) -> UnitsResult<Parsed> {
        self.lex()?;

        while let Some(lexeme) = self.peek(0) {
            match (self.state, lexeme.token) {
                (State::Start, Token::Dash) => {
                    self.parsed.negative = true;
                    self.advance(State::Sign, 1);
                }
                (State::Feet, Token::Dash) => self.advance(State::Joiner, 1),
                (State::Start | State::Sign | State::Feet | State::Joiner | State::Inches, Token::Number) => {
                    self.number(lexeme)?;
                }
                (State::Inches | State::Denominator, Token::Inch) => self.advance(State::Closed, 1),
                (State::Closed, _) => {
                    return Err(self.error(lexeme.position, "Nothing may follow the closing '\"'"));
                }
                (_, token) => {
                    return Err(self.error(lexeme.position, format!("Unexpected {}", describe(token))));
                }
            }
        }

        match self.state {
            State::Sign => Err(self.error(self.input.len(), "Sign must be followed by a measurement")),
            State::Joiner => Err(self.error(self.input.len(), "Joiner '-' must be followed by inches")),
            _ => Ok(self.parsed),
        }
    }

    /// A number is feet, numerator or inches depending on what follows it.
    fn number(&mut self, lexeme: Lexeme<'a>) -> UnitsResult<()> {
        let value = self.value(lexeme)?;

        match self.peek(1).map(|next| next.token) {
            Some(Token::Foot) => {
                if !matches!(self.state, State::Start | State::Sign) {
                    return Err(self.error(lexeme.position, "Feet must come first"));
                }
                trace!(feet = value, "feet component");
                self.parsed.feet = value;
                self.advance(State::Feet, 2);
            }
            Some(Token::Slash) => {
                self.state = State::Numerator;
                let numerator = self.integer(lexeme)?;
                let denominator = match self.peek(2) {
                    Some(d) if d.token == Token::Number => d,
                    _ => {
                        let position = self.peek(1).map_or(self.input.len(), |s| s.position);
                        return Err(self.error(position, "Fraction is missing its denominator"));
                    }
                };
                self.state = State::Denominator;
                let divisor = self.integer(denominator)?;
                if divisor == 0 {
                    return Err(self.error(denominator.position, "Denominator must be positive"));
                }
                trace!(numerator, denominator = divisor, "fraction component");
                self.parsed.fraction = numerator as f64 / divisor as f64;
                self.advance(State::Denominator, 3);
            }
            _ => {
                if self.state == State::Inches {
                    return Err(self.error(lexeme.position, "Inches may only appear once"));
                }
                trace!(inches = value, "inch component");
                self.parsed.inches = value;
                self.advance(State::Inches, 1);
            }
        }
        Ok(())
    }

    fn lex(&mut self) -> UnitsResult<()> {
        let input = self.input;
        let mut chars = input.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            let token = match c {
                c if c.is_whitespace() => continue,
                '\'' | '\u{2032}' => Token::Foot,
                '"' | '\u{2033}' => Token::Inch,
                '-' => Token::Dash,
                '/' => Token::Slash,
                c if c.is_ascii_digit() || c == '.' => {
                    let mut end = position + c.len_utf8();
                    while let Some(&(next, d)) = chars.peek() {
                        if !(d.is_ascii_digit() || d == '.') {
                            break;
                        }
                        end = next + d.len_utf8();
                        chars.next();
                    }
                    self.lexemes.push(Lexeme {
                        token: Token::Number,
                        position,
                        text: &input[position..end],
                    });
                    continue;
                }
                other => {
                    return Err(self.error(position, format!("Unexpected character '{}'", other)));
                }
            };
            self.lexemes.push(Lexeme {
                token,
                position,
                text: &input[position..position + c.len_utf8()],
            });
        }
        Ok(())
    }

    fn peek(&self, offset: usize) -> Option<Lexeme<'a>> {
        self.lexemes.get(self.cursor + offset).copied()
    }

    fn advance(&mut self, state: State, consumed: usize) {
        self.state = state;
        self.cursor += consumed;
    }

    fn value(&self, lexeme: Lexeme<'a>) -> UnitsResult<f64> {
        lexeme
            .text
            .parse::<f64>()
            .map_err(|_| self.error(lexeme.position, format!("Invalid number '{}'", lexeme.text)))
    }

    fn integer(&self, lexeme: Lexeme<'a>) -> UnitsResult<u64> {
        lexeme.text.parse::<u64>().map_err(|_| {
            let field = if self.state == State::Numerator { "Numerator" } else { "Denominator" };
            self.error(lexeme.position, format!("{} must be a whole number, got '{}'", field, lexeme.text))
        })
    }

    fn error(&self, position: usize, reason: impl Into<String>) -> UnitsError {
        UnitsError::format(self.input, position, reason)
    }
}

fn describe(token: Token) -> &'static str {
    match token {
        Token::Number => "number",
        Token::Foot => "feet mark '''",
        Token::Inch => "inch mark '\"'",
        Token::Dash => "'-'",
        Token::Slash => "'/'",
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// A length decomposed into its notation components.
///
/// The fraction is reduced: `numerator` is odd or `denominator` is 1, and
/// `numerator < denominator`. `feet` is a non-negative whole number kept as
/// `f64` so values beyond the integer range still print exactly. `Display`
/// renders the notation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImperialParts {
    pub negative: bool,
    pub feet: f64,
    pub inches: u32,
    pub numerator: u32,
    pub denominator: u32,
}

impl ImperialParts {
    /// True when nothing would be printed but `0"`
    pub fn is_zero(&self) -> bool {
        self.feet == 0.0 && self.inches == 0 && self.numerator == 0
    }
}

impl fmt::Display for ImperialParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0\"");
        }
        if self.negative {
            write!(f, "-")?;
        }
        if self.feet > 0.0 {
            write!(f, "{:.0}'", self.feet)?;
        }
        if self.inches > 0 || self.numerator != 0 {
            if self.feet > 0.0 {
                write!(f, "-")?;
            }
            write!(f, "{}", self.inches)?;
            if self.numerator != 0 {
                write!(f, " {}/{}", self.numerator, self.denominator)?;
            }
            write!(f, "\"")?;
        }
        Ok(())
    }
}

/// Decompose decimal feet into notation components at `denominator` resolution.
///
/// # Errors
///
/// `UnitsError::Precondition` when `denominator` is not positive or `value`
/// is NaN or infinite.
pub fn format_parts(value: f64, denominator: i32) -> UnitsResult<ImperialParts> {
    check_denominator("denominator", denominator)?;
    if !value.is_finite() {
        return Err(UnitsError::precondition(
            "value",
            value.to_string(),
            "Value must be a finite number of feet",
        ));
    }

    let mut feet = value.abs().trunc();

    // Signed remainder: inches and numerator share the sign of `value`.
    // The fractional foot is exact, so this never overflows.
    let decimal_inches = (value - value.trunc()) * INCHES_PER_FOOT;
    let mut inches = decimal_inches.trunc() as i64;
    let mut numerator = ((decimal_inches - inches as f64) * f64::from(denominator)).round() as i64;
    let mut denominator = i64::from(denominator);

    while numerator % 2 == 0 && denominator % 2 == 0 {
        numerator /= 2;
        denominator /= 2;
    }

    // Rounded up to a whole inch
    if numerator.abs() == denominator {
        numerator = 0;
        inches += if value < 0.0 { -1 } else { 1 };
    }
    if inches.abs() == 12 {
        inches = 0;
        feet += 1.0;
    }

    let mut parts = ImperialParts {
        negative: false,
        feet,
        inches: inches.unsigned_abs() as u32,
        numerator: numerator.unsigned_abs() as u32,
        denominator: denominator as u32,
    };
    parts.negative = value < 0.0 && !parts.is_zero();
    Ok(parts)
}

/// Format decimal feet as Imperial notation.
///
/// # Example
///
/// ```rust
/// use imperial_core::notation::format_from_feet;
///
/// assert_eq!(format_from_feet(1.0 / 12.0, 8).unwrap(), "1\"");
/// assert_eq!(format_from_feet(0.0, 8).unwrap(), "0\"");
/// assert!(format_from_feet(1.0, 0).is_err());
/// ```
pub fn format_from_feet(value: f64, denominator: i32) -> UnitsResult<String> {
    format_parts(value, denominator).map(|parts| parts.to_string())
}

fn check_denominator(field: &str, denominator: i32) -> UnitsResult<()> {
    if denominator <= 0 {
        return Err(UnitsError::precondition(
            field,
            denominator.to_string(),
            "Denominator must be a positive integer",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn feet(text: &str) -> f64 {
        parse_to_feet(text, DEFAULT_PARSE_DENOMINATOR).unwrap()
    }

    #[test]
    fn test_parse_examples() {
        assert_eq!(feet("1'"), 1.0);
        assert_abs_diff_eq!(feet("3 1/4\""), 3.25 / 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(feet("-2'-1 7/32\""), -(2.0 + (1.0 + 7.0 / 32.0) / 12.0), epsilon = 1e-12);
        assert_abs_diff_eq!(feet("6\""), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(feet("1/2\""), 1.0 / 24.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_whitespace_and_marks() {
        assert_abs_diff_eq!(feet("  12' 6 1/2\"  "), 12.0 + 6.5 / 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(feet("- 4'"), -4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(feet("3 1 / 8"), (3.0 + 1.0 / 8.0) / 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(feet("5\u{2032}-2\u{2033}"), 5.0 + 2.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_decimal_components() {
        assert_abs_diff_eq!(feet("1.5'"), 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(feet("2.25\""), 2.25 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_empty_is_zero_for_both_variants() {
        assert_eq!(parse_to_feet("", 32).unwrap(), 0.0);
        assert_eq!(parse_to_feet(" \t ", 32).unwrap(), 0.0);
        assert_eq!(try_parse_to_feet("", 32), Some(0.0));
    }

    #[test]
    fn test_parse_keeps_full_precision() {
        assert_abs_diff_eq!(parse_to_feet("1.1'", 32).unwrap(), 1.1, epsilon = 1e-12);
        assert_abs_diff_eq!(parse_to_feet("0.3\"", 32).unwrap(), 0.025, epsilon = 1e-12);
        assert_abs_diff_eq!(parse_to_feet("1.3\"", 8).unwrap(), 1.3 / 12.0, epsilon = 1e-12);
        // Finer than the hint is still exact
        assert_abs_diff_eq!(parse_to_feet("1/64\"", 32).unwrap(), (1.0 / 64.0) / 12.0, epsilon = 1e-15);
        assert_eq!(parse_to_feet("1/64\"", 32).unwrap(), parse_to_feet("1/64\"", 2).unwrap());
    }

    #[test]
    fn test_try_parse_returns_value() {
        assert_eq!(try_parse_to_feet("1'", 32), Some(1.0));
        assert_eq!(try_parse_to_feet("6\"", 32), Some(0.5));
        let value = try_parse_to_feet("-2'-1 7/32\"", 32).unwrap();
        assert_abs_diff_eq!(value, -(2.0 + (1.0 + 7.0 / 32.0) / 12.0), epsilon = 1e-12);
        assert_eq!(try_parse_to_feet("12'-6 1/2\"", 8), parse_to_feet("12'-6 1/2\"", 8).ok());
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in [
            "abc", "1'x", "1/", "1/0\"", "1.5/2", "1/2.5", "-", "2'-", "\"", "1\"2",
            "3 4", "1' 2'", "--1'", "1'-2-3\"", "1/2 3\"", "'",
        ] {
            let err = parse_to_feet(text, 32).unwrap_err();
            assert!(err.is_format(), "expected format error for {:?}, got {:?}", text, err);
            assert_eq!(try_parse_to_feet(text, 32), None);
        }
    }

    #[test]
    fn test_parse_error_position() {
        match parse_to_feet("12'-6x", 32).unwrap_err() {
            UnitsError::Format { position, input, .. } => {
                assert_eq!(position, 5);
                assert_eq!(input, "12'-6x");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_hint() {
        let err = parse_to_feet("1'", 0).unwrap_err();
        assert_eq!(err.error_code(), "PRECONDITION");
        assert_eq!(try_parse_to_feet("1'", -8), None);
    }

    #[test]
    fn test_format_examples() {
        assert_eq!(format_from_feet(1.0 / 12.0, 8).unwrap(), "1\"");
        assert_eq!(format_from_feet(25.222, 32).unwrap(), "25'-2 21/32\"");
        assert_eq!(format_from_feet(1.0, 8).unwrap(), "1'");
        assert_eq!(format_from_feet(12.5 + 0.5 / 12.0, 8).unwrap(), "12'-6 1/2\"");
        assert_eq!(format_from_feet(1.0 / 96.0, 8).unwrap(), "0 1/8\"");
    }

    #[test]
    fn test_format_zero() {
        for d in [1, 2, 8, 32, 64] {
            assert_eq!(format_from_feet(0.0, d).unwrap(), "0\"");
        }
        // Too small to show at 1/8": no "-0"
        assert_eq!(format_from_feet(-0.0001, 8).unwrap(), "0\"");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_from_feet(-2.0 - 1.5 / 12.0, 8).unwrap(), "-2'-1 1/2\"");
        assert_eq!(format_from_feet(-0.5, 8).unwrap(), "-6\"");
    }

    #[test]
    fn test_format_carries_rounded_fraction() {
        assert_eq!(format_from_feet(11.999999, 8).unwrap(), "12'");
        assert_eq!(format_from_feet(-11.999999, 8).unwrap(), "-12'");
        // 1.999" rounds up to 2"
        assert_eq!(format_from_feet(1.999 / 12.0, 8).unwrap(), "2\"");
        assert_eq!(format_from_feet(-1.999 / 12.0, 8).unwrap(), "-2\"");
    }

    #[test]
    fn test_format_rejects_bad_arguments() {
        assert_eq!(format_from_feet(1.0, 0).unwrap_err().error_code(), "PRECONDITION");
        assert_eq!(format_from_feet(1.0, -4).unwrap_err().error_code(), "PRECONDITION");
        assert!(format_from_feet(f64::NAN, 8).is_err());
        assert!(format_from_feet(f64::INFINITY, 8).is_err());
        assert!(format_from_feet(f64::NEG_INFINITY, 8).is_err());
    }

    #[test]
    fn test_format_large_values() {
        assert_eq!(format_from_feet(1e20, 8).unwrap(), "100000000000000000000'");
        assert_eq!(format_from_feet(-1e20, 8).unwrap(), "-100000000000000000000'");
        assert_eq!(format_from_feet(1e15 + 0.5, 8).unwrap(), "1000000000000000'-6\"");

        let max = format_from_feet(f64::MAX, 8).unwrap();
        assert!(max.ends_with('\''));
        assert_eq!(max.len(), 310);
        assert_eq!(format_parts(f64::MAX, 8).unwrap().feet, f64::MAX);
    }

    #[test]
    fn test_parts_serialization() {
        let parts = format_parts(2.0 + 1.25 / 12.0, 16).unwrap();
        assert_eq!(
            parts,
            ImperialParts { negative: false, feet: 2.0, inches: 1, numerator: 1, denominator: 4 }
        );
        let json = serde_json::to_string(&parts).unwrap();
        let roundtrip: ImperialParts = serde_json::from_str(&json).unwrap();
        assert_eq!(parts, roundtrip);
    }

    proptest! {
        #[test]
        fn prop_round_trip(ft in 0u32..500, inches in 0u32..12, exp in 1u32..7, seed in 0u32..64) {
            let d = 1i32 << exp;
            let n = seed % d as u32;
            let value = f64::from(ft) + (f64::from(inches) + f64::from(n) / f64::from(d)) / 12.0;
            let text = format_from_feet(value, d).unwrap();
            let back = parse_to_feet(&text, d).unwrap();
            prop_assert!((back - value).abs() < 1e-9, "{} -> {} -> {}", value, text, back);
        }

        #[test]
        fn prop_negative_keeps_sign(value in 0.1f64..1000.0, exp in 1u32..7) {
            let text = format_from_feet(-value, 1 << exp).unwrap();
            prop_assert!(text.starts_with('-'), "{}", text);
        }

        #[test]
        fn prop_fraction_is_reduced(value in -1000.0f64..1000.0, exp in 0u32..7) {
            let parts = format_parts(value, 1 << exp).unwrap();
            prop_assert!(parts.numerator < parts.denominator);
            prop_assert!(parts.numerator % 2 == 1 || parts.denominator == 1, "{:?}", parts);
            prop_assert!(parts.inches < 12);
        }

        #[test]
        fn prop_tolerant_matches_strict(text in "[-0-9'\" /.]{0,12}", exp in 0u32..7) {
            let d = 1i32 << exp;
            prop_assert_eq!(try_parse_to_feet(&text, d), parse_to_feet(&text, d).ok());
        }
    }
}
