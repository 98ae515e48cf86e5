use crate::error::{ControlError, Result};

/// Inclusive numeric bounds, default is unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberRange {
    pub min: f64,
    pub max: f64,
}

impl Default for NumberRange {
    fn default() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }
}

impl NumberRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn check(&self, value: f64) -> Result<f64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(ControlError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Parse `text` and check it against the range.
    pub fn parse(&self, text: &str) -> Result<f64> {
        parse_number(text).and_then(|value| self.check(value))
    }

    /// Move `value` by `delta`, `None` when the result would leave the range.
    pub fn step(&self, value: f64, delta: f64) -> Option<f64> {
        let next = value + delta;
        self.contains(next).then_some(next)
    }
}

/// Parse a real number the way a numeric text field reads it.
///
/// Non finite results (`NaN`, `inf`) are rejected.
pub fn parse_number(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ControlError::Empty);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ControlError::InvalidNumber(trimmed.to_string())),
    }
}

/// Shortest text for a number, `1.0` prints as `1`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Widen a slider value keeping its shortest decimal text, so `0.3f32`
/// becomes `0.3` instead of `0.30000001192092896`.
pub fn widen_f32(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(value as f64)
}

/// Length and line limits for free text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextLimit {
    /// Maximum number of characters.
    pub max_length: Option<usize>,
    /// Maximum number of lines.
    pub max_lines: Option<usize>,
}

impl TextLimit {
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    pub fn check(&self, text: &str) -> Result<()> {
        if let Some(max) = self.max_length {
            if char_count(text) > max {
                return Err(ControlError::TooLong { max });
            }
        }
        if let Some(max) = self.max_lines {
            if line_count(text) > max {
                return Err(ControlError::TooManyLines { max });
            }
        }
        Ok(())
    }
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Number of lines as a textarea counts them, an empty text is one line.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("4"), Ok(4.0));
        assert_eq!(parse_number(" -2.5 "), Ok(-2.5));
        assert_eq!(parse_number("1e3"), Ok(1000.0));
        assert_eq!(parse_number(""), Err(ControlError::Empty));
        assert_eq!(parse_number("   "), Err(ControlError::Empty));
        assert_eq!(
            parse_number("abc"),
            Err(ControlError::InvalidNumber("abc".into()))
        );
        assert!(parse_number("NaN").is_err());
        assert!(parse_number("inf").is_err());
    }

    #[test]
    fn test_number_range() {
        let range = NumberRange::new(0., 10.);
        assert!(range.contains(0.));
        assert!(range.contains(10.));
        assert!(!range.contains(10.5));
        assert_eq!(range.parse("7"), Ok(7.));
        assert_eq!(
            range.parse("11"),
            Err(ControlError::OutOfRange {
                value: 11.,
                min: 0.,
                max: 10.
            })
        );

        assert_eq!(range.step(9., 1.), Some(10.));
        assert_eq!(range.step(10., 1.), None);
        assert_eq!(range.step(0., -1.), None);

        let unbounded = NumberRange::default();
        assert_eq!(unbounded.step(1e300, 1.), Some(1e300 + 1.));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number(42.25), "42.25");
    }

    #[test]
    fn test_widen_f32() {
        assert_eq!(widen_f32(0.3), 0.3);
        assert_eq!(widen_f32(12.5), 12.5);
        assert_eq!(widen_f32(-4.), -4.);
        assert_eq!(format_number(widen_f32(0.3)), "0.3");
        assert_ne!(0.3f32 as f64, 0.3);
    }

    #[test]
    fn test_text_limit() {
        let limit = TextLimit::default().max_length(5);
        assert_eq!(limit.check("hello"), Ok(()));
        assert_eq!(limit.check("héllo"), Ok(()));
        assert_eq!(limit.check("hello!"), Err(ControlError::TooLong { max: 5 }));

        let limit = TextLimit::default().max_lines(2);
        assert_eq!(line_count(""), 1);
        assert_eq!(limit.check("a\nb"), Ok(()));
        assert_eq!(
            limit.check("a\nb\n"),
            Err(ControlError::TooManyLines { max: 2 })
        );

        assert_eq!(TextLimit::default().check(&"x".repeat(10_000)), Ok(()));
    }
}
