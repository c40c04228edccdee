//! Value formatting for tick labels and the readout.
//!
//! Supports a small d3-style subset:
//!
//! | format   | meaning                                   | `1234.567` |
//! |----------|-------------------------------------------|------------|
//! | `""`     | shortest plain representation             | `1234.567` |
//! | `"d"`    | rounded integer                           | `1235`     |
//! | `",d"`   | rounded integer with thousands separators | `1,235`    |
//! | `".2f"`  | fixed decimals (`"f"` alone means 6)      | `1234.57`  |
//! | `",.2f"` | fixed decimals with separators            | `1,234.57` |
//! | `".1%"`  | multiply by 100, fixed decimals, `%`      | `123456.7%`|

use crate::error::{GaugeError, Result};

/// Decimals used when `f` or `%` is given without a precision.
const DEFAULT_PRECISION: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Plain,
    Integer,
    Fixed(usize),
    Percent(usize),
}

/// A parsed value format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormat {
    kind: Kind,
    grouping: bool,
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self {
            kind: Kind::Plain,
            grouping: false,
        }
    }
}

impl ValueFormat {
    /// Parse a format string.
    ///
    /// ```
    /// use speedometer::format::ValueFormat;
    ///
    /// let fmt = ValueFormat::parse("d").unwrap();
    /// assert_eq!(fmt.format(477.7), "478");
    /// assert!(ValueFormat::parse("$.2s").is_err());
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || GaugeError::InvalidFormat(spec.to_string());

        let (grouping, rest) = match spec.strip_prefix(',') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        let (precision, ty) = match rest.strip_prefix('.') {
            Some(after_dot) => {
                let digits = after_dot
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(after_dot.len());
                if digits == 0 {
                    return Err(invalid());
                }
                let precision = after_dot[..digits].parse::<usize>().map_err(|_| invalid())?;
                (Some(precision), &after_dot[digits..])
            }
            None => (None, rest),
        };

        let kind = match (ty, precision) {
            ("", None) if !grouping => Kind::Plain,
            ("d", None) => Kind::Integer,
            ("f", p) => Kind::Fixed(p.unwrap_or(DEFAULT_PRECISION)),
            ("%", p) => Kind::Percent(p.unwrap_or(DEFAULT_PRECISION)),
            _ => return Err(invalid()),
        };

        Ok(Self { kind, grouping })
    }

    /// Format a value.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return plain(value);
        }
        let text = match self.kind {
            Kind::Plain => plain(value),
            Kind::Integer => plain(value.round()),
            Kind::Fixed(precision) => fixed(value, precision),
            Kind::Percent(precision) => format!("{}%", fixed(value * 100.0, precision)),
        };
        if self.grouping {
            group_thousands(&text)
        } else {
            text
        }
    }
}

fn plain(value: f64) -> String {
    // -0 prints as "0"
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

fn fixed(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    // "-0.00" collapses to "0.00"
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let int_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (int_part, tail) = unsigned.split_at(int_end);

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push_str(tail);
    grouped
}

/// Format `value` with a format string in one step.
pub fn format_value(spec: &str, value: f64) -> Result<String> {
    Ok(ValueFormat::parse(spec)?.format(value))
}

/// Substitute the formatted value into the readout template.
///
/// Every occurrence of `placeholder` is replaced. An empty placeholder leaves
/// the template as is.
///
/// ```
/// use speedometer::format::render_value_text;
///
/// assert_eq!(render_value_text("Speed: ${value}", "${value}", "42"), "Speed: 42");
/// assert_eq!(render_value_text("Porumai: #{value}", "#{value}", "333"), "Porumai: 333");
/// ```
#[must_use]
pub fn render_value_text(template: &str, placeholder: &str, formatted: &str) -> String {
    if placeholder.is_empty() {
        return template.to_string();
    }
    template.replace(placeholder, formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_format() {
        let fmt = ValueFormat::default();
        assert_eq!(fmt.format(333.0), "333");
        assert_eq!(fmt.format(477.7), "477.7");
        assert_eq!(fmt.format(-0.0), "0");
        assert_eq!(fmt.format(-12.5), "-12.5");
    }

    #[test]
    fn test_integer_rounds() {
        let fmt = ValueFormat::parse("d").unwrap();
        assert_eq!(fmt.format(477.7), "478");
        assert_eq!(fmt.format(477.2), "477");
        assert_eq!(fmt.format(2.5), "3");
        assert_eq!(fmt.format(-0.2), "0");
    }

    #[test]
    fn test_grouped_integer() {
        let fmt = ValueFormat::parse(",d").unwrap();
        assert_eq!(fmt.format(1_234_567.0), "1,234,567");
        assert_eq!(fmt.format(-1000.0), "-1,000");
        assert_eq!(fmt.format(999.0), "999");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(format_value(".2f", 1234.567).unwrap(), "1234.57");
        assert_eq!(format_value(",.2f", 1234.567).unwrap(), "1,234.57");
        assert_eq!(format_value("f", 1.0).unwrap(), "1.000000");
        assert_eq!(format_value(".1f", -0.01).unwrap(), "0.0");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_value(".0%", 0.5).unwrap(), "50%");
        assert_eq!(format_value(".1%", 0.1234).unwrap(), "12.3%");
        assert_eq!(format_value("%", 0.5).unwrap(), "50.000000%");
    }

    #[test]
    fn test_non_finite_passthrough() {
        let fmt = ValueFormat::parse(",.2f").unwrap();
        assert_eq!(fmt.format(f64::NAN), "NaN");
        assert_eq!(fmt.format(f64::INFINITY), "inf");
    }

    #[test]
    fn test_invalid_formats() {
        for spec in ["x", ".f", ".2", ",", "d.2", "$d", ".2d", "1f"] {
            assert!(
                matches!(ValueFormat::parse(spec), Err(GaugeError::InvalidFormat(_))),
                "{spec:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_render_value_text() {
        assert_eq!(render_value_text("${value}", "${value}", "478"), "478");
        assert_eq!(
            render_value_text("Porumai: ${value}", "${value}", "333"),
            "Porumai: 333"
        );
        assert_eq!(render_value_text("no slot", "${value}", "1"), "no slot");
        assert_eq!(render_value_text("${value}", "", "1"), "${value}");
    }
}
