//! Typed equality comparisons used by the `*_eq` assertion macros
//!
//! Each comparison produces a [`Comparison`]: whether it held, the failure
//! detail (`expected X but got Y` style) and the summary printed by verbose
//! tests when it passes.

/// Text substituted for a missing string operand
pub const NULL_POINTER: &str = "<null pointer>";

/// Default absolute tolerance for floating-point equality
pub const EPSILON: f64 = 1e-12;

/// Result of one typed comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub passed: bool,
    /// Failure detail appended to the location prefix
    pub detail: String,
    /// One-line summary shown when the comparison passes in verbose output
    pub summary: String,
}

/// Compare two integers
pub fn int_eq(expected: i128, actual: i128) -> Comparison {
    Comparison {
        passed: expected == actual,
        detail: format!("expected {} but got {}", expected, actual),
        summary: format!("expected {}, got {}", expected, actual),
    }
}

/// Compare two floats; equal iff `|expected - actual| <= epsilon`
pub fn double_eq(expected: f64, actual: f64, epsilon: f64) -> Comparison {
    let digits = significant_figures(epsilon);
    Comparison {
        passed: (expected - actual).abs() <= epsilon,
        detail: format!(
            "{} expected but was {}",
            format_g(expected, digits),
            format_g(actual, digits)
        ),
        summary: format!(
            "expected {}, got {}",
            format_g(expected, 6),
            format_g(actual, 6)
        ),
    }
}

/// Compare two optional strings, treating `None` as [`NULL_POINTER`]
pub fn str_eq(expected: Option<&str>, actual: Option<&str>) -> Comparison {
    let expected = expected.unwrap_or(NULL_POINTER);
    let actual = actual.unwrap_or(NULL_POINTER);
    Comparison {
        passed: expected == actual,
        detail: format!("'{}' expected but was '{}'", expected, actual),
        summary: format!("expected '{}', got '{}'", expected, actual),
    }
}

/// Significant digits needed to show a difference of `epsilon`: `1 - log10(epsilon)`
pub fn significant_figures(epsilon: f64) -> usize {
    // The small bias absorbs log10 rounding (log10(1e-12) may land just above -12).
    let digits = (1.0 - epsilon.log10() + 1e-9).floor();
    if digits.is_finite() {
        digits.clamp(1.0, 17.0) as usize
    } else {
        17
    }
}

/// Format a float like C's `%.<precision>g`.
///
/// Uses fixed notation when the decimal exponent lies in `[-4, precision)`,
/// scientific notation otherwise, and strips trailing zeros in both cases.
pub fn format_g(value: f64, precision: usize) -> String {
    let precision = precision.max(1);

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounds to `precision` significant digits and yields the exponent after rounding.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Integer operands accepted by the integer equality assertions.
///
/// Every implementor widens to `i128` without loss, so distinct values never
/// compare equal. Floats and `u128` are rejected at compile time.
pub trait IntOperand {
    fn into_operand(self) -> i128;
}

macro_rules! impl_int_operand {
    ($($ty:ty),*) => {
        $(
            impl IntOperand for $ty {
                fn into_operand(self) -> i128 {
                    i128::from(self)
                }
            }
        )*
    };
}

impl_int_operand!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

// Pointer-sized integers are at most 64 bits on every supported target.
impl IntOperand for isize {
    fn into_operand(self) -> i128 {
        self as i128
    }
}

impl IntOperand for usize {
    fn into_operand(self) -> i128 {
        self as i128
    }
}

/// String-like operands accepted by the string equality assertions.
///
/// `None` stands for a missing string and renders as [`NULL_POINTER`].
pub trait NullableStr {
    fn as_nullable(&self) -> Option<&str>;
}

impl NullableStr for &str {
    fn as_nullable(&self) -> Option<&str> {
        Some(*self)
    }
}

impl NullableStr for String {
    fn as_nullable(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl NullableStr for &String {
    fn as_nullable(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl NullableStr for Option<&str> {
    fn as_nullable(&self) -> Option<&str> {
        *self
    }
}

impl NullableStr for Option<String> {
    fn as_nullable(&self) -> Option<&str> {
        self.as_deref()
    }
}
