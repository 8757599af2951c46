//! Stored values and their textual coercion.
//!
//! The `value` column of the store is dynamically typed. Every kind renders
//! to text the way the store itself casts values to `TEXT`, so callers never
//! assume numeric semantics.

/// A scalar as it was found in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// Significant digits kept when rendering reals.
const REAL_PRECISION: i32 = 15;

impl StoredValue {
    /// Coerce the value into its display text.
    ///
    /// Booleans are stored as integers and render as `1` / `0`. A stored
    /// `NULL` renders as an empty string.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Integer(value) => value.to_string(),
            Self::Real(value) => real_to_text(value),
            Self::Text(value) => value,
            Self::Blob(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl From<bool> for StoredValue {
    fn from(value: bool) -> Self {
        Self::Integer(i64::from(value))
    }
}

/// Render a real with 15 significant digits, keeping a fractional part.
#[allow(clippy::float_cmp)]
fn real_to_text(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    // Both zeros render unsigned.
    if value == 0.0 {
        return "0.0".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{:.*e}", (REAL_PRECISION - 1) as usize, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= REAL_PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        );
    }

    #[allow(clippy::cast_sign_loss)]
    let decimals = (REAL_PRECISION - 1 - exponent) as usize;
    trim_fraction(&format!("{value:.decimals$}"))
}

/// Drop trailing zeros of the fractional part, keeping at least one digit.
fn trim_fraction(digits: &str) -> String {
    if !digits.contains('.') {
        return format!("{digits}.0");
    }
    let trimmed = digits.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}
