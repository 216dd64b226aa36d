//! Numeric literal codec.
//!
//! Reading happens in two steps. [`scan`] checks the RFC 8259 number grammar
//!
//! ```text
//! number = [ "-" ] int [ frac ] [ exp ]
//! int    = "0" / ( digit1-9 *digit )
//! frac   = "." 1*digit
//! exp    = ( "e" / "E" ) [ "+" / "-" ] 1*digit
//! ```
//!
//! and returns the length of the literal. [`read`] then converts the validated
//! span according to a [`NumberPolicy`].
//!
//! [`write`] produces the shortest text that reads back to the same bits.
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::number;
//! use jsondoc::{Error, NumberPolicy};
//!
//! assert_eq!(number::scan(b"-12.5e3,"), Ok(7));
//! assert_eq!(number::scan(b"012"), Err(Error::LeadingZeros));
//! assert_eq!(number::scan(b"1."), Err(Error::InvalidNumber));
//!
//! let (value, len) = number::read(b"0.1]", NumberPolicy::Precise).unwrap();
//! assert_eq!((value, len), (0.1, 3));
//!
//! let mut out = String::new();
//! number::write(0.1, &mut out);
//! assert_eq!(out, "0.1");
//! ```

use crate::{Error, NumberPolicy, Result};
use lexical_parse_float::FromLexical as _;
use log::trace;

/// Significant digits that fit in a `u64` without overflow.
const MAX_MANTISSA_DIGITS: usize = 19;

/// Largest integral magnitude written without an exponent.
const PLAIN_INTEGER_LIMIT: f64 = 1e16;

#[rustfmt::skip]
static POW10: [f64; 309] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9,
    1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16, 1e17, 1e18, 1e19,
    1e20, 1e21, 1e22, 1e23, 1e24, 1e25, 1e26, 1e27, 1e28, 1e29,
    1e30, 1e31, 1e32, 1e33, 1e34, 1e35, 1e36, 1e37, 1e38, 1e39,
    1e40, 1e41, 1e42, 1e43, 1e44, 1e45, 1e46, 1e47, 1e48, 1e49,
    1e50, 1e51, 1e52, 1e53, 1e54, 1e55, 1e56, 1e57, 1e58, 1e59,
    1e60, 1e61, 1e62, 1e63, 1e64, 1e65, 1e66, 1e67, 1e68, 1e69,
    1e70, 1e71, 1e72, 1e73, 1e74, 1e75, 1e76, 1e77, 1e78, 1e79,
    1e80, 1e81, 1e82, 1e83, 1e84, 1e85, 1e86, 1e87, 1e88, 1e89,
    1e90, 1e91, 1e92, 1e93, 1e94, 1e95, 1e96, 1e97, 1e98, 1e99,
    1e100, 1e101, 1e102, 1e103, 1e104, 1e105, 1e106, 1e107, 1e108, 1e109,
    1e110, 1e111, 1e112, 1e113, 1e114, 1e115, 1e116, 1e117, 1e118, 1e119,
    1e120, 1e121, 1e122, 1e123, 1e124, 1e125, 1e126, 1e127, 1e128, 1e129,
    1e130, 1e131, 1e132, 1e133, 1e134, 1e135, 1e136, 1e137, 1e138, 1e139,
    1e140, 1e141, 1e142, 1e143, 1e144, 1e145, 1e146, 1e147, 1e148, 1e149,
    1e150, 1e151, 1e152, 1e153, 1e154, 1e155, 1e156, 1e157, 1e158, 1e159,
    1e160, 1e161, 1e162, 1e163, 1e164, 1e165, 1e166, 1e167, 1e168, 1e169,
    1e170, 1e171, 1e172, 1e173, 1e174, 1e175, 1e176, 1e177, 1e178, 1e179,
    1e180, 1e181, 1e182, 1e183, 1e184, 1e185, 1e186, 1e187, 1e188, 1e189,
    1e190, 1e191, 1e192, 1e193, 1e194, 1e195, 1e196, 1e197, 1e198, 1e199,
    1e200, 1e201, 1e202, 1e203, 1e204, 1e205, 1e206, 1e207, 1e208, 1e209,
    1e210, 1e211, 1e212, 1e213, 1e214, 1e215, 1e216, 1e217, 1e218, 1e219,
    1e220, 1e221, 1e222, 1e223, 1e224, 1e225, 1e226, 1e227, 1e228, 1e229,
    1e230, 1e231, 1e232, 1e233, 1e234, 1e235, 1e236, 1e237, 1e238, 1e239,
    1e240, 1e241, 1e242, 1e243, 1e244, 1e245, 1e246, 1e247, 1e248, 1e249,
    1e250, 1e251, 1e252, 1e253, 1e254, 1e255, 1e256, 1e257, 1e258, 1e259,
    1e260, 1e261, 1e262, 1e263, 1e264, 1e265, 1e266, 1e267, 1e268, 1e269,
    1e270, 1e271, 1e272, 1e273, 1e274, 1e275, 1e276, 1e277, 1e278, 1e279,
    1e280, 1e281, 1e282, 1e283, 1e284, 1e285, 1e286, 1e287, 1e288, 1e289,
    1e290, 1e291, 1e292, 1e293, 1e294, 1e295, 1e296, 1e297, 1e298, 1e299,
    1e300, 1e301, 1e302, 1e303, 1e304, 1e305, 1e306, 1e307, 1e308,
];

#[inline]
fn digits_from(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b'0'..=b'9')) {
        i += 1;
    }
    i
}

/// Validates the number literal at the start of `bytes`.
///
/// Returns the number of bytes the literal spans. Whatever follows the
/// literal is left for the caller to judge.
///
/// # Errors
///
/// - [`Error::LeadingZeros`] for an integer part like `01` or `-00`
/// - [`Error::InvalidNumber`] for a lone `-`, an empty fraction, or an
///   exponent without digits
pub fn scan(bytes: &[u8]) -> Result<usize> {
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    match bytes.get(i) {
        Some(b'0') => {
            i += 1;
            if matches!(bytes.get(i), Some(b'0'..=b'9')) {
                return Err(Error::LeadingZeros);
            }
        }
        Some(b'1'..=b'9') => i = digits_from(bytes, i + 1),
        _ => return Err(Error::InvalidNumber),
    }

    if bytes.get(i) == Some(&b'.') {
        let start = i + 1;
        i = digits_from(bytes, start);
        if i == start {
            return Err(Error::InvalidNumber);
        }
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let start = i;
        i = digits_from(bytes, start);
        if i == start {
            return Err(Error::InvalidNumber);
        }
    }

    Ok(i)
}

/// Reads the number literal at the start of `bytes`.
///
/// Returns the value and the number of bytes consumed.
///
/// # Errors
///
/// Any error from [`scan`], or [`Error::InvalidNumber`] when the literal is
/// too large to be represented as a finite double.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{number, Error, NumberPolicy};
///
/// assert_eq!(number::read(b"25", NumberPolicy::Table), Ok((25.0, 2)));
/// assert_eq!(number::read(b"1e400", NumberPolicy::Precise), Err(Error::InvalidNumber));
/// ```
pub fn read(bytes: &[u8], policy: NumberPolicy) -> Result<(f64, usize)> {
    let len = scan(bytes)?;
    let literal = &bytes[..len];
    let value = match policy {
        NumberPolicy::Precise => f64::from_lexical(literal).map_err(|_| Error::InvalidNumber)?,
        NumberPolicy::Table => read_table(literal),
    };
    if !value.is_finite() {
        trace!("number literal overflows f64 ({len} bytes)");
        return Err(Error::InvalidNumber);
    }
    Ok((value, len))
}

/// Converts a literal already accepted by [`scan`] by gathering up to 19
/// significant digits and scaling them with [`POW10`].
fn read_table(literal: &[u8]) -> f64 {
    let (negative, rest) = match literal.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, literal),
    };

    let mut mantissa: u64 = 0;
    let mut significant = 0usize;
    let mut exp10: i64 = 0;
    let mut i = 0;

    while let Some(&(b @ b'0'..=b'9')) = rest.get(i) {
        if significant < MAX_MANTISSA_DIGITS {
            mantissa = mantissa * 10 + u64::from(b - b'0');
            if mantissa != 0 {
                significant += 1;
            }
        } else {
            exp10 += 1;
        }
        i += 1;
    }

    if rest.get(i) == Some(&b'.') {
        i += 1;
        while let Some(&(b @ b'0'..=b'9')) = rest.get(i) {
            if significant < MAX_MANTISSA_DIGITS {
                mantissa = mantissa * 10 + u64::from(b - b'0');
                if mantissa != 0 {
                    significant += 1;
                }
                exp10 -= 1;
            }
            i += 1;
        }
    }

    if matches!(rest.get(i), Some(b'e' | b'E')) {
        i += 1;
        let exp_negative = match rest.get(i) {
            Some(b'-') => {
                i += 1;
                true
            }
            Some(b'+') => {
                i += 1;
                false
            }
            _ => false,
        };
        let mut exp: i64 = 0;
        while let Some(&(b @ b'0'..=b'9')) = rest.get(i) {
            // Saturate: anything past this is already infinite or zero.
            if exp < 100_000 {
                exp = exp * 10 + i64::from(b - b'0');
            }
            i += 1;
        }
        exp10 += if exp_negative { -exp } else { exp };
    }

    let magnitude = scale(mantissa, exp10);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn scale(mantissa: u64, exp10: i64) -> f64 {
    if mantissa == 0 {
        return 0.0;
    }
    let value = mantissa as f64;
    let max = (POW10.len() - 1) as i64;
    if exp10 >= 0 {
        if exp10 > max {
            return f64::INFINITY;
        }
        value * POW10[exp10 as usize]
    } else {
        let down = -exp10;
        if down <= max {
            value / POW10[down as usize]
        } else if down <= 2 * max {
            // Two steps reach into the subnormal range.
            value / POW10[max as usize] / POW10[(down - max) as usize]
        } else {
            0.0
        }
    }
}

/// Appends the text of `value` to `out`.
///
/// Integral values below 10^16 are written without a fraction (`42`, `-0`);
/// everything else uses the shortest representation that reads back to the
/// same bits. JSON has no spelling for NaN or the infinities, so those are
/// written as `null`.
///
/// # Examples
///
/// ```rust
/// use jsondoc::number;
///
/// let mut out = String::new();
/// number::write(42.0, &mut out);
/// out.push(' ');
/// number::write(f64::MIN_POSITIVE, &mut out);
/// assert_eq!(out, "42 2.2250738585072014e-308");
/// ```
pub fn write(value: f64, out: &mut String) {
    if !value.is_finite() {
        out.push_str("null");
    } else if value == 0.0 {
        out.push_str(if value.is_sign_negative() { "-0" } else { "0" });
    } else if value.fract() == 0.0 && value.abs() < PLAIN_INTEGER_LIMIT {
        out.push_str(&(value as i64).to_string());
    } else {
        let mut buffer = ryu::Buffer::new();
        out.push_str(buffer.format_finite(value));
    }
}
