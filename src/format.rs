//! Alternative string representations of [`Uuid`].
//!
//! The canonical 8-4-4-4-12 lower-case form is produced by [`Uuid::encode`] and
//! [`Display`](fmt::Display). This module adds the forms some systems expect instead:
//!
//! | Spec   | Example                                  |
//! | ------ | ---------------------------------------- |
//! | `""`   | `123e4567-e89b-42d3-a456-426614174000`   |
//! | `"u"`  | `123E4567-E89B-42D3-A456-426614174000`   |
//! | `"#"`  | `{123e4567-e89b-42d3-a456-426614174000}` |
//! | `"#u"` | `{123E4567-E89B-42D3-A456-426614174000}` |
//! | `"n"`  | `123e4567e89b42d3a456426614174000`       |
//!
//! `n` may be combined with `u` (`"nu"`) but not with `#`.

use core::{fmt, str};
use fstr::FStr;

use crate::{id::write_hex_grouped, Error, Uuid};

pub(crate) const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

impl Uuid {
    /// Returns the canonical representation with upper-case hexadecimal digits.
    pub fn encode_upper(&self) -> FStr<36> {
        let mut buffer = [0u8; 36];
        write_hex_grouped(self.as_bytes(), &mut buffer, UPPER_DIGITS);
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the canonical representation wrapped in curly braces.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let e = uuid9562::Uuid::NIL.encode_braced();
    /// assert_eq!(e.as_str(), "{00000000-0000-0000-0000-000000000000}");
    /// ```
    pub fn encode_braced(&self) -> FStr<38> {
        encode_braced_with(self.as_bytes(), LOWER_DIGITS)
    }

    /// Returns the 32-digit hexadecimal representation without dashes.
    pub fn encode_simple(&self) -> FStr<32> {
        encode_simple_with(self.as_bytes(), LOWER_DIGITS)
    }

    /// Returns a [`Display`](fmt::Display)able wrapper applying `spec`.
    pub const fn format_with(&self, spec: FormatSpec) -> Formatted {
        Formatted { uuid: *self, spec }
    }

    /// Parses `spec` and renders the UUID accordingly.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid9562::Uuid;
    ///
    /// let e = Uuid::from_constant(0xab);
    /// assert_eq!(e.to_string_with("#u")?, "{ABABABAB-ABAB-ABAB-ABAB-ABABABABABAB}");
    /// assert!(e.to_string_with("x").is_err());
    /// # Ok::<(), uuid9562::Error>(())
    /// ```
    pub fn to_string_with(&self, spec: &str) -> Result<String, Error> {
        Ok(self.format_with(spec.parse()?).to_string())
    }
}

/// Presentation options parsed from a format specifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FormatSpec {
    /// Wraps the output in curly braces.
    pub braced: bool,
    /// Uses upper-case hexadecimal digits.
    pub upper: bool,
    /// Omits the dashes between groups.
    pub simple: bool,
}

impl str::FromStr for FormatSpec {
    type Err = Error;

    /// Parses `[#][n][u]`; anything else is rejected as a whole.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut spec = Self::default();
        let mut rest = src.as_bytes();
        if let [b'#', tail @ ..] = rest {
            spec.braced = true;
            rest = tail;
        }
        if let [b'n', tail @ ..] = rest {
            spec.simple = true;
            rest = tail;
        }
        if let [b'u', tail @ ..] = rest {
            spec.upper = true;
            rest = tail;
        }

        if !rest.is_empty() || (spec.braced && spec.simple) {
            return Err(Error::InvalidFormatSpec(src.to_owned()));
        }
        Ok(spec)
    }
}

/// A [`Uuid`] paired with a [`FormatSpec`], returned by [`Uuid::format_with`].
#[derive(Copy, Clone, Debug)]
pub struct Formatted {
    uuid: Uuid,
    spec: FormatSpec,
}

impl fmt::Display for Formatted {
    /// Renders the UUID, honoring width, fill, and alignment of the formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let src = self.uuid.as_bytes();
        let digits = if self.spec.upper {
            UPPER_DIGITS
        } else {
            LOWER_DIGITS
        };

        if self.spec.simple {
            f.pad(&encode_simple_with(src, digits))
        } else if self.spec.braced {
            f.pad(&encode_braced_with(src, digits))
        } else {
            let mut buffer = [0u8; 36];
            write_hex_grouped(src, &mut buffer, digits);
            // SAFETY: ok because buffer consists of ASCII code points
            let s: FStr<36> = unsafe { FStr::from_bytes_unchecked(buffer) };
            f.pad(&s)
        }
    }
}

fn encode_braced_with(src: &[u8; 16], digits: &[u8; 16]) -> FStr<38> {
    let mut inner = [0u8; 36];
    write_hex_grouped(src, &mut inner, digits);
    let mut buffer = [0u8; 38];
    buffer[0] = b'{';
    buffer[1..37].copy_from_slice(&inner);
    buffer[37] = b'}';
    // SAFETY: ok because buffer consists of ASCII code points
    unsafe { FStr::from_bytes_unchecked(buffer) }
}

fn encode_simple_with(src: &[u8; 16], digits: &[u8; 16]) -> FStr<32> {
    let mut buffer = [0u8; 32];
    for (i, e) in src.iter().enumerate() {
        buffer[i * 2] = digits[(e >> 4) as usize];
        buffer[i * 2 + 1] = digits[(e & 15) as usize];
    }
    // SAFETY: ok because buffer consists of ASCII code points
    unsafe { FStr::from_bytes_unchecked(buffer) }
}
