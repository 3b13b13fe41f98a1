use core::{cmp, fmt, hash, str};
use fstr::FStr;

use crate::spec;

/// Represents a Universally Unique IDentifier.
///
/// The value is a plain 16-byte array in network byte order, aligned to 16 bytes so that
/// equality and ordering can be evaluated as single 128-bit comparisons. Ordering is
/// lexicographic over the bytes, which equals the big-endian numeric order of the value.
#[derive(Copy, Clone, Debug, Default)]
#[repr(C, align(16))]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates an object from a byte array in network byte order.
    ///
    /// The bytes are taken as is. It is up to the caller to supply a value that conforms to RFC
    /// 9562 if that matters.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates an object with every octet set to `byte`.
    ///
    /// Only `0x00` ([`Uuid::NIL`]) and `0xff` ([`Uuid::MAX`]) produce values defined by the
    /// standard; anything else is useful mainly as a fixture.
    pub const fn from_constant(byte: u8) -> Self {
        Self([byte; 16])
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Consumes the object and returns the underlying byte array.
    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Creates a UUIDv7 object from field values.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` exceeds 48 bits, `rand_a` exceeds 12 bits, or `rand_b` exceeds 62
    /// bits.
    pub fn from_fields_v7(unix_ts_ms: u64, rand_a: u16, rand_b: u64) -> Self {
        assert!(
            unix_ts_ms < 1 << 48 && rand_a < 1 << 12 && rand_b < 1 << 62,
            "invalid field value"
        );

        let mut octets = [0u8; 16];
        spec::set_unix_ts_ms(&mut octets, unix_ts_ms);
        spec::set_rand_a(&mut octets, rand_a);
        spec::set_rand_b(&mut octets, rand_b);
        Self(octets)
    }

    /// Reports the variant field value of the UUID or, if appropriate, "NIL" or "MAX".
    pub fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 if *self == Self::NIL => Variant::VarNil,
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ if *self == Self::MAX => Variant::VarMax,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if the UUID does not have the
    /// variant field value of `0b10`.
    pub fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string-like type that can be handled like [`prim@str`] through `Deref`, `Display`, and
    /// other traits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid9562::Uuid;
    ///
    /// let x = "0190c01f-a0e2-7c49-9d3e-4b4b1c1ae7d1".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(y.as_str(), "0190c01f-a0e2-7c49-9d3e-4b4b1c1ae7d1");
    /// assert_eq!(format!("{}", y), "0190c01f-a0e2-7c49-9d3e-4b4b1c1ae7d1");
    /// # Ok::<(), uuid9562::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        let mut buffer = [0u8; 36];
        write_hex_grouped(&self.0, &mut buffer, crate::format::LOWER_DIGITS);
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }
}

/// Writes the 8-4-4-4-12 grouped hexadecimal digits of `src` into `dst`.
pub(crate) fn write_hex_grouped(src: &[u8; 16], dst: &mut [u8; 36], digits: &[u8; 16]) {
    let mut buf_iter = dst.iter_mut();
    for (i, e) in src.iter().enumerate() {
        for d in [digits[(e >> 4) as usize], digits[(e & 15) as usize]] {
            if let Some(slot) = buf_iter.next() {
                *slot = d;
            }
        }
        if i == 3 || i == 5 || i == 7 || i == 9 {
            if let Some(slot) = buf_iter.next() {
                *slot = b'-';
            }
        }
    }
    debug_assert!(buf_iter.next().is_none());
}

impl PartialEq for Uuid {
    fn eq(&self, other: &Self) -> bool {
        u128::from_ne_bytes(self.0) == u128::from_ne_bytes(other.0)
    }
}

impl Eq for Uuid {}

impl PartialOrd for Uuid {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uuid {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        u128::from_be_bytes(self.0).cmp(&u128::from_be_bytes(other.0))
    }
}

impl hash::Hash for Uuid {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid string representation")]
pub struct ParseError {}

/// Represents the variant field value of a UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Variant {
    /// The Nil UUID.
    VarNil,
    /// The variant field value of `0b0`, excluding the Nil UUID.
    Var0,
    /// The variant field value of `0b10`, used by versions 4 and 7.
    Var10,
    /// The variant field value of `0b110`.
    Var110,
    /// The variant field value of `0b111`, reserved for future definition, excluding the Max
    /// UUID.
    VarReserved,
    /// The Max UUID.
    VarMax,
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl de::Visitor<'_> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
