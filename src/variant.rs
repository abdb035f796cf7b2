//! Tagged-union tuning value and the property map that carries it.
//!
//! A C image library typically represents arbitrary codec tuning values with
//! a `void*` + size + type tag. In Rust this collapses naturally into a sum
//! type — there is no need for a manual tag byte or an allocation per scalar.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// A single tuning value of one of a fixed set of primitive types.
///
/// Construct with `From`/`Into` (`Variant::from(true)`, `Variant::from(42i64)`,
/// `Variant::from("x264-profile")`) and read back with [`Variant::as_bool`],
/// [`Variant::as_i64`], [`Variant::as_u64`], [`Variant::as_f64`],
/// [`Variant::as_str`], and [`Variant::as_bytes`]. A getter that doesn't match
/// the stored type returns `None` rather than panicking or silently
/// coercing — coercion across numeric widths (e.g. reading an `Int` as
/// `as_i64`) is the one exception, and is always widening, never lossy.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Variant {
    Bool(bool),
    Char(i8),
    UnsignedChar(u8),
    Short(i16),
    UnsignedShort(u16),
    Int(i32),
    UnsignedInt(u32),
    Long(i64),
    UnsignedLong(u64),
    LongLong(i64),
    UnsignedLongLong(u64),
    Float(f32),
    Double(f64),
    String(String),
    Data(Vec<u8>),
}

impl Variant {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Widening read of any signed/unsigned integer variant as `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Variant::Char(v) => Some(v as i64),
            Variant::Short(v) => Some(v as i64),
            Variant::Int(v) => Some(v as i64),
            Variant::Long(v) => Some(v),
            Variant::LongLong(v) => Some(v),
            Variant::UnsignedChar(v) => Some(v as i64),
            Variant::UnsignedShort(v) => Some(v as i64),
            Variant::UnsignedInt(v) => Some(v as i64),
            _ => None,
        }
    }

    /// Widening read of any unsigned integer variant as `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Variant::UnsignedChar(v) => Some(v as u64),
            Variant::UnsignedShort(v) => Some(v as u64),
            Variant::UnsignedInt(v) => Some(v as u64),
            Variant::UnsignedLong(v) => Some(v),
            Variant::UnsignedLongLong(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Variant::Float(v) => Some(v as f64),
            Variant::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Variant::Data(d) => Some(d.as_slice()),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Variant {
            fn from(v: $ty) -> Self {
                Variant::$variant(v)
            }
        }
    };
}

impl_from!(bool, Bool);
impl_from!(i8, Char);
impl_from!(u8, UnsignedChar);
impl_from!(i16, Short);
impl_from!(u16, UnsignedShort);
impl_from!(i32, Int);
impl_from!(u32, UnsignedInt);
impl_from!(i64, Long);
impl_from!(u64, UnsignedLong);
impl_from!(f32, Float);
impl_from!(f64, Double);
impl_from!(String, String);
impl_from!(Vec<u8>, Data);

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(String::from(v))
    }
}

/// An ordered string-keyed map of [`Variant`] values.
///
/// Replaces the open-addressed string hash map a C codec library would use
/// here: a `BTreeMap` is the native Rust map that needs no extra dependency
/// and, unlike a hash map, gives deterministic iteration order — useful for
/// reproducible tuning dumps and tests. Used for `LoadOptions::tuning`,
/// `SaveOptions::tuning`, and [`crate::image::Image::tuning`].
pub type PropertyMap = BTreeMap<String, Variant>;
