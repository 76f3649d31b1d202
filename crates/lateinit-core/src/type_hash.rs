//! Deterministic identity for library symbols.
//!
//! [`TypeHash`] names types, functions and property accessors that live
//! outside a compilation unit. It is computed from names and signatures, so
//! a pass can keep a resolved symbol without borrowing the registry it came
//! from.
//!
//! ```
//! use lateinit_core::TypeHash;
//!
//! let string = TypeHash::from_name("lang::String");
//! assert_eq!(string, TypeHash::from_name("lang::String"));
//!
//! let f = TypeHash::from_function("lang::print", &[string]);
//! let g = TypeHash::from_function("lang::print", &[]);
//! assert_ne!(f, g);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

// Per-domain seeds keep a type, a function and a property of the same name apart.
const TYPE_DOMAIN: u64 = 0x2fac10b63a6cc57c;
const FUNCTION_DOMAIN: u64 = 0x5ea77ffbcdf5f302;
const PROPERTY_DOMAIN: u64 = 0x7d3c8b4a92e15f6d;
const GETTER_DOMAIN: u64 = 0x3e9f5d2a8c7b1403;
const MIX: u64 = 0x4bc94d6bd06053ad;
const PARAM_SEED: u64 = 0x9e3779b97f4a7c15;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Hash of a qualified type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(TYPE_DOMAIN ^ xxh64(name.as_bytes(), 0))
    }

    /// Hash of a function signature. Parameter order is significant.
    #[inline]
    pub fn from_function(name: &str, params: &[TypeHash]) -> Self {
        let seed = FUNCTION_DOMAIN ^ xxh64(name.as_bytes(), 0);
        let hash = params.iter().enumerate().fold(seed, |hash, (i, param)| {
            let marker = PARAM_SEED.wrapping_mul(i as u64 + 1);
            hash.wrapping_mul(MIX).wrapping_add(marker ^ param.0)
        });
        TypeHash(hash)
    }

    /// Hash of a property; extension properties that share a name but not a
    /// receiver are distinct.
    #[inline]
    pub fn from_property(name: &str, receiver: Option<TypeHash>) -> Self {
        let receiver = receiver.map_or(0, |r| r.0);
        let base = PROPERTY_DOMAIN ^ xxh64(name.as_bytes(), 0);
        TypeHash(base.wrapping_mul(MIX).wrapping_add(receiver))
    }

    /// Hash of the getter accessor of `property`.
    #[inline]
    pub fn getter_of(property: TypeHash) -> Self {
        TypeHash(GETTER_DOMAIN ^ property.0.rotate_left(17))
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
