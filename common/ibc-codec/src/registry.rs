use core::any::{type_name, TypeId};
use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use sha2::Digest;

/// Four-byte prefix identifying a registered concrete type on the wire.
pub type TypePrefix = [u8; 4];

/// Length of [`TypePrefix`].
const PREFIX_LEN: usize = core::mem::size_of::<TypePrefix>();

/// Derives type prefix from the name the type is registered under.
///
/// The prefix is taken from `sha256(name)` after dropping leading zero bytes,
/// skipping three disambiguation bytes and again dropping leading zero bytes.
/// This matches the Amino prefix derivation so names registered by other
/// implementations map to the same prefixes.
pub fn type_prefix(name: &str) -> TypePrefix {
    let digest = sha2::Sha256::digest(name.as_bytes());
    let mut bytes = digest
        .iter()
        .copied()
        .skip_while(|&byte| byte == 0)
        .skip(3)
        .skip_while(|&byte| byte == 0);
    let mut prefix = TypePrefix::default();
    for (dst, src) in prefix.iter_mut().zip(&mut bytes) {
        *dst = src;
    }
    prefix
}

/// Interface for encoding and decoding registered records.
///
/// Verifiers which need to compare structured values accept any `Codec` so
/// that hosts can inject their own.  [`Registry`] is the implementation
/// provided by this crate.
pub trait Codec {
    /// Encodes `value` together with its type prefix.
    fn encode<T: BorshSerialize + 'static>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, EncodeError>;

    /// Decodes value of type `T`, verifying the type prefix first.
    fn decode<T: BorshDeserialize + 'static>(
        &self,
        bytes: &[u8],
    ) -> Result<T, DecodeError>;
}

/// Error when registering a type.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum RegisterError {
    /// The Rust type has already been registered.
    #[display(fmt = "type {} already registered", _0)]
    DuplicateType(&'static str),

    /// Another type has already been registered under the name.
    #[display(fmt = "name {} already registered", _0)]
    DuplicateName(&'static str),

    /// Prefix of the name equals prefix of another registered name.
    #[display(fmt = "prefix of {} collides with prefix of {}", name, other)]
    PrefixCollision { name: &'static str, other: &'static str },
}

/// Error when encoding a record.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum EncodeError {
    /// The type hasn’t been registered.
    #[display(fmt = "type {} not registered", _0)]
    Unregistered(&'static str),

    /// Borsh serialisation failed.
    #[display(fmt = "{}", _0)]
    Io(String),
}

/// Error when decoding a record.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum DecodeError {
    /// The type hasn’t been registered.
    #[display(fmt = "type {} not registered", _0)]
    Unregistered(&'static str),

    /// Data is too short to hold the type prefix.
    #[display(fmt = "missing type prefix")]
    Truncated,

    /// Data holds a value of a different registered type.
    #[display(fmt = "expected {} but got {}", expected, found)]
    WrongType { expected: &'static str, found: &'static str },

    /// Type prefix doesn’t belong to any registered type.
    #[display(fmt = "expected {} but got unknown prefix {:02X?}", expected, found)]
    BadPrefix { expected: &'static str, found: TypePrefix },

    /// The payload following type prefix isn’t a valid encoding of the type.
    /// This includes payload with trailing bytes.
    #[display(fmt = "invalid {}: {}", expected, reason)]
    BadPayload { expected: &'static str, reason: String },
}

#[derive(Clone, Debug)]
struct Entry {
    name: &'static str,
    prefix: TypePrefix,
}

/// Builder of a [`Registry`].
///
/// Types are registered one at a time; once all are in, [`Self::seal`]
/// produces a registry which can no longer be modified.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<TypeId, Entry>,
}

impl RegistryBuilder {
    /// Registers concrete type `T` under given `name`.
    ///
    /// Fails if the type or name is already registered or if the name’s
    /// prefix collides with prefix of a name registered earlier.
    pub fn register<T: 'static>(
        &mut self,
        name: &'static str,
    ) -> Result<&mut Self, RegisterError> {
        let type_id = TypeId::of::<T>();
        if self.entries.contains_key(&type_id) {
            return Err(RegisterError::DuplicateType(type_name::<T>()));
        }
        let prefix = type_prefix(name);
        for entry in self.entries.values() {
            if entry.name == name {
                return Err(RegisterError::DuplicateName(name));
            } else if entry.prefix == prefix {
                return Err(RegisterError::PrefixCollision {
                    name,
                    other: entry.name,
                });
            }
        }
        self.entries.insert(type_id, Entry { name, prefix });
        Ok(self)
    }

    /// Finishes building and returns the immutable registry.
    pub fn seal(self) -> Registry {
        let by_prefix = self
            .entries
            .values()
            .map(|entry| (entry.prefix, entry.name))
            .collect();
        Registry { by_type: self.entries, by_prefix }
    }
}

/// Sealed registry of concrete record types.
///
/// Read-only after construction and thus safe to share between threads.
#[derive(Clone, Debug)]
pub struct Registry {
    by_type: BTreeMap<TypeId, Entry>,
    by_prefix: BTreeMap<TypePrefix, &'static str>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder { RegistryBuilder::default() }

    /// Returns name type `T` has been registered under.
    pub fn name_of<T: 'static>(&self) -> Option<&'static str> {
        self.entry::<T>().map(|entry| entry.name)
    }

    /// Returns number of registered types.
    pub fn len(&self) -> usize { self.by_type.len() }

    pub fn is_empty(&self) -> bool { self.by_type.is_empty() }

    fn entry<T: 'static>(&self) -> Option<&Entry> {
        self.by_type.get(&TypeId::of::<T>())
    }
}

impl Codec for Registry {
    fn encode<T: BorshSerialize + 'static>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, EncodeError> {
        let entry = self
            .entry::<T>()
            .ok_or_else(|| EncodeError::Unregistered(type_name::<T>()))?;
        let mut buf = entry.prefix.to_vec();
        value
            .serialize(&mut buf)
            .map_err(|err| EncodeError::Io(err.to_string()))?;
        Ok(buf)
    }

    fn decode<T: BorshDeserialize + 'static>(
        &self,
        bytes: &[u8],
    ) -> Result<T, DecodeError> {
        let entry = self
            .entry::<T>()
            .ok_or_else(|| DecodeError::Unregistered(type_name::<T>()))?;
        if bytes.len() < PREFIX_LEN {
            return Err(DecodeError::Truncated);
        }
        let (prefix, payload) = bytes.split_at(PREFIX_LEN);
        if prefix != entry.prefix {
            let mut found = TypePrefix::default();
            found.copy_from_slice(prefix);
            return Err(match self.by_prefix.get(&found) {
                Some(&other) => {
                    DecodeError::WrongType { expected: entry.name, found: other }
                }
                None => DecodeError::BadPrefix { expected: entry.name, found },
            });
        }
        T::try_from_slice(payload).map_err(|err| DecodeError::BadPayload {
            expected: entry.name,
            reason: err.to_string(),
        })
    }
}

// ==== Tests ==================================================================
