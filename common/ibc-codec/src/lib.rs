//! Serialisation registry for IBC records.
//!
//! Polymorphic records are stored as a four-byte type prefix followed by the
//! Borsh encoding of the concrete value.  The prefix is derived from the name
//! a type has been registered under (see [`type_prefix`]) which lets a decoder
//! tell which concrete type it’s looking at and reject bytes written for
//! a different type.
//!
//! The registry is never global.  It’s built once with a [`RegistryBuilder`],
//! sealed into an immutable [`Registry`] and then passed explicitly to
//! whatever needs to encode or decode records.

mod registry;
pub mod types;

pub use registry::{
    type_prefix, Codec, DecodeError, EncodeError, RegisterError, Registry,
    RegistryBuilder, TypePrefix,
};
pub use types::{channel, connection, ChannelEnd, ConnectionEnd, ConsensusState};

/// Registers all record types defined in this crate.
///
/// Client implementations register their own types on top of these; see for
/// example `localhost_client::register_types`.
pub fn register_types(
    builder: &mut RegistryBuilder,
) -> Result<(), RegisterError> {
    builder.register::<ConsensusState>(ConsensusState::TYPE_NAME)?;
    builder.register::<ConnectionEnd>(ConnectionEnd::TYPE_NAME)?;
    builder.register::<ChannelEnd>(ChannelEnd::TYPE_NAME)?;
    Ok(())
}
