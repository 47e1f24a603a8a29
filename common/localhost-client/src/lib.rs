//! Loop-back IBC client.
//!
//! The loop-back client lets a chain open connections and channels to
//! itself.  Since prover and verifier are the same chain, proofs are replaced
//! by reading commitments straight from the host store.
//!
//! Hosts build the codec once with [`registry`], keep it around and pass it
//! together with the store to the verification methods of
//! [`ibc_client::ClientStateCommon`].

mod client;
mod store;

pub use client::ClientState;
pub use ibc_client::{ClientStateCommon, ClientType, Error};
pub use store::CommitmentStore;

/// Identifier of the loop-back client.  It’s reserved by the protocol and
/// equal to the client type name.
pub const CLIENT_ID: &str = "localhost";

/// Client type of the loop-back client.
pub const CLIENT_TYPE: ClientType = ClientType::Localhost;

/// Registers loop-back client’s record types.
///
/// This doesn’t include records common to all clients; those are registered
/// by [`ibc_codec::register_types`].
pub fn register_types(
    builder: &mut ibc_codec::RegistryBuilder,
) -> Result<(), ibc_codec::RegisterError> {
    builder.register::<ClientState>(ClientState::TYPE_NAME)?;
    Ok(())
}

/// Builds sealed registry with all record types the loop-back client decodes
/// or persists.
pub fn registry() -> Result<ibc_codec::Registry, ibc_codec::RegisterError> {
    let mut builder = ibc_codec::Registry::builder();
    ibc_codec::register_types(&mut builder)?;
    register_types(&mut builder)?;
    Ok(builder.seal())
}

#[test]
fn test_registry() {
    use ibc_codec::Codec;

    let registry = registry().unwrap();
    assert_eq!(4, registry.len());
    assert_eq!(
        Some(ClientState::TYPE_NAME),
        registry.name_of::<ClientState>()
    );

    let state = ClientState::new("testchain-0", 10);
    let bytes = registry.encode(&state).unwrap();
    assert_eq!(&hex_literal::hex!("827b332c")[..], &bytes[..4]);
    assert_eq!(Ok(state), registry.decode::<ClientState>(&bytes));

    let mut builder = ibc_codec::Registry::builder();
    register_types(&mut builder).unwrap();
    assert!(register_types(&mut builder).is_err());
}
