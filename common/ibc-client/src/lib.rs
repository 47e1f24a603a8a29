//! Interface shared by all IBC client kinds.
//!
//! Handshake code consumes clients through [`ClientStateCommon`] without
//! knowing whether the counterparty is verified cryptographically or, as is
//! the case for the loop-back client, by reading the local store directly.

#![allow(clippy::too_many_arguments)]

mod client_state;
pub mod error;
mod store;

pub use client_state::{ClientStateCommon, ClientType, Status};
pub use ibc_core_commitment_types::commitment::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot,
};
pub use error::{
    Error, Failure, Hex, ValidationError, VerificationError, VerificationKind,
};
pub use store::{KvStore, MemoryStore, StoreError};

pub type Result<T = (), E = Error> = core::result::Result<T, E>;
