use ibc_codec::{ChannelEnd, Codec, ConnectionEnd, ConsensusState};

use crate::{
    CommitmentPrefix, CommitmentProofBytes, CommitmentRoot, KvStore, Result,
};

/// Kind of a light client.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ClientType {
    /// Client verifying a remote chain through signed headers and Merkle
    /// proofs.
    Tendermint,

    /// Client of the host chain itself which reads the local store in place
    /// of checking proofs.
    Localhost,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str { self.into() }
}

/// Status of a client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum Status {
    Active,
    Frozen,
}

/// Operations handshake logic performs on a client without knowing its kind.
///
/// The verification methods carry every argument a proof-checking client
/// needs: the commitment root, proof height, proof bytes, the counterparty
/// client and height of a consensus state and (where relevant) the
/// counterparty consensus state.  Implementations which don’t check
/// proofs must still accept them.  Dropping a parameter because one client
/// kind doesn’t look at it breaks the other kinds.
///
/// Store and codec are passed with each call rather than held by the client
/// so that a client state stays a plain value.  All verification methods are
/// read-only and may be called concurrently as long as the store gives
/// a consistent view.
pub trait ClientStateCommon {
    fn client_id(&self) -> &str;

    /// Returns identifier of the chain this client tracks.
    fn counterparty_chain_id(&self) -> &str;

    fn client_type(&self) -> ClientType;

    /// Returns the latest height observed by this client.
    fn latest_height(&self) -> u64;

    fn is_frozen(&self) -> bool;

    fn status(&self) -> Status {
        if self.is_frozen() {
            Status::Frozen
        } else {
            Status::Active
        }
    }

    /// Checks the client state’s invariants returning the first one which
    /// doesn’t hold.
    fn validate(&self) -> Result;

    /// Verifies that consensus state held by the client at `consensus_height`
    /// equals `consensus_state`.
    ///
    /// Clients which don’t prove consensus states of other clients may ignore
    /// `counterparty_client_id` and `consensus_height`.
    fn verify_client_consensus_state<S, C>(
        &self,
        store: &S,
        codec: &C,
        root: &CommitmentRoot,
        height: u64,
        counterparty_client_id: &str,
        consensus_height: u64,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        consensus_state: &ConsensusState,
    ) -> Result
    where
        S: KvStore + ?Sized,
        C: Codec + ?Sized;

    /// Verifies that connection `connection_id` equals `connection_end`.
    fn verify_connection_state<S, C>(
        &self,
        store: &S,
        codec: &C,
        height: u64,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        connection_id: &str,
        connection_end: &ConnectionEnd,
        consensus_state: Option<&ConsensusState>,
    ) -> Result
    where
        S: KvStore + ?Sized,
        C: Codec + ?Sized;

    /// Verifies that channel `channel_id` on port `port_id` equals
    /// `channel_end`.
    fn verify_channel_state<S, C>(
        &self,
        store: &S,
        codec: &C,
        height: u64,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        port_id: &str,
        channel_id: &str,
        channel_end: &ChannelEnd,
        consensus_state: Option<&ConsensusState>,
    ) -> Result
    where
        S: KvStore + ?Sized,
        C: Codec + ?Sized;

    /// Verifies that packet commitment of given packet equals `commitment`.
    fn verify_packet_commitment<S: KvStore + ?Sized>(
        &self,
        store: &S,
        height: u64,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        port_id: &str,
        channel_id: &str,
        sequence: u64,
        commitment: &[u8],
        consensus_state: Option<&ConsensusState>,
    ) -> Result;

    /// Verifies that acknowledgement of given packet equals `ack`.
    fn verify_packet_acknowledgement<S: KvStore + ?Sized>(
        &self,
        store: &S,
        height: u64,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        port_id: &str,
        channel_id: &str,
        sequence: u64,
        ack: &[u8],
        consensus_state: Option<&ConsensusState>,
    ) -> Result;

    /// Verifies that no acknowledgement has been written for given packet.
    fn verify_packet_acknowledgement_absence<S: KvStore + ?Sized>(
        &self,
        store: &S,
        height: u64,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        port_id: &str,
        channel_id: &str,
        sequence: u64,
        consensus_state: Option<&ConsensusState>,
    ) -> Result;

    /// Verifies that the next sequence to be received on given channel is
    /// `next_sequence_recv`.
    fn verify_next_sequence_recv<S: KvStore + ?Sized>(
        &self,
        store: &S,
        height: u64,
        prefix: &CommitmentPrefix,
        proof: &CommitmentProofBytes,
        port_id: &str,
        channel_id: &str,
        next_sequence_recv: u64,
        consensus_state: Option<&ConsensusState>,
    ) -> Result;
}

// ==== Tests ==================================================================

#[test]
fn test_client_type() {
    use core::str::FromStr;

    assert_eq!("localhost", ClientType::Localhost.to_string());
    assert_eq!("tendermint", ClientType::Tendermint.as_str());
    assert_eq!(Ok(ClientType::Localhost), ClientType::from_str("localhost"));
    assert!(ClientType::from_str("Localhost").is_err());
}
