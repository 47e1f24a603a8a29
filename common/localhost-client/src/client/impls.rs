use ibc_client::{
    ClientStateCommon, ClientType, CommitmentPrefix, CommitmentProofBytes,
    CommitmentRoot, Failure, Hex, KvStore, Result, VerificationError,
    VerificationKind,
};
use ibc_codec::{ChannelEnd, Codec, ConnectionEnd, ConsensusState};
use ibc_paths::{Path, PrefixedPath};

use super::ClientState;
use crate::CommitmentStore;

type Kind = VerificationKind;

/// Loop-back verification.
///
/// Every `verify_*` method reads the value from the host store and compares
/// it with the claimed one.  Commitment root, proof height, proof bytes,
/// counterparty client id, consensus height and counterparty consensus state
/// are part of the shared client interface and are accepted but never looked
/// at since the store is the source of truth.
///
/// The consensus state is always looked up under this client’s own
/// identifier.
impl ClientStateCommon for ClientState {
    fn client_id(&self) -> &str { &self.id }

    fn counterparty_chain_id(&self) -> &str { &self.chain_id }

    fn client_type(&self) -> ClientType { crate::CLIENT_TYPE }

    fn latest_height(&self) -> u64 { self.height }

    /// Always `false`; the loop-back client has no notion of misbehaviour.
    fn is_frozen(&self) -> bool { false }

    fn validate(&self) -> Result { ClientState::validate(self) }

    fn verify_client_consensus_state<S, C>(
        &self,
        store: &S,
        codec: &C,
        _root: &CommitmentRoot,
        _height: u64,
        _counterparty_client_id: &str,
        _consensus_height: u64,
        prefix: &CommitmentPrefix,
        _proof: &CommitmentProofBytes,
        consensus_state: &ConsensusState,
    ) -> Result
    where
        S: KvStore + ?Sized,
        C: Codec + ?Sized,
    {
        let kind = Kind::ClientConsensusState;
        let path = Path::consensus_state(&self.id)?;
        let (path, value) = CommitmentStore::new(store, prefix).get(path)?;
        let value = non_empty(value).ok_or_else(|| not_found(kind, &path))?;
        let stored = codec.decode::<ConsensusState>(&value)?;
        expect_record(kind, &path, consensus_state, &stored)
    }

    fn verify_connection_state<S, C>(
        &self,
        store: &S,
        codec: &C,
        _height: u64,
        prefix: &CommitmentPrefix,
        _proof: &CommitmentProofBytes,
        connection_id: &str,
        connection_end: &ConnectionEnd,
        _consensus_state: Option<&ConsensusState>,
    ) -> Result
    where
        S: KvStore + ?Sized,
        C: Codec + ?Sized,
    {
        let kind = Kind::ConnectionState;
        let path = Path::connection(connection_id)?;
        let (path, value) = CommitmentStore::new(store, prefix).get(path)?;
        // Empty value is passed to the decoder which rejects it.
        let value = value.ok_or_else(|| not_found(kind, &path))?;
        let stored = codec.decode::<ConnectionEnd>(&value)?;
        expect_record(kind, &path, connection_end, &stored)
    }

    fn verify_channel_state<S, C>(
        &self,
        store: &S,
        codec: &C,
        _height: u64,
        prefix: &CommitmentPrefix,
        _proof: &CommitmentProofBytes,
        port_id: &str,
        channel_id: &str,
        channel_end: &ChannelEnd,
        _consensus_state: Option<&ConsensusState>,
    ) -> Result
    where
        S: KvStore + ?Sized,
        C: Codec + ?Sized,
    {
        let kind = Kind::ChannelState;
        let path = Path::channel_end(port_id, channel_id)?;
        let (path, value) = CommitmentStore::new(store, prefix).get(path)?;
        let value = value.ok_or_else(|| not_found(kind, &path))?;
        let stored = codec.decode::<ChannelEnd>(&value)?;
        expect_record(kind, &path, channel_end, &stored)
    }

    fn verify_packet_commitment<S: KvStore + ?Sized>(
        &self,
        store: &S,
        _height: u64,
        prefix: &CommitmentPrefix,
        _proof: &CommitmentProofBytes,
        port_id: &str,
        channel_id: &str,
        sequence: u64,
        commitment: &[u8],
        _consensus_state: Option<&ConsensusState>,
    ) -> Result {
        let path = Path::commitment(port_id, channel_id, sequence)?;
        let store = CommitmentStore::new(store, prefix);
        expect_bytes(Kind::PacketCommitment, &store, path, commitment)
    }

    fn verify_packet_acknowledgement<S: KvStore + ?Sized>(
        &self,
        store: &S,
        _height: u64,
        prefix: &CommitmentPrefix,
        _proof: &CommitmentProofBytes,
        port_id: &str,
        channel_id: &str,
        sequence: u64,
        ack: &[u8],
        _consensus_state: Option<&ConsensusState>,
    ) -> Result {
        let path = Path::ack(port_id, channel_id, sequence)?;
        let store = CommitmentStore::new(store, prefix);
        expect_bytes(Kind::PacketAcknowledgement, &store, path, ack)
    }

    fn verify_packet_acknowledgement_absence<S: KvStore + ?Sized>(
        &self,
        store: &S,
        _height: u64,
        prefix: &CommitmentPrefix,
        _proof: &CommitmentProofBytes,
        port_id: &str,
        channel_id: &str,
        sequence: u64,
        _consensus_state: Option<&ConsensusState>,
    ) -> Result {
        let path = Path::ack(port_id, channel_id, sequence)?;
        let (path, value) = CommitmentStore::new(store, prefix).get(path)?;
        match value {
            None => Ok(()),
            // Even an empty value means an acknowledgement has been written.
            Some(_) => Err(VerificationError::new(
                Kind::PacketAckAbsence,
                &path,
                Failure::UnexpectedPresence,
            )
            .into()),
        }
    }

    fn verify_next_sequence_recv<S: KvStore + ?Sized>(
        &self,
        store: &S,
        _height: u64,
        prefix: &CommitmentPrefix,
        _proof: &CommitmentProofBytes,
        port_id: &str,
        channel_id: &str,
        next_sequence_recv: u64,
        _consensus_state: Option<&ConsensusState>,
    ) -> Result {
        let kind = Kind::NextSequenceRecv;
        let path = Path::next_sequence_recv(port_id, channel_id)?;
        let (path, value) = CommitmentStore::new(store, prefix).get(path)?;
        let value = non_empty(value).ok_or_else(|| not_found(kind, &path))?;
        let stored = value
            .get(..8)
            .and_then(|bytes| <[u8; 8]>::try_from(bytes).ok())
            .map(u64::from_be_bytes)
            .ok_or_else(|| {
                let failure = Failure::Malformed { len: value.len() };
                VerificationError::new(kind, &path, failure)
            })?;
        if stored == next_sequence_recv {
            Ok(())
        } else {
            Err(VerificationError::mismatch(
                kind,
                &path,
                next_sequence_recv,
                stored,
            )
            .into())
        }
    }
}

/// Treats empty value the same as a missing one.
fn non_empty(value: Option<Vec<u8>>) -> Option<Vec<u8>> {
    value.filter(|value| !value.is_empty())
}

fn not_found(kind: Kind, path: &PrefixedPath) -> VerificationError {
    VerificationError::not_found(kind, path)
}

/// Compares decoded record with the claimed one reporting both on mismatch.
fn expect_record<T: PartialEq + core::fmt::Debug>(
    kind: Kind,
    path: &PrefixedPath,
    claimed: &T,
    stored: &T,
) -> Result {
    if claimed == stored {
        Ok(())
    } else {
        let claimed = format!("{claimed:?}");
        let stored = format!("{stored:?}");
        Err(VerificationError::mismatch(kind, path, claimed, stored).into())
    }
}

/// Compares raw bytes at `path` with `claimed` byte for byte.
fn expect_bytes<S: KvStore + ?Sized>(
    kind: Kind,
    store: &CommitmentStore<'_, S>,
    path: Path,
    claimed: &[u8],
) -> Result {
    let (path, value) = store.get(path)?;
    let stored = non_empty(value).ok_or_else(|| not_found(kind, &path))?;
    if stored == claimed {
        Ok(())
    } else {
        let err =
            VerificationError::mismatch(kind, &path, Hex(claimed), Hex(&stored));
        Err(err.into())
    }
}
