use hex_literal::hex;
use ibc_client::{
    ClientStateCommon, ClientType, CommitmentPrefix, CommitmentProofBytes,
    CommitmentRoot, Error, Failure, KvStore, MemoryStore, Status, StoreError,
    ValidationError, VerificationKind,
};
use ibc_codec::{
    channel, connection, ChannelEnd, Codec, ConnectionEnd, ConsensusState,
    DecodeError, Registry,
};
use ibc_paths::{EmptyPrefix, IdKind, Path, PrefixedPath};
use pretty_assertions::assert_eq;

use super::ClientState;

type Result<T = (), E = Error> = core::result::Result<T, E>;

const HEIGHT: u64 = 10;

struct TestContext {
    client: ClientState,
    registry: Registry,
    prefix: CommitmentPrefix,
    store: MemoryStore,
    root: CommitmentRoot,
    proof: CommitmentProofBytes,
}

impl TestContext {
    fn new() -> Self {
        Self {
            client: ClientState::new("testchain-0", HEIGHT),
            registry: crate::registry().unwrap(),
            prefix: prefix(b"ibc"),
            store: MemoryStore::default(),
            // The loop-back client never looks at these so use garbage.
            root: CommitmentRoot::from(b"not a root".to_vec()),
            proof: proof(),
        }
    }

    fn set(&mut self, path: Path, value: impl Into<Vec<u8>>) {
        let key = PrefixedPath::new(&self.prefix, path).unwrap().to_key();
        self.store.set(key, value);
    }

    fn set_record<T: borsh::BorshSerialize + 'static>(
        &mut self,
        path: Path,
        record: &T,
    ) {
        let bytes = self.registry.encode(record).unwrap();
        self.set(path, bytes);
    }

    fn consensus(&self, client_id: &str, state: &ConsensusState) -> Result {
        self.client.verify_client_consensus_state(
            &self.store,
            &self.registry,
            &self.root,
            HEIGHT,
            client_id,
            7,
            &self.prefix,
            &self.proof,
            state,
        )
    }

    fn connection(&self, connection_id: &str, end: &ConnectionEnd) -> Result {
        self.client.verify_connection_state(
            &self.store,
            &self.registry,
            HEIGHT,
            &self.prefix,
            &self.proof,
            connection_id,
            end,
            None,
        )
    }

    fn channel(&self, port_id: &str, channel_id: &str, end: &ChannelEnd) -> Result {
        self.client.verify_channel_state(
            &self.store,
            &self.registry,
            HEIGHT,
            &self.prefix,
            &self.proof,
            port_id,
            channel_id,
            end,
            None,
        )
    }

    fn commitment(&self, seq: u64, commitment: &[u8]) -> Result {
        self.client.verify_packet_commitment(
            &self.store,
            HEIGHT,
            &self.prefix,
            &self.proof,
            "transfer",
            "channel-0",
            seq,
            commitment,
            None,
        )
    }

    fn ack(&self, seq: u64, ack: &[u8]) -> Result {
        self.client.verify_packet_acknowledgement(
            &self.store,
            HEIGHT,
            &self.prefix,
            &self.proof,
            "transfer",
            "channel-0",
            seq,
            ack,
            None,
        )
    }

    fn ack_absence(&self, seq: u64) -> Result {
        self.client.verify_packet_acknowledgement_absence(
            &self.store,
            HEIGHT,
            &self.prefix,
            &self.proof,
            "transfer",
            "channel-0",
            seq,
            None,
        )
    }

    fn next_seq(&self, seq: u64) -> Result {
        self.client.verify_next_sequence_recv(
            &self.store,
            HEIGHT,
            &self.prefix,
            &self.proof,
            "transfer",
            "channel-0",
            seq,
            None,
        )
    }
}

fn prefix(bytes: &[u8]) -> CommitmentPrefix {
    CommitmentPrefix::try_from(bytes.to_vec()).unwrap()
}

fn proof() -> CommitmentProofBytes {
    CommitmentProofBytes::try_from(b"not a proof".to_vec()).unwrap()
}

/// Returns verification kind and failure of a verification error.
#[track_caller]
fn failure(res: Result) -> (VerificationKind, Failure) {
    match res {
        Err(Error::Verification(err)) => (err.kind, err.failure),
        res => panic!("expected verification error; got {res:?}"),
    }
}

fn sample_consensus() -> ConsensusState {
    ConsensusState {
        timestamp_ns: 1_700_000_000_000_000_000,
        root: hex!("0102030405060708").to_vec(),
        next_validators_hash: hex!("a1a2a3a4").to_vec(),
    }
}

fn sample_connection() -> ConnectionEnd {
    ConnectionEnd {
        state: connection::State::Open,
        client_id: "localhost".into(),
        counterparty: connection::Counterparty {
            client_id: "localhost".into(),
            connection_id: "connection-1".into(),
            prefix: b"ibc".to_vec(),
        },
        versions: vec!["1".into()],
    }
}

fn sample_channel() -> ChannelEnd {
    ChannelEnd {
        state: channel::State::TryOpen,
        ordering: channel::Order::Ordered,
        counterparty: channel::Counterparty {
            port_id: "transfer".into(),
            channel_id: "channel-1".into(),
        },
        connection_hops: vec!["connection-0".into()],
        version: "ics20-1".into(),
    }
}

// ==== Accessors and validation ===============================================

#[test]
fn test_accessors() {
    let client = ClientState::new("testchain-0", HEIGHT);
    assert_eq!("localhost", client.client_id());
    assert_eq!("testchain-0", client.counterparty_chain_id());
    assert_eq!(ClientType::Localhost, client.client_type());
    assert_eq!(HEIGHT, client.latest_height());
    assert!(!client.is_frozen());
    assert_eq!(Status::Active, client.status());
}

#[test]
fn test_validate() {
    let good = ClientState::new("testchain-0", 1);
    assert_eq!(Ok(()), ClientStateCommon::validate(&good));

    #[track_caller]
    fn check(want: &str, state: ClientState) {
        let err = state.validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{err:?}");
        assert_eq!(want, err.to_string());
    }

    check(
        "chain id cannot be blank",
        ClientState { chain_id: " \t".into(), ..good.clone() },
    );
    check(
        "height must be positive: 0",
        ClientState { height: 0, ..good.clone() },
    );

    // The first broken invariant is reported.
    check(
        "chain id cannot be blank",
        ClientState::new("", 0),
    );
    let state = ClientState { id: "bad/id".into(), ..ClientState::new("", 0) };
    match state.validate() {
        Err(Error::Validation(ValidationError::ClientId(err))) => {
            assert_eq!(IdKind::Client, err.kind);
        }
        res => panic!("unexpected result: {res:?}"),
    }
    let state = ClientState { id: "short".into(), ..good };
    assert!(matches!(
        state.validate(),
        Err(Error::Validation(ValidationError::ClientId(_)))
    ));
}

#[test]
fn test_with_height() {
    let client = ClientState::new("testchain-0", HEIGHT);
    assert_eq!(Ok(client.clone()), client.with_height(HEIGHT));

    let advanced = client.with_height(HEIGHT + 5).unwrap();
    assert_eq!(HEIGHT + 5, advanced.latest_height());
    assert_eq!(client.counterparty_chain_id(), advanced.counterparty_chain_id());

    assert_eq!(
        Err(ValidationError::HeightDecreased { current: HEIGHT, new: 3 }),
        client.with_height(3)
    );
}

// ==== Structured records =====================================================

#[test]
fn test_consensus_state() {
    let mut ctx = TestContext::new();
    let state = sample_consensus();

    assert_eq!(
        (VerificationKind::ClientConsensusState, Failure::NotFound),
        failure(ctx.consensus("localhost", &state))
    );

    ctx.set_record(Path::consensus_state("localhost").unwrap(), &state);
    assert_eq!(Ok(()), ctx.consensus("localhost", &state));

    // Path is built from the client’s own identifier; the counterparty
    // client id passed in the call doesn’t matter, even if malformed.
    assert_eq!(Ok(()), ctx.consensus("07-tendermint-0", &state));
    assert_eq!(Ok(()), ctx.consensus("bad/id", &state));

    // Changing any field results in a mismatch.
    let mut claims = [state.clone(), state.clone(), state.clone()];
    claims[0].timestamp_ns += 1;
    claims[1].root[0] ^= 1;
    claims[2].next_validators_hash.push(0);
    for claim in claims {
        let (kind, got) = failure(ctx.consensus("localhost", &claim));
        assert_eq!(VerificationKind::ClientConsensusState, kind);
        let want = Failure::Mismatch {
            claimed: format!("{claim:?}"),
            stored: format!("{state:?}"),
        };
        assert_eq!(want, got);
    }

    // Empty value is treated as absent.
    ctx.set(Path::consensus_state("localhost").unwrap(), "");
    assert_eq!(
        (VerificationKind::ClientConsensusState, Failure::NotFound),
        failure(ctx.consensus("localhost", &state))
    );
}

#[test]
fn test_connection_state() {
    let mut ctx = TestContext::new();
    let end = sample_connection();
    let path = Path::connection("connection-0").unwrap();

    assert_eq!(
        (VerificationKind::ConnectionState, Failure::NotFound),
        failure(ctx.connection("connection-0", &end))
    );

    ctx.set_record(path.clone(), &end);
    assert_eq!(Ok(()), ctx.connection("connection-0", &end));

    let claim = ConnectionEnd { state: connection::State::TryOpen, ..end.clone() };
    let (kind, got) = failure(ctx.connection("connection-0", &claim));
    assert_eq!(VerificationKind::ConnectionState, kind);
    assert!(matches!(got, Failure::Mismatch { .. }));

    // Empty value counts as present and fails to decode.
    ctx.set(path.clone(), "");
    assert_eq!(
        Err(Error::Decode(DecodeError::Truncated)),
        ctx.connection("connection-0", &end)
    );

    // A channel end where connection end is expected.
    ctx.set_record(path, &sample_channel());
    assert_eq!(
        Err(Error::Decode(DecodeError::WrongType {
            expected: ConnectionEnd::TYPE_NAME,
            found: ChannelEnd::TYPE_NAME,
        })),
        ctx.connection("connection-0", &end)
    );
}

#[test]
fn test_channel_state() {
    let mut ctx = TestContext::new();
    let end = sample_channel();

    assert_eq!(
        (VerificationKind::ChannelState, Failure::NotFound),
        failure(ctx.channel("transfer", "channel-0", &end))
    );

    ctx.set_record(Path::channel_end("transfer", "channel-0").unwrap(), &end);
    assert_eq!(Ok(()), ctx.channel("transfer", "channel-0", &end));
    assert_eq!(
        (VerificationKind::ChannelState, Failure::NotFound),
        failure(ctx.channel("transfer", "channel-1", &end))
    );

    let claim = ChannelEnd { version: "ics20-2".into(), ..end.clone() };
    let (kind, got) = failure(ctx.channel("transfer", "channel-0", &claim));
    assert_eq!(VerificationKind::ChannelState, kind);
    assert!(matches!(got, Failure::Mismatch { .. }));

    ctx.set(Path::channel_end("transfer", "channel-0").unwrap(), hex!("c2a973aa 07"));
    assert!(matches!(
        ctx.channel("transfer", "channel-0", &end),
        Err(Error::Decode(DecodeError::BadPayload { .. }))
    ));
}

// ==== Raw bytes ==============================================================

#[test]
fn test_packet_commitment() {
    let mut ctx = TestContext::new();
    let path = Path::commitment("transfer", "channel-0", 1).unwrap();

    assert_eq!(
        (VerificationKind::PacketCommitment, Failure::NotFound),
        failure(ctx.commitment(1, &hex!("0102")))
    );

    ctx.set(path.clone(), hex!("0102"));
    assert_eq!(Ok(()), ctx.commitment(1, &hex!("0102")));
    assert_eq!(
        (
            VerificationKind::PacketCommitment,
            Failure::Mismatch { claimed: "0201".into(), stored: "0102".into() }
        ),
        failure(ctx.commitment(1, &hex!("0201")))
    );
    assert_eq!(
        (VerificationKind::PacketCommitment, Failure::NotFound),
        failure(ctx.commitment(2, &hex!("0102")))
    );

    ctx.set(path, "");
    assert_eq!(
        (VerificationKind::PacketCommitment, Failure::NotFound),
        failure(ctx.commitment(1, &[]))
    );
}

#[test]
fn test_packet_acknowledgement() {
    let mut ctx = TestContext::new();
    let path = Path::ack("transfer", "channel-0", 5).unwrap();

    assert_eq!(
        (VerificationKind::PacketAcknowledgement, Failure::NotFound),
        failure(ctx.ack(5, b"ok"))
    );

    ctx.set(path, *b"ok");
    assert_eq!(Ok(()), ctx.ack(5, b"ok"));
    assert_eq!(
        (
            VerificationKind::PacketAcknowledgement,
            Failure::Mismatch { claimed: "4E4F".into(), stored: "6F6B".into() }
        ),
        failure(ctx.ack(5, b"NO"))
    );

    // Acknowledgements and commitments live under different paths.
    assert_eq!(
        (VerificationKind::PacketCommitment, Failure::NotFound),
        failure(ctx.commitment(5, b"ok"))
    );
}

#[test]
fn test_packet_acknowledgement_absence() {
    let mut ctx = TestContext::new();
    assert_eq!(Ok(()), ctx.ack_absence(3));

    // Commitment at the same sequence doesn’t count.
    ctx.set(Path::commitment("transfer", "channel-0", 3).unwrap(), "c");
    assert_eq!(Ok(()), ctx.ack_absence(3));

    ctx.set(Path::ack("transfer", "channel-0", 3).unwrap(), "");
    assert_eq!(
        (VerificationKind::PacketAckAbsence, Failure::UnexpectedPresence),
        failure(ctx.ack_absence(3))
    );
    assert_eq!(Ok(()), ctx.ack_absence(4));
}

#[test]
fn test_next_sequence_recv() {
    let mut ctx = TestContext::new();
    let path = Path::next_sequence_recv("transfer", "channel-0").unwrap();

    assert_eq!(
        (VerificationKind::NextSequenceRecv, Failure::NotFound),
        failure(ctx.next_seq(1))
    );

    ctx.set(path.clone(), 258u64.to_be_bytes());
    assert_eq!(Ok(()), ctx.next_seq(258));
    assert_eq!(
        (
            VerificationKind::NextSequenceRecv,
            Failure::Mismatch { claimed: "259".into(), stored: "258".into() }
        ),
        failure(ctx.next_seq(259))
    );

    // Trailing bytes are ignored.
    ctx.set(path.clone(), hex!("0000000000000102 ff"));
    assert_eq!(Ok(()), ctx.next_seq(258));

    ctx.set(path.clone(), hex!("00000000000001"));
    assert_eq!(
        (VerificationKind::NextSequenceRecv, Failure::Malformed { len: 7 }),
        failure(ctx.next_seq(1))
    );

    ctx.set(path, "");
    assert_eq!(
        (VerificationKind::NextSequenceRecv, Failure::NotFound),
        failure(ctx.next_seq(0))
    );
}

// ==== Identifiers and prefix =================================================

#[test]
fn test_invalid_identifiers() {
    let ctx = TestContext::new();

    #[track_caller]
    fn check(kind: IdKind, res: Result) {
        match res {
            Err(Error::InvalidIdentifier(err)) => assert_eq!(kind, err.kind),
            res => panic!("expected invalid identifier; got {res:?}"),
        }
    }

    let mut bad_client = TestContext::new();
    bad_client.client.id = "local/host".into();
    check(
        IdKind::Client,
        bad_client.consensus("localhost", &sample_consensus()),
    );
    check(
        IdKind::Connection,
        ctx.connection("connection-0/x", &sample_connection()),
    );
    check(IdKind::Port, ctx.channel("a/b", "channel-0", &sample_channel()));
    check(IdKind::Channel, ctx.channel("transfer", " ", &sample_channel()));
}

#[test]
fn test_prefix_is_applied() {
    let mut ctx = TestContext::new();
    ctx.prefix = prefix(b"other");
    ctx.set(Path::commitment("transfer", "channel-0", 1).unwrap(), "c");
    assert_eq!(Ok(()), ctx.commitment(1, b"c"));

    ctx.prefix = prefix(b"ibc");
    assert_eq!(
        (VerificationKind::PacketCommitment, Failure::NotFound),
        failure(ctx.commitment(1, b"c"))
    );

    ctx.prefix = CommitmentPrefix::default();
    let want = Err(Error::InvalidPrefix(EmptyPrefix));
    assert_eq!(want, ctx.commitment(1, b"c"));
    assert_eq!(want, ctx.ack_absence(1));
    assert_eq!(want, ctx.connection("connection-0", &sample_connection()));
}

#[test]
fn test_store_errors_propagate() {
    struct Broken;

    impl KvStore for Broken {
        fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError("disk on fire".into()))
        }
    }

    let ctx = TestContext::new();
    let want = Err(Error::Store(StoreError("disk on fire".into())));

    let res = ctx.client.verify_channel_state(
        &Broken,
        &ctx.registry,
        HEIGHT,
        &ctx.prefix,
        &ctx.proof,
        "transfer",
        "channel-0",
        &sample_channel(),
        None,
    );
    assert_eq!(want, res);

    let res = ctx.client.verify_packet_commitment(
        &Broken,
        HEIGHT,
        &ctx.prefix,
        &ctx.proof,
        "transfer",
        "channel-0",
        1,
        b"c",
        None,
    );
    assert_eq!(want, res);

    let res = ctx.client.verify_packet_acknowledgement_absence(
        &Broken,
        HEIGHT,
        &ctx.prefix,
        &ctx.proof,
        "transfer",
        "channel-0",
        1,
        None,
    );
    assert_eq!(want, res);
}

#[test]
fn test_error_messages() {
    let mut ctx = TestContext::new();
    ctx.set(
        Path::next_sequence_recv("transfer", "channel-0").unwrap(),
        7u64.to_be_bytes(),
    );
    insta::assert_snapshot!(
        ctx.next_seq(8).unwrap_err().to_string(),
        @"next sequence receive verification failed for path /ibc/nextSequenceRecv%2Fports%2Ftransfer%2Fchannels%2Fchannel-0: claimed 8 ≠ stored 7"
    );
    insta::assert_snapshot!(
        ctx.ack(1, b"x").unwrap_err().to_string(),
        @"packet acknowledgement verification failed for path /ibc/acks%2Fports%2Ftransfer%2Fchannels%2Fchannel-0%2Fsequences%2F1: not found"
    );

    ctx.set(Path::ack("transfer", "channel-0", 1).unwrap(), "x");
    insta::assert_snapshot!(
        ctx.ack_absence(1).unwrap_err().to_string(),
        @"packet acknowledgement absence verification failed for path /ibc/acks%2Fports%2Ftransfer%2Fchannels%2Fchannel-0%2Fsequences%2F1: expected no value but one is present"
    );
}
