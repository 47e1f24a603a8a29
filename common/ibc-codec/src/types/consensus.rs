use borsh::{BorshDeserialize, BorshSerialize};

/// Consensus state of a counterparty chain as recorded by a client.
#[derive(
    Clone, Debug, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize,
)]
pub struct ConsensusState {
    /// Block time in nanoseconds since Unix epoch.
    pub timestamp_ns: u64,

    /// Commitment root (the app hash) at the height of this state.
    pub root: Vec<u8>,

    pub next_validators_hash: Vec<u8>,
}

impl ConsensusState {
    pub const TYPE_NAME: &'static str = "ibc/client/tendermint/ConsensusState";
}
