use borsh::{BorshDeserialize, BorshSerialize};

/// State of a connection end.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum State {
    #[default]
    #[strum(serialize = "STATE_UNINITIALIZED_UNSPECIFIED")]
    Uninitialized,
    #[strum(serialize = "STATE_INIT")]
    Init,
    #[strum(serialize = "STATE_TRYOPEN")]
    TryOpen,
    #[strum(serialize = "STATE_OPEN")]
    Open,
}

/// The other end of a connection.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize,
)]
pub struct Counterparty {
    pub client_id: String,
    pub connection_id: String,
    /// Commitment prefix of the counterparty chain.
    pub prefix: Vec<u8>,
}

/// A connection end as stored under `connections/{connection_id}`.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize,
)]
pub struct ConnectionEnd {
    pub state: State,
    /// Client associated with this end of the connection.
    pub client_id: String,
    pub counterparty: Counterparty,
    /// Versions compatible with this connection, most preferred first.
    pub versions: Vec<String>,
}

impl ConnectionEnd {
    pub const TYPE_NAME: &'static str = "ibc/connection/ConnectionEnd";
}

#[test]
fn test_state_display() {
    assert_eq!("STATE_TRYOPEN", State::TryOpen.to_string());
    assert_eq!("STATE_OPEN", <&'static str>::from(State::Open));
}
