use borsh::{BorshDeserialize, BorshSerialize};

/// State of a channel end.
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
    #[strum(serialize = "STATE_CLOSED")]
    Closed,
}

/// Packet ordering guarantee of a channel.
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
)]
pub enum Order {
    #[default]
    #[strum(serialize = "ORDER_NONE_UNSPECIFIED")]
    None,
    #[strum(serialize = "ORDER_UNORDERED")]
    Unordered,
    #[strum(serialize = "ORDER_ORDERED")]
    Ordered,
}

/// The other end of a channel.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize,
)]
pub struct Counterparty {
    pub port_id: String,
    pub channel_id: String,
}

/// A channel end as stored under `ports/{port_id}/channels/{channel_id}`.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize,
)]
pub struct ChannelEnd {
    pub state: State,
    pub ordering: Order,
    pub counterparty: Counterparty,
    /// Connections the channel’s packets travel over, in order.
    pub connection_hops: Vec<String>,
    pub version: String,
}

impl ChannelEnd {
    pub const TYPE_NAME: &'static str = "ibc/channel/ChannelEnd";
}

#[test]
fn test_encoding() {
    use crate::Codec;

    let mut builder = crate::Registry::builder();
    crate::register_types(&mut builder).unwrap();
    let registry = builder.seal();

    let channel = ChannelEnd {
        state: State::Open,
        ordering: Order::Unordered,
        counterparty: Counterparty {
            port_id: "transfer".into(),
            channel_id: "channel-1".into(),
        },
        connection_hops: vec!["connection-0".into()],
        version: "ics20-1".into(),
    };
    let bytes = registry.encode(&channel).unwrap();
    insta::assert_debug_snapshot!(bytes, @r###"
    [
        194,
        169,
        115,
        170,
        3,
        1,
        8,
        0,
        0,
        0,
        116,
        114,
        97,
        110,
        115,
        102,
        101,
        114,
        9,
        0,
        0,
        0,
        99,
        104,
        97,
        110,
        110,
        101,
        108,
        45,
        49,
        1,
        0,
        0,
        0,
        12,
        0,
        0,
        0,
        99,
        111,
        110,
        110,
        101,
        99,
        116,
        105,
        111,
        110,
        45,
        48,
        7,
        0,
        0,
        0,
        105,
        99,
        115,
        50,
        48,
        45,
        49,
    ]
    "###);
    assert_eq!(Ok(channel), registry.decode::<ChannelEnd>(&bytes));
}
