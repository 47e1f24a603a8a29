//! Canonical IBC store paths used by the loop-back client.
//!
//! The crate maps a commitment kind and its identifying keys onto the
//! protocol-wide path templates (see [`Path`]) and then onto store keys under
//! a counterparty’s commitment prefix (see [`PrefixedPath`]).
//! Identifiers are validated before any path is built.

mod ids;
mod path;
mod prefix;

mod ibc {
    pub(crate) use ibc_core_host_types::identifiers::{
        ChannelId, ClientId, ConnectionId, PortId,
    };
    pub(crate) use ibc_core_commitment_types::commitment::CommitmentPrefix;
    pub(crate) use ibc_core_host_types::path;
}

pub use ibc_core_host_types::identifiers::{
    ChannelId, ClientId, ConnectionId, PortId,
};
pub use ids::{
    channel_id, client_id, connection_id, port_id, BadIdentifier, IdKind,
    Reason,
};
pub use path::{BadPath, Path};
pub use prefix::{EmptyPrefix, PrefixedPath, DEFAULT_PREFIX};
