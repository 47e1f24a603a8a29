//! Records stored by the IBC module which verifiers compare structurally.

pub mod channel;
pub mod connection;
mod consensus;

pub use channel::ChannelEnd;
pub use connection::ConnectionEnd;
pub use consensus::ConsensusState;
