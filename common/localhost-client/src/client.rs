use borsh::{BorshDeserialize, BorshSerialize};
use ibc_client::{Error, ValidationError};

pub(crate) mod impls;
#[cfg(test)]
mod tests;

/// Client state of the loop-back client, i.e. a client of the host chain
/// running on the host chain itself.
///
/// Rather than checking proofs the client reads commitments directly from the
/// host’s store.  The state is a plain value: the store is handed to each
/// verification call (see [`ibc_client::ClientStateCommon`]).
#[derive(
    Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize,
)]
pub struct ClientState {
    /// Client identifier; always [`crate::CLIENT_ID`] for states constructed
    /// with [`Self::new`].
    pub(crate) id: String,

    /// Identifier of the host chain.
    pub(crate) chain_id: String,

    /// Latest observed height of the host chain.
    pub(crate) height: u64,
}

impl ClientState {
    /// Name under which the client state is registered with the codec.
    pub const TYPE_NAME: &'static str = "ibc/client/localhost/ClientState";

    /// Constructs a new client state for given chain at given height.
    ///
    /// The state isn’t validated; call [`Self::validate`] before using it
    /// for verification.
    pub fn new(chain_id: impl Into<String>, height: u64) -> Self {
        Self {
            id: crate::CLIENT_ID.into(),
            chain_id: chain_id.into(),
            height,
        }
    }

    /// Returns copy of the state advanced to `height`.
    ///
    /// Height never goes backwards.  Staying at the same height is allowed
    /// and results in an identical state.
    pub fn with_height(&self, height: u64) -> Result<Self, ValidationError> {
        if height < self.height {
            return Err(ValidationError::HeightDecreased {
                current: self.height,
                new: height,
            });
        }
        Ok(Self { height, ..self.clone() })
    }

    /// Checks invariants of the state in order: identifier format, non-blank
    /// chain id and positive height.
    pub fn validate(&self) -> Result<(), Error> {
        ibc_paths::client_id(&self.id).map_err(ValidationError::ClientId)?;
        if self.chain_id.trim().is_empty() {
            return Err(ValidationError::BlankChainId.into());
        }
        if self.height == 0 {
            return Err(ValidationError::NonPositiveHeight(self.height).into());
        }
        Ok(())
    }
}
