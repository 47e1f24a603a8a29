use ibc_client::{CommitmentPrefix, KvStore, Result};
use ibc_paths::{Path, PrefixedPath};

/// View of the host store restricted to commitments of a single
/// counterparty, i.e. to keys under its commitment prefix.
///
/// Lookups never fail on absence.  A missing value is `None` and an empty
/// one is `Some(vec![])` so callers can tell the two apart.
pub struct CommitmentStore<'a, S: ?Sized> {
    store: &'a S,
    prefix: &'a CommitmentPrefix,
}

impl<'a, S: KvStore + ?Sized> CommitmentStore<'a, S> {
    pub fn new(store: &'a S, prefix: &'a CommitmentPrefix) -> Self {
        Self { store, prefix }
    }

    /// Reads raw bytes held at `path`.
    ///
    /// Returns the prefixed path together with the value so that callers can
    /// report where they looked.  Fails if the prefix is empty or the store
    /// can’t be read.
    pub fn get(&self, path: Path) -> Result<(PrefixedPath, Option<Vec<u8>>)> {
        let path = PrefixedPath::new(self.prefix, path)?;
        let value = self.store.get(&path.to_key())?;
        log::trace!(
            "commitment lookup {path}: {}",
            match &value {
                None => "absent",
                Some(value) if value.is_empty() => "empty",
                Some(_) => "present",
            }
        );
        Ok((path, value))
    }
}

// ==== Tests ==================================================================
