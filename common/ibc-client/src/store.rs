use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Read access to the host’s key-value commitment store.
///
/// Clients never write through this interface.  The store is passed to each
/// operation explicitly rather than held by the client, so a client state
/// value carries no reference to any store.
pub trait KvStore {
    /// Returns value held under `key` or `None` if there’s none.
    ///
    /// Note that implementations may store empty values.  Whether an empty
    /// value counts as present is decided by the caller.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }
}

impl<S: KvStore + ?Sized> KvStore for Rc<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }
}

/// Store failed to service a read.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
#[display(fmt = "store read failed: {}", _0)]
pub struct StoreError(pub String);

/// Simple in-memory store.
///
/// Used by tests and by hosts which keep their IBC state in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore(BTreeMap<Vec<u8>, Vec<u8>>);

impl MemoryStore {
    /// Sets value under `key` returning the previous one.
    pub fn set(
        &mut self,
        key: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Option<Vec<u8>> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.0.get(key).cloned())
    }
}

impl<K: Into<Vec<u8>>, V: Into<Vec<u8>>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ==== Tests ==================================================================

#[test]
fn test_memory_store() {
    let mut store = MemoryStore::default();
    assert!(store.is_empty());
    assert_eq!(Ok(None), store.get(b"foo"));

    assert_eq!(None, store.set("foo", "bar"));
    assert_eq!(None, store.set("empty", ""));
    assert_eq!(Some(b"bar".to_vec()), store.set("foo", "baz"));
    assert_eq!(Ok(Some(b"baz".to_vec())), store.get(b"foo"));
    assert_eq!(Ok(Some(Vec::new())), store.get(b"empty"));
    assert_eq!(2, store.len());

    assert_eq!(Some(b"baz".to_vec()), store.remove(b"foo"));
    assert_eq!(Ok(None), store.get(b"foo"));
}

#[test]
fn test_indirection() {
    fn get(store: impl KvStore) -> Option<Vec<u8>> { store.get(b"k").unwrap() }

    let store = [("k", "v")].into_iter().collect::<MemoryStore>();
    let want = Some(b"v".to_vec());
    assert_eq!(want, get(&store));
    assert_eq!(want, get(Rc::new(store.clone())));
    assert_eq!(want, get(Arc::new(store.clone())));
    assert_eq!(want, get(Box::new(store) as Box<dyn KvStore>));
}
