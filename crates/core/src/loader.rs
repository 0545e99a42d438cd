//! Request-scoped batch loading.
//!
//! A [`BatchLoader`] collapses many single-key lookups made while handling
//! one request into a single downstream query. Keys registered before the
//! current task next yields form one batch:
//!
//! 1. `load` records the key and a result slot, then yields once.
//! 2. The first caller to resume takes every pending key and calls
//!    [`BatchFn::load`] with the distinct keys, in first-seen order.
//! 3. Rows are indexed by key and each caller receives the entry for its own
//!    key, or `None` when the store had no row.
//!
//! A downstream failure is delivered to every caller in the batch.
//!
//! The window is a single yield, not a request phase. Callers that only
//! reach `load` after awaiting something else (another query, an extra
//! yield) miss the pending batch and start a later one. A GraphQL document
//! with two root fields that each return a list of orders can therefore
//! produce two shipping queries, split wherever each field's rows became
//! ready rather than one query per field, and a key requested by both may
//! appear in both. Every caller still receives the row for its own key.
//!
//! Loaders hold per-request state and must be created per request. Sharing
//! one across requests would merge unrelated keys into the same query.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::sync::oneshot;

/// The downstream query behind a [`BatchLoader`].
pub trait BatchFn: Send + Sync {
    type Key: Eq + Hash + Clone + Send + Sync;
    type Value: Clone + Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch rows for a set of distinct keys.
    ///
    /// Rows may come back in any order. Keys with no row are simply absent.
    /// If several rows share a key only one of them reaches callers, and which
    /// one is not specified.
    fn load(
        &self,
        keys: &[Self::Key],
    ) -> impl Future<Output = Result<Vec<(Self::Key, Self::Value)>, Self::Error>> + Send;
}

/// Failure delivered to a caller of [`BatchLoader::load`].
#[derive(Debug, Error)]
pub enum LoadError<E: std::error::Error + 'static> {
    /// The batch query failed. Every caller in the batch sees the same error.
    #[error("batch load failed: {0}")]
    Batch(#[source] Arc<E>),

    /// The task driving the batch was dropped before it finished.
    #[error("batch load was cancelled")]
    Cancelled,
}

type Slot<F> = oneshot::Sender<
    Result<Option<<F as BatchFn>::Value>, LoadError<<F as BatchFn>::Error>>,
>;

/// Keys waiting for the next flush, with one result slot per request.
struct Pending<F: BatchFn> {
    keys: Vec<F::Key>,
    slots: Vec<Slot<F>>,
}

impl<F: BatchFn> Default for Pending<F> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            slots: Vec::new(),
        }
    }
}

/// Deduplicating, order-preserving batch loader.
pub struct BatchLoader<F: BatchFn> {
    batch_fn: F,
    pending: Mutex<Pending<F>>,
}

impl<F: BatchFn> BatchLoader<F> {
    /// Create an empty loader around a batch function.
    pub fn new(batch_fn: F) -> Self {
        Self {
            batch_fn,
            pending: Mutex::new(Pending::default()),
        }
    }

    /// Load a single key.
    ///
    /// Returns `Ok(None)` when the store has no row for the key.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Batch` if the batch this key joined failed.
    pub async fn load(&self, key: F::Key) -> Result<Option<F::Value>, LoadError<F::Error>> {
        let (tx, rx) = oneshot::channel();
        self.enqueue([(key, tx)]);

        tokio::task::yield_now().await;
        self.flush().await;

        rx.await.unwrap_or(Err(LoadError::Cancelled))
    }

    /// Load several keys through the same batch window.
    ///
    /// The result has one entry per input key, in input order, duplicates
    /// included. An empty input resolves immediately without a query.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Batch` if the batch failed.
    pub async fn load_many(
        &self,
        keys: &[F::Key],
    ) -> Result<Vec<Option<F::Value>>, LoadError<F::Error>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut receivers = Vec::with_capacity(keys.len());
        self.enqueue(keys.iter().cloned().map(|key| {
            let (tx, rx) = oneshot::channel();
            receivers.push(rx);
            (key, tx)
        }));

        tokio::task::yield_now().await;
        self.flush().await;

        let mut values = Vec::with_capacity(receivers.len());
        for rx in receivers {
            values.push(rx.await.unwrap_or(Err(LoadError::Cancelled))?);
        }
        Ok(values)
    }

    /// Number of keys waiting for the next flush.
    pub fn pending_len(&self) -> usize {
        self.lock_pending().keys.len()
    }

    fn enqueue(&self, entries: impl IntoIterator<Item = (F::Key, Slot<F>)>) {
        let mut pending = self.lock_pending();
        for (key, slot) in entries {
            pending.keys.push(key);
            pending.slots.push(slot);
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Pending<F>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the pending batch, if any, and resolve every slot in it.
    async fn flush(&self) {
        let Pending { keys, slots } = std::mem::take(&mut *self.lock_pending());
        if keys.is_empty() {
            return;
        }

        let distinct = distinct_keys(&keys);
        metrics::counter!("ordergraph_loader_batches_total").increment(1);
        #[allow(clippy::cast_precision_loss)] // Batch sizes are far below f64 precision
        metrics::histogram!("ordergraph_loader_batch_keys").record(distinct.len() as f64);
        tracing::debug!(
            requested = keys.len(),
            distinct = distinct.len(),
            "dispatching batch load"
        );

        match self.batch_fn.load(&distinct).await {
            Ok(rows) => {
                let found: HashMap<F::Key, F::Value> = rows.into_iter().collect();
                for (slot, value) in slots.into_iter().zip(align(&keys, &found)) {
                    // A dropped receiver means that caller went away.
                    let _ = slot.send(Ok(value));
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, keys = distinct.len(), "batch load failed");
                let err = Arc::new(err);
                for slot in slots {
                    let _ = slot.send(Err(LoadError::Batch(Arc::clone(&err))));
                }
            }
        }
    }
}

/// Distinct keys in first-seen order.
fn distinct_keys<K: Eq + Hash + Clone>(keys: &[K]) -> Vec<K> {
    let mut seen = HashSet::with_capacity(keys.len());
    keys.iter()
        .filter(|key| seen.insert(*key))
        .cloned()
        .collect()
}

/// One entry per requested key, in request order.
fn align<K: Eq + Hash, V: Clone>(keys: &[K], found: &HashMap<K, V>) -> Vec<Option<V>> {
    keys.iter().map(|key| found.get(key).cloned()).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::future::join_all;

    use super::*;

    #[derive(Debug, Error, PartialEq, Eq)]
    #[error("store unavailable")]
    struct StoreDown;

    /// Fake store: values are `key * 10` for even keys, odd keys have no row.
    #[derive(Default)]
    struct Recording {
        calls: AtomicUsize,
        batches: Mutex<Vec<Vec<u32>>>,
        fail: bool,
    }

    impl BatchFn for Arc<Recording> {
        type Key = u32;
        type Value = u32;
        type Error = StoreDown;

        async fn load(&self, keys: &[u32]) -> Result<Vec<(u32, u32)>, StoreDown> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.batches.lock().unwrap().push(keys.to_vec());
            if self.fail {
                return Err(StoreDown);
            }
            // Reverse to prove callers do not depend on store order.
            Ok(keys
                .iter()
                .rev()
                .filter(|k| *k % 2 == 0)
                .map(|k| (*k, k * 10))
                .collect())
        }
    }

    fn loader(fail: bool) -> (BatchLoader<Arc<Recording>>, Arc<Recording>) {
        let store = Arc::new(Recording {
            fail,
            ..Recording::default()
        });
        (BatchLoader::new(Arc::clone(&store)), store)
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_query() {
        let (loader, store) = loader(false);

        let keys = [4, 2, 7, 8];
        let results = join_all(keys.iter().map(|k| loader.load(*k))).await;

        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        let values: Vec<Option<u32>> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(values, vec![Some(40), Some(20), None, Some(80)]);
    }

    #[tokio::test]
    async fn test_duplicate_keys_are_queried_once_but_answered_each_time() {
        let (loader, store) = loader(false);

        let keys = [2, 2, 3, 2, 6, 3];
        let values = loader.load_many(&keys).await.unwrap();

        assert_eq!(values.len(), keys.len());
        assert_eq!(
            values,
            vec![Some(20), Some(20), None, Some(20), Some(60), None]
        );
        let batches = store.batches.lock().unwrap();
        assert_eq!(batches.as_slice(), &[vec![2, 3, 6]]);
    }

    #[tokio::test]
    async fn test_load_and_load_many_join_the_same_window() {
        let (loader, store) = loader(false);

        let (single, many) = tokio::join!(loader.load(10), loader.load_many(&[12, 10]));

        assert_eq!(single.unwrap(), Some(100));
        assert_eq!(many.unwrap(), vec![Some(120), Some(100)]);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.batches.lock().unwrap()[0], vec![10, 12]);
    }

    #[tokio::test]
    async fn test_sequential_loads_use_separate_batches() {
        let (loader, store) = loader(false);

        assert_eq!(loader.load(2).await.unwrap(), Some(20));
        assert_eq!(loader.load(4).await.unwrap(), Some(40));

        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
        assert_eq!(loader.pending_len(), 0);
    }

    #[tokio::test]
    async fn test_keys_registered_after_a_yield_form_a_later_batch() {
        let (loader, store) = loader(false);

        let early = join_all([2, 4].map(|k| loader.load(k)));
        let late = async {
            tokio::task::yield_now().await;
            join_all([4, 6].map(|k| loader.load(k))).await
        };
        let (early, late) = futures::future::join(early, late).await;

        let early: Vec<_> = early.into_iter().map(Result::unwrap).collect();
        let late: Vec<_> = late.into_iter().map(Result::unwrap).collect();
        assert_eq!(early, vec![Some(20), Some(40)]);
        assert_eq!(late, vec![Some(40), Some(60)]);
        assert_eq!(
            store.batches.lock().unwrap().as_slice(),
            &[vec![2, 4], vec![4, 6]]
        );
    }

    #[tokio::test]
    async fn test_empty_batch_issues_no_query() {
        let (loader, store) = loader(false);

        let values = loader.load_many(&[]).await.unwrap();

        assert!(values.is_empty());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_key_resolves_to_none() {
        let (loader, _) = loader(false);
        assert_eq!(loader.load(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failure_reaches_every_caller() {
        let (loader, store) = loader(true);

        let results = join_all([1, 2, 2].map(|k| loader.load(k))).await;

        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        for result in results {
            let err = result.unwrap_err();
            assert!(matches!(&err, LoadError::Batch(e) if **e == StoreDown));
            assert_eq!(err.to_string(), "batch load failed: store unavailable");
        }
    }

    #[test]
    fn test_distinct_keys_keep_first_seen_order() {
        assert_eq!(distinct_keys(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn test_align_matches_request_order() {
        let found = HashMap::from([(1, "a"), (3, "c")]);
        assert_eq!(
            align(&[3, 2, 1, 3], &found),
            vec![Some("c"), None, Some("a"), Some("c")]
        );
    }
}
