//! Bounded, order-preserving fan-out over model calls.

use std::future::Future;
use std::num::NonZeroUsize;

use futures::stream::{self, StreamExt};

/// Apply `f` to every item with at most `concurrency` futures in flight.
///
/// Results come back in input order regardless of completion order. With
/// `concurrency = 1` each call finishes before the next starts.
pub(crate) async fn map_ordered<T, F, Fut>(
    items: Vec<T>,
    concurrency: NonZeroUsize,
    f: F,
) -> Vec<Fut::Output>
where
    F: FnMut(T) -> Fut,
    Fut: Future,
{
    stream::iter(items)
        .map(f)
        .buffered(concurrency.get())
        .collect()
        .await
}
