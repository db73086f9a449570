//! Bounded-concurrency execution of async operations.
use futures::future::join_all;
use std::future::Future;
use tokio::sync::Semaphore;

/// Runs `f` over every item with at most `max_concurrency` operations in
/// flight, admitting them in input order. Results come back in input order
/// regardless of completion order.
///
/// The cap only applies when there are at least `max_concurrency` items;
/// shorter inputs all run at once. A cap of zero behaves like one.
pub async fn run_parallel<T, R, F, Fut>(
    max_concurrency: usize,
    source: Vec<T>,
    f: F,
) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let limit = max_concurrency.max(1);

    if source.len() < limit {
        return join_all(source.into_iter().map(f)).await;
    }

    let semaphore = Semaphore::new(limit);
    let semaphore = &semaphore;
    let f = &f;

    let operations = source.into_iter().map(move |item| async move {
        // never closed
        let _permit = semaphore.acquire().await.ok();
        f(item).await
    });

    join_all(operations).await
}
