//! The caller-supplied query function.
//!
//! The engine never knows how results are produced. It only awaits a
//! [`QueryFetcher`] and interprets the three possible outcomes:
//!
//! - `Ok(Some(items))`: a result set, possibly empty
//! - `Ok(None)`: the fetch resolved without data, treated as a failure
//! - `Err(error)`: the fetch failed

use std::future::Future;

use async_trait::async_trait;
use quicksearch_types::QueryError;

/// Asynchronous source of results for a query string.
#[async_trait]
pub trait QueryFetcher<T>: Send + Sync {
    async fn fetch(&self, query: &str) -> anyhow::Result<Option<Vec<T>>>;
}

/// Adapter turning an async closure into a [`QueryFetcher`].
pub struct FnFetcher<F> {
    fetch: F,
}

/// Wrap `fetch` so it can be used as a widget's query function.
///
/// ```ignore
/// let fetcher = fetcher_fn(|query: String| async move {
///     Ok::<_, anyhow::Error>(Some(vec![format!("{query}!")]))
/// });
/// ```
pub fn fetcher_fn<F>(fetch: F) -> FnFetcher<F> {
    FnFetcher { fetch }
}

#[async_trait]
impl<T, F, Fut> QueryFetcher<T> for FnFetcher<F>
where
    T: Send + 'static,
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Option<Vec<T>>>> + Send + 'static,
{
    async fn fetch(&self, query: &str) -> anyhow::Result<Option<Vec<T>>> {
        (self.fetch)(query.to_string()).await
    }
}

/// Collapse a raw fetch result into the outcome recorded by the state machine.
pub fn settle<T>(result: anyhow::Result<Option<Vec<T>>>) -> Result<Vec<T>, QueryError> {
    match result {
        Ok(Some(items)) => Ok(items),
        Ok(None) => Err(QueryError::EmptyResult),
        Err(error) => Err(QueryError::fetch_failure(format!("{error:#}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn settle_maps_all_three_outcomes() {
        assert_eq!(settle(Ok(Some(vec![1, 2]))), Ok(vec![1, 2]));
        assert_eq!(settle::<u8>(Ok(Some(vec![]))), Ok(vec![]));
        assert_eq!(settle::<u8>(Ok(None)), Err(QueryError::EmptyResult));
        assert_eq!(
            settle::<u8>(Err(anyhow!("connection reset"))),
            Err(QueryError::fetch_failure("connection reset"))
        );
    }

    #[tokio::test]
    async fn closure_fetcher_receives_the_query() {
        let fetcher = fetcher_fn(|query: String| async move { Ok::<_, anyhow::Error>(Some(vec![query.len()])) });
        let items = QueryFetcher::<usize>::fetch(&fetcher, "abc").await.expect("fetch succeeds");
        assert_eq!(items, Some(vec![3]));
    }
}
