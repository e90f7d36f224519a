//! Reactive data layer over [`QueryCache`]
//!
//! `QueryClient` owns the REST client and the cache. Pages read through
//! [`use_query`], which fetches once per cache generation: invalidating a key
//! makes every mounted query on that key refetch.

use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;

use crate::core::api::{ApiError, BrowserClient, FetchTransport};
use crate::core::query_cache::QueryCache;

#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: RwSignal<QueryCache>,
    api: StoredValue<BrowserClient>,
}

impl QueryClient {
    pub fn new(api: BrowserClient) -> Self {
        Self {
            cache: RwSignal::new(QueryCache::new()),
            api: StoredValue::new(api),
        }
    }

    /// REST client for one-off calls (mutations)
    pub fn api(&self) -> BrowserClient {
        self.api.get_value()
    }

    /// Tracked read of a cached value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.cache.with(|c| c.get(key))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        self.cache.update(|c| {
            c.set(key, value);
        });
    }

    pub fn invalidate(&self, key: &str) {
        self.cache.update(|c| {
            c.invalidate(key);
        });
    }

    pub fn clear(&self) {
        self.cache.update(QueryCache::clear);
    }
}

/// Provide the query client to the component tree
pub fn provide_query_client() -> QueryClient {
    let client = QueryClient::new(BrowserClient::new(FetchTransport::default()));
    provide_context(client);
    client
}

pub fn use_query_client() -> QueryClient {
    expect_context::<QueryClient>()
}

/// Reactive view of one cache key
pub struct Query<T: Send + Sync + 'static> {
    /// Last cached value, kept while a refetch is pending
    pub data: Memo<Option<T>>,
    /// Cached value only while it is fresh
    pub fresh: Memo<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
}

impl<T: Send + Sync + 'static> Clone for Query<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Query<T> {}

/// Subscribe to `key`, fetching with `fetch` whenever the cached value is
/// missing or has been invalidated
pub fn use_query<T, F, Fut>(key: &'static str, fetch: F) -> Query<T>
where
    T: Serialize + DeserializeOwned + PartialEq + Send + Sync + 'static,
    F: Fn(BrowserClient) -> Fut + Copy + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let queries = use_query_client();
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<ApiError>);

    let generation = Memo::new(move |_| queries.cache.with(|c| c.generation(key)));
    // Subscribers rerun only when the decoded value for this key changes
    let data = Memo::new(move |_| queries.cache.with(|c| c.get::<T>(key)));
    let fresh = Memo::new(move |_| queries.cache.with(|c| c.get_fresh::<T>(key)));

    // Effects only run in the browser
    Effect::new(move |_| {
        let issued_at = generation.get();
        if queries.cache.with_untracked(|c| c.is_fresh(key)) {
            return;
        }
        let api = queries.api();
        loading.set(true);
        error.set(None);
        leptos::task::spawn_local(async move {
            match fetch(api).await {
                Ok(value) => queries.cache.update(|c| {
                    if !c.store(key, issued_at, &value) {
                        leptos::logging::log!("dropped stale response for {}", key);
                    }
                }),
                Err(e) => {
                    leptos::logging::warn!("query {} failed: {}", key, e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    });

    Query {
        data,
        fresh,
        loading,
        error,
    }
}
