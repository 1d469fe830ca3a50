//! Observable query state.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Identifier used to de-duplicate and order fetches of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey(&'static str);

impl QueryKey {
    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Latest successful response.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub data: Arc<T>,
    pub fetched_at: DateTime<Utc>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            fetched_at: self.fetched_at,
        }
    }
}

/// Terminal failure after retries were exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    /// Error message as shown to the user.
    pub message: String,
    /// HTTP status, when the backend answered.
    pub status: Option<u16>,
    /// Attempts made in the failed cycle.
    pub failure_count: u32,
    pub failed_at: DateTime<Utc>,
}

/// What consumers of a query observe.
#[derive(Debug)]
pub enum QueryState<T> {
    /// No response yet.
    Loading,
    /// Last cycle failed on every attempt.
    Error(QueryFailure),
    /// Last cycle succeeded.
    Success(Snapshot<T>),
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        QueryState::Loading
    }
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            QueryState::Loading => QueryState::Loading,
            QueryState::Error(failure) => QueryState::Error(failure.clone()),
            QueryState::Success(snapshot) => QueryState::Success(snapshot.clone()),
        }
    }
}

impl<T> QueryState<T> {
    /// Wrap a value as a fresh success (demo data, tests).
    pub fn success(data: T) -> Self {
        QueryState::Success(Snapshot {
            data: Arc::new(data),
            fetched_at: Utc::now(),
        })
    }

    /// Build a failure state from a message.
    pub fn failed(message: impl Into<String>, failure_count: u32) -> Self {
        QueryState::Error(QueryFailure {
            message: message.into(),
            status: None,
            failure_count,
            failed_at: Utc::now(),
        })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(snapshot) => Some(&snapshot.data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&QueryFailure> {
        match self {
            QueryState::Error(failure) => Some(failure),
            _ => None,
        }
    }

    /// Time of the last state change caused by a response.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        match self {
            QueryState::Loading => None,
            QueryState::Error(failure) => Some(failure.failed_at),
            QueryState::Success(snapshot) => Some(snapshot.fetched_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let loading: QueryState<u32> = QueryState::default();
        assert!(loading.is_loading());
        assert!(loading.data().is_none());
        assert!(loading.updated_at().is_none());

        let ok = QueryState::success(7u32);
        assert_eq!(ok.data(), Some(&7));
        assert!(ok.error().is_none());

        let failed: QueryState<u32> = QueryState::failed("HTTP 500", 4);
        assert_eq!(failed.error().map(|f| f.failure_count), Some(4));
        assert!(failed.data().is_none());
    }

    #[test]
    fn test_clone_shares_data() {
        let ok = QueryState::success(vec![1, 2, 3]);
        let copy = ok.clone();
        match (&ok, &copy) {
            (QueryState::Success(a), QueryState::Success(b)) => {
                assert!(Arc::ptr_eq(&a.data, &b.data));
            }
            _ => panic!("expected success"),
        }
    }
}
