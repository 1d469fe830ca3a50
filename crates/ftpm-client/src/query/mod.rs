//! Polling queries: recurring fetches against the API client with a fixed
//! retry count and loading/error/success state.

mod engine;
mod state;

pub mod queries;

pub use engine::{Query, QueryOptions, RetryPolicy};
pub use state::{QueryFailure, QueryKey, QueryState, Snapshot};
