//! FTPM client: typed access to the FTP Manager API plus the polling layer
//! used by the admin panel.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   fetch fn    ┌──────────────┐  watch channel  ┌──────────┐
//! │  ApiClient   │ ◄──────────── │  Query<T>    │ ──────────────► │  pages   │
//! │ (HTTP, JSON) │               │ (poll/retry) │                 │  (TUI)   │
//! └──────────────┘               └──────────────┘                 └──────────┘
//!        ▲                              ▲
//!        │ one-shot fetch               │ stop on cancel
//!        └──────────── Lifecycle / CancellationToken
//! ```
//!
//! - [`api`]: the single gateway to the backend. Every HTTP call goes through
//!   [`ApiClient`]; errors are normalized into [`ApiError`].
//! - [`query`]: recurring fetches with a fixed retry count, exposing
//!   loading/error/success state through [`QueryState`].
//! - [`lifecycle`]: cancellation scoped to a page; completion handlers of
//!   cancelled work never run.

pub mod api;
pub mod config;
pub mod lifecycle;
pub mod query;
pub mod telemetry;

pub use api::{
    ApiClient, ApiError, CreateUserRequest, DashboardStats, MessageResponse, RecentUser,
    RequestOptions, ServerConfig, User,
};
pub use config::{ClientConfig, ConfigError};
pub use lifecycle::{spawn_scoped, CancellationToken, Lifecycle};
pub use query::{Query, QueryFailure, QueryKey, QueryOptions, QueryState, RetryPolicy, Snapshot};
