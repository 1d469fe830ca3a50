//! Results delivered to the UI loop by background tasks.

use ftpm_client::api::{ConfigUpdateResponse, ServiceInfo};
use ftpm_client::{
    ApiError, DashboardStats, MessageResponse, QueryState, RecentUser, ServerConfig, User,
};

/// A background result for the [`App`](super::App).
///
/// Query variants carry the latest state of a polled resource; the rest
/// are completions of one-shot page requests.
#[derive(Debug)]
pub enum AppEvent {
    Stats(QueryState<DashboardStats>),
    RecentUsers(QueryState<Vec<RecentUser>>),
    Log(QueryState<String>),
    Service(Result<ServiceInfo, ApiError>),
    UsersLoaded(Result<Vec<User>, ApiError>),
    UserCreated(Result<MessageResponse, ApiError>),
    UserDeleted {
        username: String,
        result: Result<MessageResponse, ApiError>,
    },
    ConfigLoaded(Result<ServerConfig, ApiError>),
    ConfigSaved(Result<ConfigUpdateResponse, ApiError>),
}
