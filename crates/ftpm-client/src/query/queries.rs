//! The named queries polled by the admin panel.
//!
//! | Key               | Endpoint                      | Interval | Retries |
//! |-------------------|-------------------------------|----------|---------|
//! | `dashboard-stats` | `/api/dashboard/stats`        | 30s      | 3       |
//! | `recent-users`    | `/api/dashboard/recent-users` | 60s      | 3       |
//! | `vsftpd-log`      | `/api/logs/vsftpd`            | 5s       | 0       |

use std::sync::Arc;

use super::{Query, QueryKey, QueryOptions, RetryPolicy};
use crate::api::{ApiClient, DashboardStats, RecentUser};
use crate::config::ClientConfig;

pub const DASHBOARD_STATS: QueryKey = QueryKey::new("dashboard-stats");
pub const RECENT_USERS: QueryKey = QueryKey::new("recent-users");
pub const VSFTPD_LOG: QueryKey = QueryKey::new("vsftpd-log");

fn retry_policy(config: &ClientConfig) -> RetryPolicy {
    RetryPolicy::fixed(config.retries, config.retry_delay)
}

/// Server statistics, refreshed every `stats_interval`.
pub fn dashboard_stats(client: Arc<ApiClient>, config: &ClientConfig) -> Arc<Query<DashboardStats>> {
    let options = QueryOptions {
        refetch_interval: config.stats_interval,
        retry: retry_policy(config),
    };
    Query::new(DASHBOARD_STATS, options, move || {
        let client = Arc::clone(&client);
        async move { client.get_dashboard_stats().await }
    })
}

/// Recent user activity, refreshed every `recent_users_interval`.
pub fn recent_users(client: Arc<ApiClient>, config: &ClientConfig) -> Arc<Query<Vec<RecentUser>>> {
    let options = QueryOptions {
        refetch_interval: config.recent_users_interval,
        retry: retry_policy(config),
    };
    Query::new(RECENT_USERS, options, move || {
        let client = Arc::clone(&client);
        async move { client.get_recent_users().await }
    })
}

/// vsftpd log tail. The next poll is only `log_interval` away, so failures
/// are not retried.
pub fn vsftpd_log(client: Arc<ApiClient>, config: &ClientConfig) -> Arc<Query<String>> {
    let options = QueryOptions {
        refetch_interval: config.log_interval,
        retry: RetryPolicy::NONE,
    };
    Query::new(VSFTPD_LOG, options, move || {
        let client = Arc::clone(&client);
        async move { client.get_vsftpd_log().await }
    })
}
