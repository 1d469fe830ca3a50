//! Executes [`Command`]s against the FTPM API.
//!
//! Work belonging to the visible page runs inside that page's
//! [`Lifecycle`]. Entering another page drops the old lifecycle: its polling
//! stops and one-shot requests still in flight never report back.

use std::future::Future;
use std::sync::Arc;

use ftpm_client::query::queries;
use ftpm_client::{
    spawn_scoped, ApiClient, ClientConfig, DashboardStats, Lifecycle, Query, QueryState,
    RecentUser,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::domain::{AppEvent, Command, Page};

/// Owns the API client, the polled queries and the current page scope.
pub struct Runtime {
    client: Arc<ApiClient>,
    stats: Arc<Query<DashboardStats>>,
    recent_users: Arc<Query<Vec<RecentUser>>>,
    log: Arc<Query<String>>,
    events: mpsc::UnboundedSender<AppEvent>,
    page_scope: Lifecycle,
}

impl Runtime {
    pub fn new(
        client: Arc<ApiClient>,
        config: &ClientConfig,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            stats: queries::dashboard_stats(Arc::clone(&client), config),
            recent_users: queries::recent_users(Arc::clone(&client), config),
            log: queries::vsftpd_log(Arc::clone(&client), config),
            client,
            events,
            page_scope: Lifecycle::new(),
        }
    }

    /// Identify the backend once at start-up. Not tied to any page.
    pub fn probe_service(&self) {
        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        tokio::spawn(async move {
            let _ = events.send(AppEvent::Service(client.root_info().await));
        });
    }

    pub fn execute(&mut self, command: Command) {
        debug!(command = command.label(), "Executing command");
        match command {
            Command::EnterPage(page) => self.enter_page(page),
            Command::Refresh(page) => self.refresh(page),
            Command::CreateUser(request) => {
                let client = Arc::clone(&self.client);
                self.spawn_request(
                    async move { client.create_user(&request).await },
                    AppEvent::UserCreated,
                );
            }
            Command::DeleteUser(username) => {
                let client = Arc::clone(&self.client);
                let name = username.clone();
                self.spawn_request(async move { client.delete_user(&name).await }, move |result| {
                    AppEvent::UserDeleted { username, result }
                });
            }
            Command::SaveConfig(config) => {
                let client = Arc::clone(&self.client);
                self.spawn_request(
                    async move { client.update_config(&config).await },
                    AppEvent::ConfigSaved,
                );
            }
        }
    }

    fn enter_page(&mut self, page: Page) {
        // Replacing the scope drops the old Lifecycle, which cancels it.
        self.page_scope = Lifecycle::new();
        info!(page = page.title(), "Entering page");

        match page {
            Page::Dashboard => {
                self.watch(&self.stats, AppEvent::Stats);
                self.watch(&self.recent_users, AppEvent::RecentUsers);
            }
            Page::Logs => self.watch(&self.log, AppEvent::Log),
            Page::Users => self.load_users(),
            Page::Config => self.load_config(),
            Page::NewUser => {}
        }
    }

    fn refresh(&self, page: Page) {
        match page {
            Page::Dashboard => {
                self.refresh_query(&self.stats);
                self.refresh_query(&self.recent_users);
            }
            Page::Logs => self.refresh_query(&self.log),
            Page::Users => self.load_users(),
            Page::Config => self.load_config(),
            Page::NewUser => {}
        }
    }

    fn load_users(&self) {
        let client = Arc::clone(&self.client);
        self.spawn_request(async move { client.get_users().await }, AppEvent::UsersLoaded);
    }

    fn load_config(&self) {
        let client = Arc::clone(&self.client);
        self.spawn_request(async move { client.get_config().await }, AppEvent::ConfigLoaded);
    }

    /// Run a one-shot request in the page scope and report its result.
    fn spawn_request<T, Fut, W>(&self, request: Fut, wrap: W)
    where
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        W: FnOnce(T) -> AppEvent + Send + 'static,
    {
        let events = self.events.clone();
        spawn_scoped(self.page_scope.token(), request, move |result| {
            let _ = events.send(wrap(result));
        });
    }

    /// Poll `query` while the page is visible and forward every state change.
    fn watch<T: Send + Sync + 'static>(
        &self,
        query: &Arc<Query<T>>,
        wrap: fn(QueryState<T>) -> AppEvent,
    ) {
        let mut token = self.page_scope.token();
        let mut states = query.subscribe();
        let events = self.events.clone();

        // Cached state first, so a revisited page is not blank while refetching.
        let current = states.borrow_and_update().clone();
        let _ = events.send(wrap(current));

        query.spawn_polling(token.clone());
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    changed = states.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let state = states.borrow_and_update().clone();
                        if events.send(wrap(state)).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Manual refresh. Joins the poll's fetch when one is in flight.
    fn refresh_query<T: Send + Sync + 'static>(&self, query: &Arc<Query<T>>) {
        let query = Arc::clone(query);
        spawn_scoped(
            self.page_scope.token(),
            async move { query.refresh().await },
            |_| {},
        );
    }
}
