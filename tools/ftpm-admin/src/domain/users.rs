//! Users page model: loaded list, search filter and counters.

use ftpm_client::{ApiError, MessageResponse, User};

use super::Notice;

/// Per-status user counts shown above the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounters {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub suspended: usize,
}

/// State of the users page.
#[derive(Debug, Default)]
pub struct UsersPage {
    /// Every user returned by the last load.
    pub users: Vec<User>,
    pub loading: bool,
    /// Load failure, shown in place of the table.
    pub error: Option<String>,
    /// Case-insensitive filter on username or email.
    pub search: String,
    /// Row index into the filtered list.
    pub selected: usize,
    /// Username awaiting delete confirmation.
    pub pending_delete: Option<String>,
    pub notice: Option<Notice>,
}

impl UsersPage {
    /// Mark a load as started.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: Result<Vec<User>, ApiError>) {
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                self.error = None;
            }
            Err(err) => {
                self.users.clear();
                self.error = Some(format!("Failed to load users: {}", err));
            }
        }
        self.clamp_selection();
    }

    /// Record the outcome of a delete. Returns `true` if the list should
    /// be reloaded.
    pub fn finish_delete(
        &mut self,
        username: &str,
        result: Result<MessageResponse, ApiError>,
    ) -> bool {
        match result {
            Ok(response) => {
                self.notice = Some(Notice::Success(response.message));
                true
            }
            Err(err) => {
                self.notice = Some(Notice::Error(format!(
                    "Failed to delete {}: {}",
                    username, err
                )));
                false
            }
        }
    }

    /// Users matching the search text, in load order.
    pub fn filtered(&self) -> Vec<&User> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.users.iter().collect();
        }
        self.users
            .iter()
            .filter(|user| {
                user.username.to_lowercase().contains(&needle)
                    || user
                        .email
                        .as_deref()
                        .is_some_and(|email| email.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Counters over the whole list, independent of the search filter.
    ///
    /// Users without a status only count towards the total.
    pub fn counters(&self) -> UserCounters {
        self.users.iter().fold(
            UserCounters {
                total: self.users.len(),
                ..UserCounters::default()
            },
            |mut counters, user| {
                match user.status.as_deref() {
                    Some("active") => counters.active += 1,
                    Some("inactive") => counters.inactive += 1,
                    Some("suspended") => counters.suspended += 1,
                    _ => {}
                }
                counters
            },
        )
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.filtered().get(self.selected).copied()
    }

    pub fn select_prev(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.selected = 0;
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.selected = 0;
    }

    /// Ask for confirmation before deleting the selected user.
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_user().map(|user| user.username.clone());
    }

    /// Confirm the pending delete, yielding the username to delete.
    pub fn confirm_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, status: Option<&str>, email: Option<&str>) -> User {
        User {
            username: name.to_string(),
            home_dir: format!("/home/ftpusers/{}", name),
            quota_mb: 100,
            created_at: "2025-01-06 10:00:00".to_string(),
            status: status.map(str::to_string),
            permissions: None,
            email: email.map(str::to_string),
        }
    }

    fn loaded(users: Vec<User>) -> UsersPage {
        let mut page = UsersPage::default();
        page.begin_load();
        page.finish_load(Ok(users));
        page
    }

    #[test]
    fn test_empty_list_has_zero_counters() {
        let page = loaded(Vec::new());
        assert!(!page.loading);
        assert!(page.filtered().is_empty());
        assert_eq!(page.counters(), UserCounters::default());
        assert!(page.selected_user().is_none());
    }

    #[test]
    fn test_counters_by_status() {
        let page = loaded(vec![
            user("alice", Some("active"), None),
            user("bob", Some("inactive"), None),
            user("carol", Some("suspended"), None),
            user("dave", Some("active"), None),
            user("erin", None, None),
        ]);
        assert_eq!(
            page.counters(),
            UserCounters {
                total: 5,
                active: 2,
                inactive: 1,
                suspended: 1,
            }
        );
    }

    #[test]
    fn test_search_matches_username_or_email() {
        let mut page = loaded(vec![
            user("alice", Some("active"), Some("alice@example.com")),
            user("bob", Some("active"), Some("ops@ACME.io")),
            user("carol", None, None),
        ]);

        page.search = "ALI".to_string();
        let names: Vec<_> = page.filtered().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["alice"]);

        page.search = "acme".to_string();
        let names: Vec<_> = page.filtered().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["bob"]);

        // Counters ignore the filter.
        assert_eq!(page.counters().total, 3);
    }

    #[test]
    fn test_selection_wraps_within_filter() {
        let mut page = loaded(vec![
            user("alice", None, None),
            user("bob", None, None),
        ]);
        page.select_prev();
        assert_eq!(page.selected_user().map(|u| u.username.as_str()), Some("bob"));
        page.select_next();
        assert_eq!(page.selected_user().map(|u| u.username.as_str()), Some("alice"));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut page = loaded(vec![user("alice", None, None)]);
        page.request_delete();
        assert_eq!(page.pending_delete.as_deref(), Some("alice"));

        page.cancel_delete();
        assert_eq!(page.confirm_delete(), None);

        page.request_delete();
        assert_eq!(page.confirm_delete().as_deref(), Some("alice"));
        assert!(page.pending_delete.is_none());
    }

    #[test]
    fn test_load_failure_clears_rows() {
        let mut page = loaded(vec![user("alice", None, None)]);
        page.begin_load();
        page.finish_load(Err(ApiError::Status {
            status: 500,
            message: "HTTP 500".to_string(),
        }));
        assert!(page.users.is_empty());
        assert_eq!(page.error.as_deref(), Some("Failed to load users: HTTP 500"));
    }
}
