//! New user form: draft fields and client-side validation.

use ftpm_client::{ApiError, CreateUserRequest, MessageResponse};
use thiserror::Error;

use super::Notice;

/// Reasons a draft is rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username must be at least 3 characters of letters, digits or underscores.")]
    InvalidUsername,

    #[error("Password is required.")]
    MissingPassword,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Quota must be a non-negative whole number of MB.")]
    InvalidQuota,
}

/// Editable fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewUserField {
    #[default]
    Username,
    Password,
    ConfirmPassword,
    HomeDir,
    QuotaMb,
}

impl NewUserField {
    pub const ALL: [NewUserField; 5] = [
        NewUserField::Username,
        NewUserField::Password,
        NewUserField::ConfirmPassword,
        NewUserField::HomeDir,
        NewUserField::QuotaMb,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NewUserField::Username => "Username",
            NewUserField::Password => "Password",
            NewUserField::ConfirmPassword => "Confirm password",
            NewUserField::HomeDir => "Home directory",
            NewUserField::QuotaMb => "Quota (MB)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            NewUserField::Username => "letters, digits, _",
            NewUserField::Password => "a strong password",
            NewUserField::ConfirmPassword => "repeat the password",
            NewUserField::HomeDir => "/home/ftpusers/<username>",
            NewUserField::QuotaMb => "server default",
        }
    }

    /// Rendered masked.
    pub fn is_secret(&self) -> bool {
        matches!(self, NewUserField::Password | NewUserField::ConfirmPassword)
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = self.index();
        Self::ALL[if idx == 0 { Self::ALL.len() - 1 } else { idx - 1 }]
    }
}

/// Draft of a user to create.
#[derive(Debug, Default)]
pub struct NewUserForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub home_dir: String,
    pub quota_mb: String,
    pub focus: NewUserField,
    /// A create request is in flight.
    pub submitting: bool,
    pub notice: Option<Notice>,
}

impl NewUserForm {
    pub fn value(&self, field: NewUserField) -> &str {
        match field {
            NewUserField::Username => &self.username,
            NewUserField::Password => &self.password,
            NewUserField::ConfirmPassword => &self.confirm_password,
            NewUserField::HomeDir => &self.home_dir,
            NewUserField::QuotaMb => &self.quota_mb,
        }
    }

    fn value_mut(&mut self, field: NewUserField) -> &mut String {
        match field {
            NewUserField::Username => &mut self.username,
            NewUserField::Password => &mut self.password,
            NewUserField::ConfirmPassword => &mut self.confirm_password,
            NewUserField::HomeDir => &mut self.home_dir,
            NewUserField::QuotaMb => &mut self.quota_mb,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.value_mut(self.focus).push(c);
    }

    pub fn pop_char(&mut self) {
        self.value_mut(self.focus).pop();
    }

    /// Check the draft and build the request body.
    pub fn validate(&self) -> Result<CreateUserRequest, ValidationError> {
        let username = self.username.trim();
        if username.chars().count() < 3
            || !username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ValidationError::InvalidUsername);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        let quota = self.quota_mb.trim();
        let quota_mb = if quota.is_empty() {
            None
        } else {
            Some(
                quota
                    .parse::<u64>()
                    .map_err(|_| ValidationError::InvalidQuota)?,
            )
        };

        let home_dir = self.home_dir.trim();
        Ok(CreateUserRequest {
            username: username.to_string(),
            password: self.password.clone(),
            home_dir: (!home_dir.is_empty()).then(|| home_dir.to_string()),
            quota_mb,
        })
    }

    /// Validate and, if the draft is acceptable, return the request to send.
    ///
    /// A rejected draft sets an inline error and returns `None`.
    pub fn submit(&mut self) -> Option<CreateUserRequest> {
        if self.submitting {
            return None;
        }
        match self.validate() {
            Ok(request) => {
                self.submitting = true;
                self.notice = None;
                Some(request)
            }
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                None
            }
        }
    }

    /// Record the backend's answer. A success clears the draft.
    pub fn finish_submit(&mut self, result: Result<MessageResponse, ApiError>) {
        self.submitting = false;
        match result {
            Ok(response) => {
                *self = NewUserForm {
                    notice: Some(Notice::Success(response.message)),
                    ..NewUserForm::default()
                };
            }
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(username: &str, password: &str, confirm: &str, quota: &str) -> NewUserForm {
        NewUserForm {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            quota_mb: quota.to_string(),
            ..NewUserForm::default()
        }
    }

    #[test]
    fn test_password_mismatch_yields_no_request() {
        let mut form = draft("alice", "secret1", "secret2", "");
        assert_eq!(form.submit(), None);
        assert!(!form.submitting);
        assert_eq!(
            form.notice,
            Some(Notice::Error("Passwords do not match.".to_string()))
        );
    }

    #[test]
    fn test_username_rules() {
        assert_eq!(
            draft("al", "pw", "pw", "").validate(),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(
            draft("bad name", "pw", "pw", "").validate(),
            Err(ValidationError::InvalidUsername)
        );
        assert!(draft("ftp_user_01", "pw", "pw", "").validate().is_ok());
    }

    #[test]
    fn test_quota_must_be_non_negative_integer() {
        assert_eq!(
            draft("alice", "pw", "pw", "-5").validate(),
            Err(ValidationError::InvalidQuota)
        );
        assert_eq!(
            draft("alice", "pw", "pw", "1.5").validate(),
            Err(ValidationError::InvalidQuota)
        );
        let request = draft("alice", "pw", "pw", " 0 ").validate().unwrap();
        assert_eq!(request.quota_mb, Some(0));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let request = draft("alice", "pw", "pw", "").validate().unwrap();
        assert_eq!(request.home_dir, None);
        assert_eq!(request.quota_mb, None);
    }

    #[test]
    fn test_submit_blocks_duplicates_until_answered() {
        let mut form = draft("alice", "pw", "pw", "200");
        let request = form.submit().unwrap();
        assert_eq!(request.quota_mb, Some(200));
        assert!(form.submitting);
        assert_eq!(form.submit(), None);

        form.finish_submit(Ok(MessageResponse {
            message: "User alice created successfully".to_string(),
        }));
        assert!(!form.submitting);
        assert!(form.username.is_empty());
        assert_eq!(
            form.notice,
            Some(Notice::Success("User alice created successfully".to_string()))
        );
    }

    #[test]
    fn test_backend_error_keeps_draft() {
        let mut form = draft("alice", "pw", "pw", "");
        form.submit();
        form.finish_submit(Err(ApiError::Status {
            status: 400,
            message: "User already exists".to_string(),
        }));
        assert_eq!(form.username, "alice");
        assert_eq!(
            form.notice,
            Some(Notice::Error("User already exists".to_string()))
        );
    }

    #[test]
    fn test_editing_follows_focus() {
        let mut form = NewUserForm::default();
        form.push_char('a');
        form.focus = form.focus.next();
        form.push_char('x');
        form.push_char('y');
        form.pop_char();
        assert_eq!(form.username, "a");
        assert_eq!(form.password, "x");
        assert_eq!(NewUserField::Username.prev(), NewUserField::QuotaMb);
    }
}
