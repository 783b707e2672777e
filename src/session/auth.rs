use thiserror::Error;

use crate::session::Completion;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

/// Client-side form checks. Nothing is verified against any account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Password is required")]
    MissingPassword,
}

/// Mock sign-in / sign-up form. Any well-formed submission succeeds.
#[derive(Clone, Debug)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    /// `None` while the action row (not a text field) has focus.
    pub focus: Option<AuthField>,
    pub error: Option<FormError>,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            mode: AuthMode::SignIn,
            email: String::new(),
            password: String::new(),
            focus: Some(AuthField::Email),
            error: None,
        }
    }
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.focus.is_some()
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.error = None;
    }

    /// Email -> Password -> actions -> Email.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Some(AuthField::Email) => Some(AuthField::Password),
            Some(AuthField::Password) => None,
            None => Some(AuthField::Email),
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Some(AuthField::Email) => None,
            Some(AuthField::Password) => Some(AuthField::Email),
            None => Some(AuthField::Password),
        };
    }

    pub fn blur(&mut self) {
        self.focus = None;
    }

    pub fn insert_char(&mut self, ch: char) {
        let Some(field) = self.focus else {
            return;
        };
        if ch.is_control() {
            return;
        }
        self.field_mut(field).push(ch);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focus {
            self.field_mut(field).pop();
        }
    }

    pub fn masked_password(&self) -> String {
        "\u{2022}".repeat(self.password.chars().count())
    }

    fn field_mut(&mut self, field: AuthField) -> &mut String {
        match field {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(FormError::MissingEmail);
        }
        if !email.contains('@') {
            return Err(FormError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(FormError::MissingPassword);
        }
        Ok(())
    }

    /// Submit the email form. On a failed check the error is kept for display
    /// and focus moves to the offending field.
    pub fn submit(&mut self) -> Option<Completion> {
        match self.validate() {
            Ok(()) => {
                self.error = None;
                tracing::info!(mode = ?self.mode, "email sign-in accepted");
                Some(Completion::AuthSucceeded)
            }
            Err(err) => {
                self.focus = Some(match err {
                    FormError::MissingEmail | FormError::InvalidEmail => AuthField::Email,
                    FormError::MissingPassword => AuthField::Password,
                });
                self.error = Some(err);
                None
            }
        }
    }

    /// Third-party sign-in is mocked and always succeeds.
    pub fn continue_with_google(&mut self) -> Option<Completion> {
        tracing::info!("google sign-in accepted");
        Some(Completion::AuthSucceeded)
    }

    pub fn explore_courses(&mut self) -> Option<Completion> {
        Some(Completion::ExploreCourses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut AuthForm, s: &str) {
        for ch in s.chars() {
            form.insert_char(ch);
        }
    }

    #[test]
    fn test_starts_in_sign_in_with_email_focused() {
        let form = AuthForm::new();
        assert_eq!(form.mode, AuthMode::SignIn);
        assert_eq!(form.focus, Some(AuthField::Email));
        assert!(form.is_editing());
    }

    #[test]
    fn test_submit_requires_email() {
        let mut form = AuthForm::new();
        assert!(form.submit().is_none());
        assert_eq!(form.error, Some(FormError::MissingEmail));
    }

    #[test]
    fn test_submit_rejects_email_without_at() {
        let mut form = AuthForm::new();
        type_str(&mut form, "learner");
        form.focus_next();
        type_str(&mut form, "pw");
        assert!(form.submit().is_none());
        assert_eq!(form.error, Some(FormError::InvalidEmail));
        assert_eq!(form.focus, Some(AuthField::Email));
    }

    #[test]
    fn test_submit_requires_password_and_focuses_it() {
        let mut form = AuthForm::new();
        type_str(&mut form, "a@b.c");
        form.blur();
        assert!(form.submit().is_none());
        assert_eq!(form.error, Some(FormError::MissingPassword));
        assert_eq!(form.focus, Some(AuthField::Password));
    }

    #[test]
    fn test_valid_submit_succeeds() {
        let mut form = AuthForm::new();
        type_str(&mut form, "a@b.c");
        form.focus_next();
        type_str(&mut form, "secret");
        assert_eq!(form.submit(), Some(Completion::AuthSucceeded));
        assert_eq!(form.error, None);
        assert_eq!(form.masked_password().chars().count(), 6);
    }

    #[test]
    fn test_typing_clears_error_and_backspace_edits_focused_field() {
        let mut form = AuthForm::new();
        form.submit();
        assert!(form.error.is_some());
        type_str(&mut form, "ab");
        assert!(form.error.is_none());
        form.backspace();
        assert_eq!(form.email, "a");
    }

    #[test]
    fn test_typing_without_focus_is_ignored() {
        let mut form = AuthForm::new();
        form.blur();
        type_str(&mut form, "xyz");
        assert!(form.email.is_empty());
        assert!(form.password.is_empty());
    }

    #[test]
    fn test_focus_cycle() {
        let mut form = AuthForm::new();
        form.focus_next();
        assert_eq!(form.focus, Some(AuthField::Password));
        form.focus_next();
        assert_eq!(form.focus, None);
        form.focus_next();
        assert_eq!(form.focus, Some(AuthField::Email));
        form.focus_prev();
        assert_eq!(form.focus, None);
    }

    #[test]
    fn test_toggle_mode() {
        let mut form = AuthForm::new();
        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::SignUp);
        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::SignIn);
    }

    #[test]
    fn test_google_and_explore() {
        let mut form = AuthForm::new();
        assert_eq!(form.continue_with_google(), Some(Completion::AuthSucceeded));
        assert_eq!(form.explore_courses(), Some(Completion::ExploreCourses));
    }
}
