use std::fmt;

use crate::session::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Hidden,
    ModeLogin,
    ModeSignup,
    Submitting { mode: AuthMode },
    Error { mode: AuthMode, message: String },
}

impl AuthState {
    pub(super) fn for_mode(mode: AuthMode) -> Self {
        match mode {
            AuthMode::Login => Self::ModeLogin,
            AuthMode::Signup => Self::ModeSignup,
        }
    }

    pub fn mode(&self) -> Option<AuthMode> {
        match self {
            Self::Hidden => None,
            Self::ModeLogin => Some(AuthMode::Login),
            Self::ModeSignup => Some(AuthMode::Signup),
            Self::Submitting { mode } | Self::Error { mode, .. } => Some(*mode),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::ModeLogin => "login",
            Self::ModeSignup => "signup",
            Self::Submitting { .. } => "submitting",
            Self::Error { .. } => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Email,
    Password,
    DisplayName,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::DisplayName => "display name",
        };
        f.write_str(name)
    }
}

/// Input collected by the modal.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl AuthForm {
    pub(super) fn missing_fields(&self, mode: AuthMode) -> Vec<FormField> {
        let mut missing = Vec::new();
        if self.email.trim().is_empty() {
            missing.push(FormField::Email);
        }
        if self.password.is_empty() {
            missing.push(FormField::Password);
        }
        if mode == AuthMode::Signup && self.display_name.trim().is_empty() {
            missing.push(FormField::DisplayName);
        }
        missing
    }

    /// Keep only the email, as a mode toggle does.
    pub(super) fn keep_email_only(&mut self) {
        self.password.clear();
        self.display_name.clear();
    }

    pub(super) fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthForm")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// One submission in flight, identified by the generation it started in.
#[derive(Clone, Debug)]
pub struct SubmitTicket {
    pub(super) generation: u64,
    pub(super) mode: AuthMode,
    pub(super) form: AuthForm,
}

impl SubmitTicket {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn email(&self) -> &str {
        &self.form.email
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The modal closed and the session store holds this identity.
    SignedIn(Identity),
    /// The modal shows this message and keeps the form.
    Failed(String),
    /// The modal was closed or reopened before the call finished.
    Stale,
}
