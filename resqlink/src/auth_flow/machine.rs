use crate::provider::{IdentityProvider, ProviderError, ProviderKind};
use crate::session::{Identity, SessionStore};

use super::errors::AuthFlowError;
use super::types::{AuthForm, AuthMode, AuthState, SubmitOutcome, SubmitTicket};

pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred during authentication";
pub const DEMO_MODE_NOTICE: &str = "Demo Mode: Any credentials will work";

/// Sign-in / sign-up modal.
///
/// The flow never holds a session itself; a successful submission hands the
/// identity to the [`SessionStore`] and closes.
#[derive(Debug)]
pub struct AuthFlow {
    state: AuthState,
    form: AuthForm,
    generation: u64,
    demo_mode: bool,
}

impl AuthFlow {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            state: AuthState::Hidden,
            form: AuthForm::default(),
            generation: 0,
            demo_mode: kind == ProviderKind::Mock,
        }
    }

    /// Flow bound to whichever backend the session store resolved.
    pub fn for_session(session: &SessionStore) -> Self {
        Self::new(session.provider().kind())
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != AuthState::Hidden
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, AuthState::Submitting { .. })
    }

    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            AuthState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AuthForm {
        &mut self.form
    }

    pub fn title(&self) -> &'static str {
        match self.state.mode() {
            Some(AuthMode::Signup) => "Secure Your Identity",
            _ => "Access ResQLink",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state {
            AuthState::Submitting { .. } => "Processing...",
            _ => match self.state.mode() {
                Some(AuthMode::Signup) => "Create Account",
                _ => "Log In",
            },
        }
    }

    /// Show the modal in login mode. Opening an open modal does nothing.
    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.generation += 1;
        self.state = AuthState::ModeLogin;
        tracing::debug!("Auth flow opened");
    }

    /// Switch between login and signup, keeping only the email.
    pub fn toggle_mode(&mut self) -> Result<AuthMode, AuthFlowError> {
        let mode = match &self.state {
            AuthState::ModeLogin | AuthState::ModeSignup | AuthState::Error { .. } => {
                self.state.mode().map(AuthMode::toggled)
            }
            AuthState::Hidden | AuthState::Submitting { .. } => None,
        };
        let Some(mode) = mode else {
            return Err(AuthFlowError::InvalidTransition {
                from: self.state.name(),
                action: "toggle mode",
            });
        };

        self.form.keep_email_only();
        self.state = AuthState::for_mode(mode);
        Ok(mode)
    }

    /// Dismiss the modal from any state. A call still in flight becomes stale.
    pub fn close(&mut self) {
        if self.is_submitting() {
            tracing::debug!("Auth flow closed with a submission in flight");
        }
        self.generation += 1;
        self.state = AuthState::Hidden;
        self.form.clear();
    }

    /// Validate the form and enter `Submitting`.
    ///
    /// Missing fields leave the state untouched and nothing is sent.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, AuthFlowError> {
        let mode = match &self.state {
            AuthState::ModeLogin | AuthState::ModeSignup | AuthState::Error { .. } => {
                self.state.mode()
            }
            AuthState::Hidden | AuthState::Submitting { .. } => None,
        };
        let Some(mode) = mode else {
            return Err(AuthFlowError::InvalidTransition {
                from: self.state.name(),
                action: "submit",
            });
        };

        let missing = self.form.missing_fields(mode);
        if !missing.is_empty() {
            return Err(AuthFlowError::ValidationFailed(missing));
        }

        self.generation += 1;
        self.state = AuthState::Submitting { mode };
        Ok(SubmitTicket {
            generation: self.generation,
            mode,
            form: self.form.clone(),
        })
    }

    /// The backend call for a ticket. Borrows nothing from the flow.
    pub async fn perform(
        provider: &dyn IdentityProvider,
        ticket: &SubmitTicket,
    ) -> Result<Identity, ProviderError> {
        let form = &ticket.form;
        match ticket.mode {
            AuthMode::Login => provider.sign_in(&form.email, &form.password).await,
            AuthMode::Signup => {
                provider
                    .sign_up(&form.email, &form.password, &form.display_name)
                    .await
            }
        }
    }

    /// Apply the result of [`AuthFlow::perform`].
    pub fn finish_submit(
        &mut self,
        ticket: &SubmitTicket,
        result: Result<Identity, ProviderError>,
        session: &SessionStore,
    ) -> SubmitOutcome {
        if ticket.generation != self.generation || !self.is_submitting() {
            match result {
                Ok(identity) => {
                    tracing::debug!("Late sign-in for {} after the modal closed", identity.email);
                    session.complete_sign_in(identity);
                }
                Err(e) => tracing::debug!("Dropping late auth failure: {}", e),
            }
            return SubmitOutcome::Stale;
        }

        match result {
            Ok(identity) => {
                session.complete_sign_in(identity.clone());
                self.state = AuthState::Hidden;
                self.form.clear();
                SubmitOutcome::SignedIn(identity)
            }
            Err(e) => {
                tracing::info!("Auth submission failed: {}", e);
                let message = e.message().unwrap_or(FALLBACK_ERROR_MESSAGE).to_string();
                self.state = AuthState::Error {
                    mode: ticket.mode,
                    message: message.clone(),
                };
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Validate, call the backend and apply the result in one go.
    pub async fn submit(&mut self, session: &SessionStore) -> Result<SubmitOutcome, AuthFlowError> {
        let ticket = self.begin_submit()?;
        let result = Self::perform(session.provider().as_ref(), &ticket).await;
        Ok(self.finish_submit(&ticket, result, session))
    }
}
