mod errors;
mod machine;
mod types;

pub use errors::AuthFlowError;
pub use machine::{AuthFlow, DEMO_MODE_NOTICE, FALLBACK_ERROR_MESSAGE};
pub use types::{AuthForm, AuthMode, AuthState, FormField, SubmitOutcome, SubmitTicket};
