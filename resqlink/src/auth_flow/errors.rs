use thiserror::Error;

use super::types::FormField;

fn field_list(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthFlowError {
    /// Required inputs are empty; nothing was sent to the backend.
    #[error("Required fields missing: {}", field_list(.0))]
    ValidationFailed(Vec<FormField>),

    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}
