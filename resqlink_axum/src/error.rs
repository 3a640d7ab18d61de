use http::StatusCode;
use resqlink::AuthFlowError;

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

impl<T> IntoResponseError<T> for Result<T, AuthFlowError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                AuthFlowError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AuthFlowError::InvalidTransition { .. } => StatusCode::CONFLICT,
            };
            (status, e.to_string())
        })
    }
}
