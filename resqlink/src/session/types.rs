use serde::{Deserialize, Serialize};

/// The authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    #[serde(
        rename = "displayName",
        alias = "full_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.filter(|n| !n.trim().is_empty()),
        }
    }

    /// Display name if one is set, otherwise the part of the email before `@`.
    pub fn display_name_or_fallback(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or_default(),
        }
    }

    /// Avatar letter for account pages.
    pub fn initial(&self) -> String {
        let source = match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.trim(),
            _ => self.email.as_str(),
        };
        source
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    /// Short upper-cased id shown as the "Mesh Node ID".
    pub fn node_id(&self) -> String {
        self.id.chars().take(8).collect::<String>().to_uppercase()
    }
}

/// Process-wide session state, owned by [`super::SessionStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current: Option<Identity>,
    /// True only while the one-time startup check is running.
    pub initializing: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current: None,
            initializing: true,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
