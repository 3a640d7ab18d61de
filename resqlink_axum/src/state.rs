use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;

use resqlink::{AuthFlow, HotspotViewer, SessionStore};

/// Shared state behind the resqlink routes
///
/// A single operator's session. Every client sees the same identity.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionStore>,
    pub auth: Arc<Mutex<AuthFlow>>,
    pub viewer: Arc<Mutex<HotspotViewer>>,
}

impl AppState {
    pub fn new(session: Arc<SessionStore>) -> Self {
        let auth = AuthFlow::for_session(&session);
        Self {
            session,
            auth: Arc::new(Mutex::new(auth)),
            viewer: Arc::new(Mutex::new(HotspotViewer::new())),
        }
    }

    /// Open the auth modal whenever anyone asks the session store for a
    /// sign-in.
    pub fn spawn_sign_in_listener(&self) -> JoinHandle<()> {
        let mut requests = self.session.sign_in_requests();
        let auth = self.auth.clone();
        tokio::spawn(async move {
            loop {
                match requests.recv().await {
                    Ok(()) => auth.lock().await.open(),
                    Err(broadcast::error::RecvError::Lagged(_)) => auth.lock().await.open(),
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
