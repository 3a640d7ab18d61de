/// Real provider flows against the mock auth REST API
///
/// Covers sign-in, sign-up, rejected credentials, session restore with token
/// refresh, revoked refresh tokens and sign-out.
use std::sync::atomic::Ordering;
use std::time::Duration;

use resqlink::{
    AuthChange, AuthFlow, AuthState, IdentityProvider, ProviderError, SessionStore, SubmitOutcome,
    in_memory_store,
};

use crate::common::{MockBackend, real_provider};

fn fill(flow: &mut AuthFlow, email: &str, password: &str, name: &str) {
    let form = flow.form_mut();
    form.email = email.to_string();
    form.password = password.to_string();
    form.display_name = name.to_string();
}

#[tokio::test]
async fn test_real_sign_in_through_auth_flow() {
    // Given a backend with a known account
    let backend = MockBackend::start().await;
    let id = backend
        .state
        .add_account("ops@resq.link", "correct-horse", Some("Field Ops"));
    let provider = real_provider(&backend, in_memory_store());
    let session = SessionStore::with_min_startup(provider, Duration::ZERO);
    session.initialize().await;

    // When the user logs in through the modal
    let mut flow = AuthFlow::for_session(&session);
    assert!(!flow.demo_mode());
    flow.open();
    fill(&mut flow, "ops@resq.link", "correct-horse", "");
    let outcome = flow.submit(&session).await.unwrap();

    // Then the session holds the backend's identity
    let current = session.current().expect("signed in");
    assert_eq!(outcome, SubmitOutcome::SignedIn(current.clone()));
    assert_eq!(current.id, id);
    assert_eq!(current.display_name.as_deref(), Some("Field Ops"));
    assert_eq!(flow.state(), &AuthState::Hidden);
}

#[tokio::test]
async fn test_real_rejected_login_keeps_session_unchanged() {
    // Given a backend where the password does not match
    let backend = MockBackend::start().await;
    backend.state.add_account("ops@resq.link", "correct-horse", None);
    let provider = real_provider(&backend, in_memory_store());
    let session = SessionStore::with_min_startup(provider, Duration::ZERO);
    session.initialize().await;

    // When submitting the wrong password
    let mut flow = AuthFlow::for_session(&session);
    flow.open();
    fill(&mut flow, "ops@resq.link", "wrong", "");
    let outcome = flow.submit(&session).await.unwrap();

    // Then the backend's message is shown and nobody is signed in
    assert_eq!(
        outcome,
        SubmitOutcome::Failed("Invalid login credentials".to_string())
    );
    assert_eq!(
        flow.state(),
        &AuthState::Error {
            mode: resqlink::AuthMode::Login,
            message: "Invalid login credentials".to_string()
        }
    );
    assert_eq!(session.current(), None);
}

#[tokio::test]
async fn test_real_sign_up_and_duplicate_rejected() {
    let backend = MockBackend::start().await;
    let provider = real_provider(&backend, in_memory_store());

    let identity = provider
        .sign_up("new@resq.link", "long-enough", "New Person")
        .await
        .unwrap();
    assert_eq!(identity.email, "new@resq.link");
    assert_eq!(identity.display_name.as_deref(), Some("New Person"));

    let err = provider
        .sign_up("new@resq.link", "long-enough", "New Person")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::SignUpRejected(ref m) if m == "User already registered"));
}

#[tokio::test]
async fn test_real_backend_outage_is_unavailable() {
    let backend = MockBackend::start().await;
    backend.state.unavailable.store(true, Ordering::SeqCst);
    let provider = real_provider(&backend, in_memory_store());

    let err = provider.sign_in("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, ProviderError::BackendUnavailable(_)));
}

#[tokio::test]
async fn test_restore_refreshes_expiring_session() {
    // Given a session stored by an earlier run that is about to expire
    let backend = MockBackend::start().await;
    backend.state.add_account("ops@resq.link", "correct-horse", None);
    backend.state.expires_in.store(5, Ordering::SeqCst);
    let store = in_memory_store();
    let first_run = real_provider(&backend, store.clone());
    let signed_in = first_run.sign_in("ops@resq.link", "correct-horse").await.unwrap();
    drop(first_run);

    // When a new process starts on the same local store
    backend.state.expires_in.store(3600, Ordering::SeqCst);
    let provider = real_provider(&backend, store);
    let session = SessionStore::with_min_startup(provider, Duration::ZERO);
    session.initialize().await;

    // Then the session is restored through a token refresh
    assert_eq!(session.current(), Some(signed_in));
    assert!(!session.is_initializing());
    assert_eq!(backend.state.refresh_grants.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_restore_with_revoked_refresh_token_is_anonymous() {
    // Given an expiring stored session whose refresh token was revoked
    let backend = MockBackend::start().await;
    backend.state.add_account("ops@resq.link", "correct-horse", None);
    backend.state.expires_in.store(5, Ordering::SeqCst);
    let store = in_memory_store();
    let first_run = real_provider(&backend, store.clone());
    first_run.sign_in("ops@resq.link", "correct-horse").await.unwrap();
    backend.state.revoke_refresh_tokens();

    // When asking for the current session
    let provider = real_provider(&backend, store);
    let mut changes = provider.subscribe().expect("real provider pushes changes");
    let current = provider.current_session().await.unwrap();

    // Then the stored session is dropped and a sign-out is announced
    assert_eq!(current, None);
    assert!(matches!(changes.recv().await, Ok(AuthChange::SignedOut)));
    assert_eq!(provider.current_session().await.unwrap(), None);
}

#[tokio::test]
async fn test_real_sign_out_revokes_and_clears() {
    // Given a signed-in session
    let backend = MockBackend::start().await;
    backend.state.add_account("ops@resq.link", "correct-horse", None);
    let provider = real_provider(&backend, in_memory_store());
    let session = SessionStore::with_min_startup(provider.clone(), Duration::ZERO);
    session.initialize().await;
    let identity = provider.sign_in("ops@resq.link", "correct-horse").await.unwrap();
    session.complete_sign_in(identity);

    // When signing out
    session.sign_out().await;

    // Then the backend saw the logout and nothing is left locally
    assert_eq!(session.current(), None);
    assert_eq!(backend.state.logouts.load(Ordering::SeqCst), 1);
    assert_eq!(provider.current_session().await.unwrap(), None);
}

#[tokio::test]
async fn test_sign_out_clears_locally_when_backend_is_down() {
    let backend = MockBackend::start().await;
    backend.state.add_account("ops@resq.link", "correct-horse", None);
    let provider = real_provider(&backend, in_memory_store());
    let session = SessionStore::with_min_startup(provider.clone(), Duration::ZERO);
    session.initialize().await;
    let identity = provider.sign_in("ops@resq.link", "correct-horse").await.unwrap();
    session.complete_sign_in(identity);

    backend.state.unavailable.store(true, Ordering::SeqCst);
    session.sign_out().await;

    assert_eq!(session.current(), None);
    assert_eq!(backend.state.logouts.load(Ordering::SeqCst), 0);
}
