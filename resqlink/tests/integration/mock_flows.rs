/// Mock provider flows: demo sign-up, blank display names and startup restore
use std::sync::Arc;
use std::time::Duration;

use resqlink::{
    AuthFlow, AuthState, GuardDecision, Identity, MOCK_USER_KEY, MockProvider, SessionStore,
    SubmitOutcome, guard, in_memory_store, load_record, save_record,
};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_mock_sign_up_persists_identity() {
    // Given the mock backend with its default latency
    let store = in_memory_store();
    let provider = Arc::new(MockProvider::new(store.clone()).with_latency(Duration::from_secs(1)));
    let session = SessionStore::with_min_startup(provider, Duration::ZERO);
    session.initialize().await;

    // When signing up through the modal
    let mut flow = AuthFlow::for_session(&session);
    assert!(flow.demo_mode());
    flow.open();
    flow.toggle_mode().unwrap();
    {
        let form = flow.form_mut();
        form.email = "a@b.com".to_string();
        form.password = "x".to_string();
        form.display_name = "A B".to_string();
    }
    let started = Instant::now();
    let outcome = flow.submit(&session).await.unwrap();

    // Then after the simulated round trip the identity is current and stored
    assert!(started.elapsed() >= Duration::from_secs(1));
    let current = session.current().expect("signed in");
    assert_eq!(outcome, SubmitOutcome::SignedIn(current.clone()));
    assert_eq!(current.email, "a@b.com");
    assert_eq!(current.display_name.as_deref(), Some("A B"));
    assert_eq!(flow.state(), &AuthState::Hidden);

    let stored: Option<Identity> = load_record(&store, MOCK_USER_KEY).await.unwrap();
    assert_eq!(stored, Some(current));
}

#[tokio::test]
async fn test_mock_sign_in_without_name_falls_back_to_email() {
    let provider = Arc::new(MockProvider::new(in_memory_store()).with_latency(Duration::ZERO));
    let session = SessionStore::with_min_startup(provider, Duration::ZERO);

    let mut flow = AuthFlow::for_session(&session);
    flow.open();
    {
        let form = flow.form_mut();
        form.email = "c@d.com".to_string();
        form.password = "y".to_string();
    }
    flow.submit(&session).await.unwrap();

    let current = session.current().expect("signed in");
    assert_eq!(current.display_name, None);
    assert_eq!(current.display_name_or_fallback(), "c");
}

#[tokio::test(start_paused = true)]
async fn test_startup_restores_mock_record_after_floor() {
    // Given a well-formed mock record from an earlier run
    let store = in_memory_store();
    let saved = Identity::new("k2j4h5l6m", "a@b.com", Some("A B".to_string()));
    save_record(&store, MOCK_USER_KEY, &saved).await.unwrap();
    let provider = Arc::new(MockProvider::new(store).with_latency(Duration::ZERO));
    let session = SessionStore::with_min_startup(provider, Duration::from_millis(2500));

    // Then the guard defers while the startup check runs
    assert_eq!(guard(&session.state(), "/"), GuardDecision::Defer);

    // When the startup check completes
    let started = Instant::now();
    session.initialize().await;

    // Then the identity is restored no earlier than the floor
    assert!(started.elapsed() >= Duration::from_millis(2500));
    assert_eq!(session.current(), Some(saved.clone()));
    assert!(!session.is_initializing());
    assert_eq!(guard(&session.state(), "/"), GuardDecision::Allow(saved));
}

#[tokio::test]
async fn test_mock_sign_out_removes_record() {
    let store = in_memory_store();
    let provider = Arc::new(MockProvider::new(store.clone()).with_latency(Duration::ZERO));
    let session = SessionStore::with_min_startup(provider, Duration::ZERO);
    session.initialize().await;

    let mut flow = AuthFlow::for_session(&session);
    flow.open();
    {
        let form = flow.form_mut();
        form.email = "a@b.com".to_string();
        form.password = "x".to_string();
    }
    flow.submit(&session).await.unwrap();
    session.sign_out().await;

    let stored: Option<Identity> = load_record(&store, MOCK_USER_KEY).await.unwrap();
    assert_eq!(stored, None);
    assert_eq!(
        guard(&session.state(), "/"),
        GuardDecision::Redirect("/".to_string())
    );
}
