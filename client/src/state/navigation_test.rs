use super::*;

#[test]
fn request_then_take_yields_target_once() {
    let mut state = NavigationState::default();
    state.request("/insurance-categories");
    assert_eq!(state.take().as_deref(), Some("/insurance-categories"));
    assert_eq!(state.take(), None);
}

#[test]
fn repeated_requests_bump_sequence() {
    let mut state = NavigationState::default();
    state.request("/");
    state.request("/");
    assert_eq!(state.request_seq, 2);
    assert_eq!(state.pending.as_deref(), Some("/"));
}

#[test]
fn signal_navigator_records_pending_target() {
    let owner = Owner::new();
    owner.with(|| {
        let requests = RwSignal::new(NavigationState::default());
        SignalNavigator::new(requests).navigate("/login");
        assert_eq!(requests.get_untracked().pending.as_deref(), Some("/login"));
    });
}
