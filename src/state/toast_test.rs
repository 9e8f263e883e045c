use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.success("saved");
    let b = state.error("failed");
    let c = state.info("fyi");
    assert!(a < b && b < c);
    assert_eq!(state.toasts.len(), 3);
    assert_eq!(state.toasts[1].kind, ToastKind::Error);
    assert_eq!(state.toasts[1].message, "failed");
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.success("one");
    let b = state.success("two");
    state.dismiss(a);
    assert_eq!(state.toasts.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);
    state.dismiss(a);
    assert_eq!(state.toasts.len(), 1);
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut state = ToastState::default();
    let a = state.info("one");
    state.dismiss(a);
    let b = state.info("two");
    assert_ne!(a, b);
}

#[test]
fn kind_class_names() {
    assert_eq!(ToastKind::Success.class(), "toast toast--success");
    assert_eq!(ToastKind::Error.class(), "toast toast--error");
}
