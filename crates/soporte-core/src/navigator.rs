//! Host navigation hooks.
//!
//! When the backend rejects a session, the client has to tell the person and
//! send them back to the entry page. How that happens depends on the host (a
//! browser page, a terminal, a desktop shell), so it is abstracted here.

/// Hooks the client calls into when a session is rejected.
pub trait Navigator: Send + Sync {
    /// Identifier of the view currently shown (page name, route, screen id).
    ///
    /// Returns `None` when the host has no notion of a current view.
    fn current_view(&self) -> Option<String>;

    /// Shows a notice to the person using the host.
    fn notify(&self, message: &str);

    /// Navigates to `target`.
    fn navigate(&self, target: &str);
}

/// Navigator for hosts without views: notices go to the log and navigation
/// is recorded but has no effect.
///
/// # Example
///
/// ```
/// use soporte_core::navigator::{HeadlessNavigator, Navigator};
///
/// let navigator = HeadlessNavigator::default();
/// assert_eq!(navigator.current_view(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeadlessNavigator;

impl Navigator for HeadlessNavigator {
    fn current_view(&self) -> Option<String> {
        None
    }

    fn notify(&self, message: &str) {
        tracing::warn!("[Navigator] {}", message);
    }

    fn navigate(&self, target: &str) {
        tracing::info!("[Navigator] Redirect to {}", target);
    }
}

/// Returns true when `view` is one of the login/registration views.
///
/// Matching is by substring so both `login` and `/app/login.html` hit.
pub fn is_auth_view(view: &str, auth_views: &[String]) -> bool {
    auth_views
        .iter()
        .any(|candidate| !candidate.is_empty() && view.contains(candidate.as_str()))
}
