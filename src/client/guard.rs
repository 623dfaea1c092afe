use crate::client::session::SessionSnapshot;
use crate::model::role::Role;

pub const LOGIN_ROUTE: &str = "/login";

/// Result of guarding a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session hydration not finished; show a pending indicator, decide
    /// nothing yet.
    Pending,
    RedirectToLogin,
    /// Logged in with the wrong role; send them to their own dashboard.
    RedirectToDashboard(&'static str),
    /// Render the protected content.
    Render,
}

/// Strict evaluation order: loading, then missing session, then role
/// mismatch. Loading must win over any redirect so hydration never causes a
/// redirect flicker.
pub fn evaluate(session: SessionSnapshot<'_>, required_role: Role) -> GuardOutcome {
    if session.loading {
        return GuardOutcome::Pending;
    }

    let user = match session.user {
        Some(user) => user,
        None => return GuardOutcome::RedirectToLogin,
    };

    if user.role != required_role {
        return GuardOutcome::RedirectToDashboard(user.role.route());
    }

    GuardOutcome::Render
}
