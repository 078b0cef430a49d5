//! Sign in, sign up and sign out.
//!
//! Each action resolves to where the user should land next and an optional
//! message for that page, mirroring a form post followed by a redirect.

use crate::model::User;
use crate::store::RowStore;

/// Pages an auth action can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
}

impl Route {
    /// Site relative path of the page.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "index.html",
            Route::Login => "login.html",
            Route::Signup => "signup.html",
        }
    }
}

/// Result of an auth action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub redirect: Route,
    pub message: Option<String>,
    pub user: Option<User>,
}

impl AuthOutcome {
    fn to(redirect: Route, message: Option<String>) -> Self {
        Self {
            redirect,
            message,
            user: None,
        }
    }

    /// True when the action produced an account or a session.
    pub fn is_success(&self) -> bool {
        self.user.is_some()
    }
}

pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
pub const SIGNUP_COMPLETE: &str = "Sign-up complete! Check your inbox.";

/// Signs in; on failure the login page shows a fixed message.
pub fn login<S: RowStore + ?Sized>(store: &S, email: &str, password: &str) -> AuthOutcome {
    match store.sign_in(email.trim(), password) {
        Ok(user) => {
            crate::log!("auth"; "signed in as {}", user.email);
            AuthOutcome {
                redirect: Route::Home,
                message: None,
                user: Some(user),
            }
        }
        Err(e) => {
            crate::debug!("auth"; "sign in rejected: {}", e);
            AuthOutcome::to(Route::Login, Some(INVALID_CREDENTIALS.to_string()))
        }
    }
}

/// Registers an account; the backend's message is shown on failure.
pub fn signup<S: RowStore + ?Sized>(store: &S, email: &str, password: &str) -> AuthOutcome {
    match store.sign_up(email.trim(), password) {
        Ok(user) => {
            crate::log!("auth"; "registered {}", user.email);
            AuthOutcome {
                redirect: Route::Login,
                message: Some(SIGNUP_COMPLETE.to_string()),
                user: Some(user),
            }
        }
        Err(e) => AuthOutcome::to(Route::Signup, Some(e.to_string())),
    }
}

/// Ends the session. Always lands on the login page.
pub fn logout<S: RowStore + ?Sized>(store: &S) -> AuthOutcome {
    if let Err(e) = store.sign_out() {
        crate::log!("error"; "sign out failed: {}", e);
    }
    AuthOutcome::to(Route::Login, None)
}

/// Current session user; a failed lookup counts as signed out.
pub fn current_user<S: RowStore + ?Sized>(store: &S) -> Option<User> {
    store.current_user().unwrap_or_else(|e| {
        crate::log!("error"; "session lookup failed: {}", e);
        None
    })
}
