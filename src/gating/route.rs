use std::fmt;

/// Views the gating layer can send the user to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Pricing,
    Settings,
    SignIn,
    Seed(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Pricing => "/pricing".into(),
            Route::Settings => "/settings".into(),
            Route::SignIn => "/signin".into(),
            Route::Seed(id) => format!("/seed/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Still verifying the session.
    Loading,
    SignedOut,
    SignedIn,
}

/// Authentication boundary: whether a session is active.
pub trait SessionProvider {
    fn session(&self) -> SessionState;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    Loading,
    /// Send to `to`, remembering where the user was headed.
    Redirect { to: Route, from: String },
    Render,
}

/// Decides whether a protected view may render.
pub struct RouteGuard<'a, S: SessionProvider + ?Sized> {
    session: &'a S,
}

impl<'a, S: SessionProvider + ?Sized> RouteGuard<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self { session }
    }

    pub fn check(&self, requested: &str) -> RouteAccess {
        match self.session.session() {
            SessionState::Loading => RouteAccess::Loading,
            SessionState::SignedOut => RouteAccess::Redirect {
                to: Route::SignIn,
                from: requested.to_string(),
            },
            SessionState::SignedIn => RouteAccess::Render,
        }
    }
}
