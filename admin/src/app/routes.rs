//! # Routes
//!
//! Symbolic navigation targets and the authentication guard.
//!
//! Parsing accepts the legacy advertisement detail paths
//! (`/advertisements/detalhes/:id`, `/AnunciosDetalhes/:id`,
//! `/advertisements/:id`) so old bookmarks keep working; [`Route::path`]
//! always produces the canonical form.

use std::fmt;

use shared::User;

use crate::services::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Home,
    Admin,
    Users,
    UserRegister,
    UserDetail(i64),
    Products,
    Advertisements,
    AdvertisementNew,
    AdvertisementEdit(i64),
    AdvertisementDetail(i64),
    Rules,
    RuleNew,
    RuleEdit(i64),
    NotFound,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/auth/login".to_string(),
            Route::Register => "/auth/register".to_string(),
            Route::Home => "/home".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::Users => "/admin/users".to_string(),
            Route::UserRegister => "/admin/users/register".to_string(),
            Route::UserDetail(id) => format!("/admin/users/{}", id),
            Route::Products => "/products".to_string(),
            Route::Advertisements => "/advertisements".to_string(),
            Route::AdvertisementNew => "/advertisements/new".to_string(),
            Route::AdvertisementEdit(id) => format!("/advertisements/edit/{}", id),
            Route::AdvertisementDetail(id) => format!("/advertisements/details/{}", id),
            Route::Rules => "/rules".to_string(),
            Route::RuleNew => "/rules/new".to_string(),
            Route::RuleEdit(id) => format!("/rules/edit/{}", id),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Resolve a path. Unknown paths, and ids that are not numbers, resolve
    /// to [`Route::NotFound`]. The root redirects to the login view.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Login,
            ["auth", "login"] => Route::Login,
            ["auth", "register"] => Route::Register,
            ["home"] => Route::Home,
            ["admin"] => Route::Admin,
            ["admin", "users"] => Route::Users,
            ["admin", "users", "register"] => Route::UserRegister,
            ["admin", "users", id] => with_id(id, Route::UserDetail),
            ["products"] => Route::Products,
            ["advertisements"] => Route::Advertisements,
            ["advertisements", "new"] => Route::AdvertisementNew,
            ["advertisements", "edit", id] => with_id(id, Route::AdvertisementEdit),
            ["advertisements", "details" | "detalhes", id] | ["AnunciosDetalhes", id] => {
                with_id(id, Route::AdvertisementDetail)
            }
            ["advertisements", id] => with_id(id, Route::AdvertisementDetail),
            ["rules"] => Route::Rules,
            ["rules", "new"] => Route::RuleNew,
            ["rules", "edit", id] => with_id(id, Route::RuleEdit),
            _ => Route::NotFound,
        }
    }

    /// Everything except the auth pages and the not-found page needs a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register | Route::NotFound)
    }

    /// The route actually shown: protected routes fall back to the login
    /// view when the session holds no usable token.
    pub fn guard(self, session: &Session) -> Route {
        if self.is_protected() && !session.is_authenticated() {
            tracing::debug!(requested = %self, "Redirecting to login");
            Route::Login
        } else {
            self
        }
    }

    /// Landing page after a successful login.
    pub fn after_login(user: &User) -> Route {
        if user.is_admin() {
            Route::UserRegister
        } else {
            Route::Users
        }
    }
}

fn with_id(raw: &str, route: fn(i64) -> Route) -> Route {
    raw.parse().map(route).unwrap_or(Route::NotFound)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
