use axum::{
    body::Body,
    handler::Handler,
    middleware::{from_fn, from_fn_with_state},
    response::Redirect,
    routing::{get, post, MethodRouter},
    Router,
};

use crate::authentication::{
    reject_anonymous_users, reject_unverified_users, require_recent_password_confirmation,
};
use crate::startup::AppState;

/// Access-control middleware a route entry can declare, by identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Middleware {
    /// A principal must be logged in under the web guard.
    Auth,
    /// The principal's e-mail address must be verified.
    Verified,
    /// The principal must have re-confirmed their password recently.
    ConfirmPassword,
}

/// One declarative route: a path, a handler, an optional symbolic name for
/// reverse lookup and the middleware chain guarding it. Entries are
/// assembled once at startup and never mutated afterwards.
pub struct RouteEntry {
    path: &'static str,
    name: Option<&'static str>,
    middleware: Vec<Middleware>,
    method_router: MethodRouter<AppState>,
}

impl RouteEntry {
    pub fn new(path: &'static str, method_router: MethodRouter<AppState>) -> Self {
        Self {
            path,
            name: None,
            middleware: Vec::new(),
            method_router,
        }
    }

    /// A page render reachable via GET.
    pub fn view<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState, Body>,
        T: 'static,
    {
        Self::new(path, get(handler))
    }

    /// A state-changing action reachable via POST.
    pub fn action<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState, Body>,
        T: 'static,
    {
        Self::new(path, post(handler))
    }

    /// Redirects `path` to its canonical location, evaluated per request.
    pub fn redirect(path: &'static str, target: &'static str) -> Self {
        Self::new(
            path,
            get(move || async move { Redirect::temporary(target) }),
        )
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn route_name(&self) -> Option<&'static str> {
        self.name
    }

    pub fn middleware_chain(&self) -> &[Middleware] {
        &self.middleware
    }
}

/// The application's route table. Built once at startup, read-only from
/// then on; the external dispatcher it feeds is `axum::Router`.
#[derive(Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: RouteEntry) {
        self.entries.push(entry);
    }

    /// Declares a set of routes sharing a middleware prefix. The prefix is
    /// prepended to whatever middleware each entry declares itself.
    pub fn group<'a>(
        &'a mut self,
        shared: &'a [Middleware],
        register: impl FnOnce(&mut RouteGroup<'a>),
    ) {
        let mut group = RouteGroup {
            table: self,
            shared,
        };
        register(&mut group);
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Reverse lookup: the path registered under a symbolic route name.
    pub fn path_for(&self, name: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.name == Some(name))
            .map(|entry| entry.path)
    }

    /// Materializes the table into an axum router. Each entry's middleware
    /// chain is applied so that the first declared middleware runs first.
    pub fn into_router(self, state: AppState) -> Router {
        let mut router = Router::new();
        for entry in self.entries {
            let mut method_router = entry.method_router;
            for middleware in entry.middleware.iter().rev() {
                method_router = apply_middleware(method_router, *middleware, &state);
            }
            router = router.route(entry.path, method_router);
        }
        router.with_state(state)
    }
}

pub struct RouteGroup<'a> {
    table: &'a mut RouteTable,
    shared: &'a [Middleware],
}

impl RouteGroup<'_> {
    pub fn add(&mut self, mut entry: RouteEntry) {
        let mut middleware = self.shared.to_vec();
        middleware.append(&mut entry.middleware);
        entry.middleware = middleware;
        self.table.add(entry);
    }
}

fn apply_middleware(
    method_router: MethodRouter<AppState>,
    middleware: Middleware,
    state: &AppState,
) -> MethodRouter<AppState> {
    match middleware {
        Middleware::Auth => method_router.route_layer(from_fn(reject_anonymous_users)),
        Middleware::Verified => {
            method_router.route_layer(from_fn_with_state(state.clone(), reject_unverified_users))
        }
        Middleware::ConfirmPassword => {
            method_router.route_layer(from_fn(require_recent_password_confirmation))
        }
    }
}
