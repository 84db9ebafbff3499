use std::fmt;
use std::fmt::{Display, Formatter};

pub const LIST_PATH: &str = "/blog";
pub const NOT_FOUND_PATH: &str = "/404";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(String),
    NotFound,
}

impl Route {
    /// Maps a request path to a route. Anything unknown lands on the list.
    pub fn resolve(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        if path == NOT_FOUND_PATH {
            return Route::NotFound;
        }

        match path.strip_prefix(LIST_PATH) {
            Some("") => Route::List,
            Some(rest) => match rest.strip_prefix('/') {
                Some(slug) if !slug.is_empty() && !slug.contains('/') => Route::Detail(slug.to_string()),
                _ => Route::List,
            },
            None => Route::List,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => LIST_PATH.to_string(),
            Route::Detail(slug) => format!("{}/{}", LIST_PATH, slug),
            Route::NotFound => NOT_FOUND_PATH.to_string(),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Navigation history. The current route is the top of the stack.
#[derive(Debug, Default)]
pub struct Navigator {
    history: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Navigator { history: vec![] }
    }

    /// History seeded from the page the browser came from, if it was one of ours.
    pub fn from_referer(referer: Option<&str>, host: Option<&str>) -> Self {
        let mut navigator = Navigator::new();
        if let Some(path) = referer.and_then(|r| local_path(r, host)) {
            navigator.navigate(Route::resolve(path));
        }
        navigator
    }

    pub fn navigate(&mut self, route: Route) -> &Route {
        self.history.push(route);
        &self.history[self.history.len() - 1]
    }

    pub fn current(&self) -> Option<&Route> {
        self.history.last()
    }

    /// Leaves the current entry and returns the one before it, or the list
    /// when there is nothing to go back to.
    pub fn back(&mut self) -> Route {
        self.history.pop();
        match self.history.last() {
            Some(route) => route.clone(),
            None => Route::List,
        }
    }
}

fn local_path<'a>(referer: &'a str, host: Option<&str>) -> Option<&'a str> {
    if referer.starts_with('/') {
        return Some(referer);
    }

    let without_scheme = referer.split_once("://").map(|(_, rest)| rest)?;
    let (authority, path) = match without_scheme.find('/') {
        Some(idx) => (&without_scheme[..idx], &without_scheme[idx..]),
        None => (without_scheme, "/"),
    };

    match host {
        Some(host) if host != authority => None,
        _ => Some(path),
    }
}
