// ── Route table ──

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{Display, EnumIter};

/// The screen a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Home,
    Programs,
    Providers,
    ProgramDetail,
    ProviderDetail,
    ProgramsMap,
    Calendar,
    Approval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub view: View,
    pub requires_auth: bool,
    segments: Vec<Segment>,
}

impl Route {
    pub fn new(name: &'static str, path: &'static str, view: View) -> Self {
        let segments = split_path(path)
            .map(|s| match s.strip_prefix(':') {
                Some(param) => Segment::Param(param.to_owned()),
                None => Segment::Literal(s.to_owned()),
            })
            .collect();
        Self {
            name,
            path,
            view,
            requires_auth: false,
            segments,
        }
    }

    /// Mark the route as signed-in only.
    pub fn protected(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    fn capture(&self, parts: &[&str]) -> Option<BTreeMap<String, String>> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), (*part).to_owned());
                }
            }
        }
        Some(params)
    }
}

/// A resolved navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub name: &'static str,
    pub view: View,
    /// The normalized path that was resolved.
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub requires_auth: bool,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Ordered route definitions. First match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::default_routes()
    }
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The directory's routes. None of them require sign-in.
    pub fn default_routes() -> Self {
        Self::new(vec![
            Route::new("home", "/", View::Home),
            Route::new("programs", "/programs", View::Programs),
            Route::new("providers", "/providers", View::Providers),
            Route::new("program-detail", "/programs/:id", View::ProgramDetail),
            Route::new("provider-detail", "/providers/:id", View::ProviderDetail),
            Route::new("programs-map", "/programs-map", View::ProgramsMap),
            Route::new("calendar", "/calendar", View::Calendar),
            Route::new("approval", "/approval", View::Approval),
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Match `path` against the table.
    ///
    /// Query strings and fragments are ignored and a trailing slash is
    /// tolerated.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let parts: Vec<&str> = split_path(path).collect();
        let normalized = format!("/{}", parts.join("/"));

        self.routes.iter().find_map(|route| {
            route.capture(&parts).map(|params| RouteMatch {
                name: route.name,
                view: route.view,
                path: normalized.clone(),
                params,
                requires_auth: route.requires_auth,
            })
        })
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
