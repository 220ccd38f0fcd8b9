//! Page routes and URL resolution
//!
//! `/` redirects to the dashboard. `?action=new` on the appointments and
//! tasks pages opens the create form. Anything else unknown is not found.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Dashboard,
    Appointments,
    Tasks,
    Services,
    AiTools,
    Integrations,
    Settings,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Dashboard,
        Route::Appointments,
        Route::Tasks,
        Route::Services,
        Route::AiTools,
        Route::Integrations,
        Route::Settings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Appointments => "/appointments",
            Route::Tasks => "/tasks",
            Route::Services => "/services",
            Route::AiTools => "/ai-tools",
            Route::Integrations => "/integrations",
            Route::Settings => "/settings",
        }
    }

    fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Pages with a create dialog reachable through `?action=new`
    pub fn has_create_form(self) -> bool {
        matches!(self, Route::Appointments | Route::Tasks)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Page {
        route: Route,
        open_create_form: bool,
        /// Fragment such as `satisfaction-review` on the AI tools page
        anchor: Option<String>,
    },
    Redirect(Route),
    NotFound,
}

/// Resolve a URL path (with optional query and fragment)
pub fn resolve(url: &str) -> Navigation {
    let (rest, anchor) = match url.split_once('#') {
        Some((rest, fragment)) if !fragment.is_empty() => (rest, Some(fragment.to_string())),
        Some((rest, _)) => (rest, None),
        None => (url, None),
    };
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Navigation::Redirect(Route::Dashboard);
    }

    match Route::from_path(trimmed) {
        Some(route) => {
            let wants_new = query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .any(|(key, value)| key == "action" && value == "new");
            Navigation::Page {
                route,
                open_create_form: wants_new && route.has_create_form(),
                anchor,
            }
        }
        None => {
            tracing::debug!(path = %path, "No route for path");
            Navigation::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_redirects() {
        assert_eq!(resolve("/"), Navigation::Redirect(Route::Dashboard));
        assert_eq!(resolve(""), Navigation::Redirect(Route::Dashboard));
    }

    #[test]
    fn test_action_new_opens_create_form() {
        assert_eq!(
            resolve("/tasks?action=new"),
            Navigation::Page {
                route: Route::Tasks,
                open_create_form: true,
                anchor: None
            }
        );
        // the services page has no create-on-load dialog
        assert!(matches!(
            resolve("/services?action=new"),
            Navigation::Page {
                open_create_form: false,
                ..
            }
        ));
    }

    #[test]
    fn test_anchor_and_unknown() {
        assert_eq!(
            resolve("/ai-tools#satisfaction-review"),
            Navigation::Page {
                route: Route::AiTools,
                open_create_form: false,
                anchor: Some("satisfaction-review".into())
            }
        );
        assert_eq!(resolve("/billing"), Navigation::NotFound);
    }
}
