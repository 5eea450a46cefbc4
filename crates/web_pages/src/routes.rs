/// A client-visible route. Paths match exactly; there are no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Landing page
    Home,
    /// Alert creation form
    CreateNotification,
    /// Alert list
    Notifications,
}

impl Route {
    /// Every route, in navigation order.
    pub const ALL: [Route; 3] = [Route::Home, Route::CreateNotification, Route::Notifications];

    /// Path the route is served at.
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::CreateNotification => "/create-notification",
            Route::Notifications => "/notifications",
        }
    }

    /// Resolves a request path, exact match only.
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(
            Route::from_path("/create-notification"),
            Some(Route::CreateNotification)
        );
        assert_eq!(Route::from_path("/notifications"), Some(Route::Notifications));

        assert_eq!(Route::from_path("/notifications/"), None);
        assert_eq!(Route::from_path("/notifications?page=2"), None);
        assert_eq!(Route::from_path("/create"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }
}
