use crate::Route;

/// Brand shown on the left of the navigation bar.
pub const BRAND: &str = "⛺️ Camply Web Interface";

/// One navigation destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// Button label
    pub label: &'static str,
    /// Destination
    pub route: Route,
    /// Rendered as the primary button
    pub primary: bool,
}

/// The three header destinations.
pub const NAV_LINKS: [NavLink; 3] = [
    NavLink {
        label: "Home",
        route: Route::Home,
        primary: false,
    },
    NavLink {
        label: "Create Alert",
        route: Route::CreateNotification,
        primary: true,
    },
    NavLink {
        label: "My Alerts",
        route: Route::Notifications,
        primary: false,
    },
];

/// Renders the navigation bar. The link for `active` is marked with `aria-current`.
pub fn render_header(active: Option<Route>) -> String {
    let links: String = NAV_LINKS
        .iter()
        .map(|link| {
            let class = if link.primary {
                "btn btn-primary"
            } else {
                "btn btn-secondary"
            };
            let current = if Some(link.route) == active {
                r#" aria-current="page""#
            } else {
                ""
            };
            format!(
                r#"<a href="{}" class="{}"{}>{}</a>"#,
                link.route.path(),
                class,
                current,
                link.label
            )
        })
        .collect();

    format!(
        r#"<header class="site-header"><div class="container"><nav class="site-nav"><a href="{}" class="brand">{}</a><div class="nav-links">{}</div></nav></div></header>"#,
        Route::Home.path(),
        BRAND,
        links
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_links() {
        let html = render_header(Some(Route::Notifications));

        assert!(html.contains(r#"<a href="/" class="btn btn-secondary">Home</a>"#));
        assert!(html.contains(
            r#"<a href="/create-notification" class="btn btn-primary">Create Alert</a>"#
        ));
        assert!(html.contains(
            r#"<a href="/notifications" class="btn btn-secondary" aria-current="page">My Alerts</a>"#
        ));
        assert!(html.contains(BRAND));
    }
}
