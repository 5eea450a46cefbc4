use std::time::Duration;

use crate::html::escape;
use crate::{Route, render_header};

/// A delayed client-side navigation, rendered as a meta refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    /// Destination
    pub to: Route,
    /// Delay before navigating
    pub after: Duration,
}

/// Something the document shell can render below the header
pub trait Page {
    /// Document title.
    fn title(&self) -> String;

    /// Route highlighted in the header, if the page is one of the three routes.
    fn route(&self) -> Option<Route> {
        None
    }

    /// Main content.
    fn body(&self) -> String;

    /// Pending navigation, if any.
    fn redirect(&self) -> Option<Redirect> {
        None
    }
}

/// Renders a full HTML document: header plus exactly one page.
pub fn render_document(page: &dyn Page) -> String {
    let refresh = page
        .redirect()
        .map(|redirect| {
            format!(
                r#"<meta http-equiv="refresh" content="{};url={}">"#,
                redirect.after.as_secs(),
                redirect.to.path()
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{} - Camply</title>
    <link rel="stylesheet" href="/static/camply.css">
    {}
</head>
<body>
<div class="App">
{}
<main class="container">
{}
</main>
</div>
</body>
</html>
"#,
        escape(&page.title()),
        refresh,
        render_header(page.route()),
        page.body()
    )
}

/// Shown for any path outside the known routes
#[derive(Debug, Clone)]
pub struct NotFoundPage {
    /// Path that was requested
    pub path: String,
}

impl Page for NotFoundPage {
    fn title(&self) -> String {
        "Page Not Found".to_string()
    }

    fn body(&self) -> String {
        format!(
            r#"<div class="card"><div class="card-header"><h1 class="card-title">Page Not Found</h1></div><p>Nothing lives at <code>{}</code>.</p><a href="{}" class="btn btn-primary">Back to Home</a></div>"#,
            escape(&self.path),
            Route::Home.path()
        )
    }
}
