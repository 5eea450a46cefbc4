//! Small helpers shared by the page renderers.

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the error and success banners of a page.
pub fn banners(error: Option<&str>, success: Option<&str>) -> String {
    let mut html = String::new();
    if let Some(message) = error {
        html.push_str(&format!(
            r#"<div class="alert alert-error">{}</div>"#,
            escape(message)
        ));
    }
    if let Some(message) = success {
        html.push_str(&format!(
            r#"<div class="alert alert-success">{}</div>"#,
            escape(message)
        ));
    }
    html
}

/// Renders a hidden form input, skipping empty values.
pub fn hidden_input(name: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!(
        r#"<input type="hidden" name="{}" value="{}">"#,
        escape(name),
        escape(value)
    )
}
