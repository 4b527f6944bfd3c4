//! HTML rendering.
//!
//! Pages share [`page`]; everything else returns fragments that htmx swaps
//! into an existing page. All interpolated text goes through [`escape`].

use axum::http::StatusCode;
use axum::response::Html;

pub mod effects;
pub mod ingredients;
pub mod potions;
pub mod vendors;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Weight and gold are stored as decimals with two places.
pub fn decimal(value: f64) -> String {
    format!("{value:.2}")
}

pub fn media_url(path: &str) -> String {
    format!("/media/{}", escape(path.trim_start_matches('/')))
}

pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} · Alchemy Codex</title>
<script src="https://unpkg.com/htmx.org@1.9.12"></script>
</head>
<body>
<nav>
<a href="/">Home</a>
<a href="/ingredients/">Ingredients</a>
<a href="/effects/">Effects</a>
<a href="/favorites/">Favorites</a>
<a href="/potions/start/">Brew</a>
<a href="/potions/">Potions</a>
</nav>
<main>
<h1>{title}</h1>
{body}
</main>
<div id="modal"></div>
</body>
</html>
"#,
        title = escape(title),
    ))
}

pub fn home() -> Html<String> {
    page(
        "Alchemy Codex",
        r#"<p>Browse <a href="/ingredients/">ingredients</a> and <a href="/effects/">effects</a>,
keep track of your <a href="/favorites/">favorites</a>, or
<a href="/potions/start/">brew a potion</a>.</p>"#,
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    page(&title, &format!("<p>{}</p>", escape(message)))
}
