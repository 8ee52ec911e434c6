//! Server-side rendering of the map page shell.
//!
//! The page template lives in `app/index.html` and is rendered through
//! [`tera`] with HTML autoescaping. Category `<option>`s and the initial
//! statistics are filled in so the first paint needs no API call.

use arrest_map_arrest_models::Stats;
use arrest_map_server_models::InitialPageData;
use tera::{Context, Tera};
use thiserror::Error;

static INDEX_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../app/index.html"
));

/// Template name; the `.html` suffix turns on autoescaping.
const INDEX_TEMPLATE_NAME: &str = "index.html";

/// Errors produced while rendering the page shell.
#[derive(Debug, Error)]
pub enum PageError {
    /// The embedded data failed to serialize.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The template failed to parse or render.
    #[error(transparent)]
    Template(#[from] tera::Error),
}

/// Serializes `value` as JSON that is safe to place inside a `<script>`
/// element: `<`, `>` and `&` are emitted as unicode escapes.
///
/// # Errors
///
/// Returns an error if `value` fails to serialize.
pub fn script_safe_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Renders the index page with `categories` and `stats` embedded.
///
/// # Errors
///
/// * If the embedded data fails to serialize
/// * If the template fails to parse or render
pub fn render_index(categories: &[String], stats: &Stats) -> Result<String, PageError> {
    let initial = script_safe_json(&InitialPageData { categories, stats })?;

    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;

    let mut context = Context::new();
    context.insert("categories", categories);
    context.insert("total", &stats.total);
    context.insert("initial_data", &initial);

    Ok(tera.render(INDEX_TEMPLATE_NAME, &context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrest_map_arrest_models::{AVG_AGE_UNAVAILABLE, GenderCounts};

    fn stats() -> Stats {
        Stats {
            total: 42,
            genders: GenderCounts::default(),
            avg_age: AVG_AGE_UNAVAILABLE.to_string(),
            top_countries: Vec::new(),
            top_gangs: Vec::new(),
            category_counts: Vec::new(),
            race_distribution: Vec::new(),
        }
    }

    #[test]
    fn script_json_cannot_close_the_tag() {
        let json = script_safe_json(&vec!["</script><script>alert(1)</script>"]).unwrap();
        assert!(!json.contains("</script>"));
        let back: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0], "</script><script>alert(1)</script>");
    }

    #[test]
    fn renders_categories_total_and_initial_data() {
        let categories = vec!["Assault".to_string(), "Drugs & Weapons".to_string()];
        let html = render_index(&categories, &stats()).unwrap();

        assert!(html.contains(r#"<option value="Assault">Assault</option>"#));
        assert!(html.contains("Drugs &amp; Weapons"));
        assert!(!html.contains("Drugs & Weapons<"));
        assert!(html.contains("42 people"));
        assert!(html.contains(r#""avgAge":"N/A""#));
        assert!(!html.contains("{{"));
        assert!(!html.contains("{%"));
    }

    #[test]
    fn category_text_is_never_treated_as_template() {
        let categories = vec!["{{TOTAL}}".to_string(), "{{ initial_data }}".to_string()];
        let html = render_index(&categories, &stats()).unwrap();

        assert!(html.contains(r#"<option value="{{TOTAL}}">{{TOTAL}}</option>"#));
        assert!(html.contains(r#"<option value="{{ initial_data }}">{{ initial_data }}</option>"#));
        assert!(!html.contains(r#"<option value="42">"#));
    }

    #[test]
    fn category_markup_is_escaped() {
        let categories = vec![r#""><script>alert(1)</script>"#.to_string()];
        let html = render_index(&categories, &stats()).unwrap();

        assert!(html.contains("&quot;&gt;&lt;script&gt;alert(1)"));
        assert!(!html.contains(r#"value=""><script>"#));
        assert!(!html.contains("<script>alert(1)"));
    }
}
