//! Markdown rendering for blog post bodies.

use comrak::{Options, markdown_to_html};

/// Render a post body to HTML.
///
/// Raw HTML in the source is escaped rather than passed through.
#[must_use]
pub fn render(source: &str) -> String {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    markdown_to_html(source, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let html = render("# Nuestro café\n\nTostado **artesanal**.");
        assert!(html.contains("<h1>Nuestro café</h1>"));
        assert!(html.contains("<strong>artesanal</strong>"));
    }

    #[test]
    fn test_render_escapes_raw_html() {
        let html = render("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_gfm_extensions() {
        let html = render("~~viejo~~ nuevo");
        assert!(html.contains("<del>viejo</del>"));
    }
}
