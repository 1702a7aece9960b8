//! Page template substitution

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Root-relative attribute prefixes rewritten to the base path
const ROOT_RELATIVE_ATTRS: &[&str] = &["href", "src"];

/// Ensure a base path ends with `/`; an empty base path becomes `/`
pub fn normalize_basepath(basepath: &str) -> String {
    if basepath.ends_with('/') {
        basepath.to_string()
    } else {
        format!("{basepath}/")
    }
}

/// Fill a template with a page title and body, then rewrite root-relative
/// `href`/`src` references onto `basepath`
pub fn render_page(template: &str, title: &str, content: &str, basepath: &str) -> String {
    let basepath = normalize_basepath(basepath);
    let mut page = template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content);

    if basepath != "/" {
        for attr in ROOT_RELATIVE_ATTRS {
            page = page.replace(&format!("{attr}=\"/"), &format!("{attr}=\"{basepath}"));
        }
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "<html>\n<head><title>{{ Title }}</title>\n<link href=\"/index.css\" rel=\"stylesheet\"></head>\n<body>{{ Content }}</body>\n</html>";

    #[test]
    fn test_render_page() {
        let page = render_page(TEMPLATE, "Home", "<div><p>Hi</p></div>", "/");
        assert_eq!(
            page,
            "<html>\n<head><title>Home</title>\n<link href=\"/index.css\" rel=\"stylesheet\"></head>\n<body><div><p>Hi</p></div></body>\n</html>"
        );
    }

    #[test]
    fn test_render_page_rewrites_basepath() {
        let content = "<div><p><a href=\"/blog\">blog</a><img src=\"/a.png\" alt=\"a\" /></p></div>";
        let page = render_page(TEMPLATE, "T", content, "/site/");
        assert!(page.contains("href=\"/site/index.css\""));
        assert!(page.contains("href=\"/site/blog\""));
        assert!(page.contains("src=\"/site/a.png\""));
    }

    #[test]
    fn test_absolute_urls_untouched() {
        let page = render_page("<a href=\"https://x.dev/\">x</a>", "T", "", "/site/");
        assert_eq!(page, "<a href=\"https://x.dev/\">x</a>");
    }

    #[test]
    fn test_every_placeholder_replaced() {
        let page = render_page("{{ Title }} | {{ Title }}", "A", "", "/");
        assert_eq!(page, "A | A");
    }

    #[test]
    fn test_content_placeholder_text_not_reexpanded() {
        let page = render_page("{{ Content }}", "A", "literal {{ Title }}", "/");
        assert_eq!(page, "literal {{ Title }}");
    }

    #[test]
    fn test_normalize_basepath() {
        assert_eq!(normalize_basepath("/"), "/");
        assert_eq!(normalize_basepath(""), "/");
        assert_eq!(normalize_basepath("/repo"), "/repo/");
        assert_eq!(normalize_basepath("/repo/"), "/repo/");
    }
}
