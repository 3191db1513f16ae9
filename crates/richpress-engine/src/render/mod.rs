//! The document serializer.
//!
//! Combines the metadata fields and the content markup into one complete
//! HTML document with an embedded stylesheet. Pure and total: no input
//! mutates, nothing fails, and unchanged inputs produce byte-identical
//! output.

pub mod stylesheet;

use crate::models::FormMetadata;
use stylesheet::STYLESHEET;

/// `<title>` fallback when the title field is empty.
pub const DOCUMENT_TITLE_FALLBACK: &str = "無標題文件";

/// Heading fallback when the title field is empty.
pub const HEADING_FALLBACK: &str = "無標題";

/// Separator between the two category labels.
const CATEGORY_SEPARATOR: &str = " &gt; ";

/// Build the complete generated document.
///
/// The content markup is embedded verbatim; metadata fields are escaped
/// at this edge.
pub fn generate(meta: &FormMetadata, content: &str) -> String {
    let title = if meta.title_text.is_empty() {
        DOCUMENT_TITLE_FALLBACK.to_string()
    } else {
        html_escape::encode_text(&meta.title_text).into_owned()
    };
    let heading = if meta.title_text.is_empty() {
        HEADING_FALLBACK.to_string()
    } else {
        html_escape::encode_text(&meta.title_text).into_owned()
    };
    let category = breadcrumb(meta).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-TW">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body>
    <div class="styles-container">
        <!-- 注意：將 <style> 標籤放在 <body> 內的 <div> 中，這不是 HTML 的標準做法，
             通常 <style> 標籤應放在 <head> 或直接放在 <body> 的開頭。
             這樣做可能會影響樣式載入和渲染行為，但根據您的要求已實作。 -->
        <style>
{STYLESHEET}
        </style>
    </div>
    <div class="container">
        {category}
        <h1 class="title">{heading}</h1>
        <div class="content">
            {content}
        </div>
    </div>
</body>
</html>"#
    )
}

/// Render the category breadcrumb, or `None` when both names are empty.
///
/// Either half is omitted independently when its name is empty; the
/// separator only appears between two present halves.
fn breadcrumb(meta: &FormMetadata) -> Option<String> {
    let main = category_part(
        "cat-part-main",
        &meta.main_category_name,
        &meta.main_category_url,
    );
    let sub = category_part(
        "cat-part-sub",
        &meta.sub_category_name,
        &meta.sub_category_url,
    );

    let inner = match (main, sub) {
        (Some(main), Some(sub)) => format!("{main}{CATEGORY_SEPARATOR}{sub}"),
        (Some(single), None) | (None, Some(single)) => single,
        (None, None) => return None,
    };
    Some(format!(r#"<div class="category-wrapper">{inner}</div>"#))
}

/// One breadcrumb half: the label span, linkified when a URL is set.
fn category_part(class: &str, name: &str, url: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let label = html_escape::encode_text(name);
    let inner = if url.is_empty() {
        label.into_owned()
    } else {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            html_escape::encode_double_quoted_attribute(url),
            label
        )
    };
    Some(format!(r#"<span class="{class}">{inner}</span>"#))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn meta(main: &str, main_url: &str, sub: &str, sub_url: &str, title: &str) -> FormMetadata {
        FormMetadata {
            main_category_name: main.to_string(),
            main_category_url: main_url.to_string(),
            sub_category_name: sub.to_string(),
            sub_category_url: sub_url.to_string(),
            title_text: title.to_string(),
        }
    }

    // ============ Shell tests ============

    #[test]
    fn shell_contains_doctype_head_and_stylesheet() {
        let html = generate(&FormMetadata::default(), "");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="zh-TW">"#));
        assert!(html.contains(r#"<meta charset="UTF-8">"#));
        assert!(html.contains("width=device-width, initial-scale=1.0"));
        assert!(html.contains(STYLESHEET));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn empty_title_falls_back_per_slot() {
        let html = generate(&FormMetadata::default(), "");
        assert!(html.contains("<title>無標題文件</title>"));
        assert!(html.contains(r#"<h1 class="title">無標題</h1>"#));
    }

    #[test]
    fn title_is_escaped_into_both_slots() {
        let html = generate(&meta("", "", "", "", "a <b> c"), "");
        assert!(html.contains("<title>a &lt;b&gt; c</title>"));
        assert!(html.contains(r#"<h1 class="title">a &lt;b&gt; c</h1>"#));
    }

    #[test]
    fn content_is_embedded_verbatim() {
        let content = r#"<p><strong>x</strong></p><figure><img src="u" alt="a" /><figcaption>▲ c</figcaption></figure>"#;
        let html = generate(&FormMetadata::default(), content);
        assert!(html.contains(content));
    }

    #[test]
    fn generation_is_idempotent() {
        let meta = meta("科技", "https://t", "AI", "", "標題");
        let content = "<p>body</p>";
        assert_eq!(generate(&meta, content), generate(&meta, content));
    }

    // ============ Breadcrumb tests ============

    #[test]
    fn breadcrumb_with_both_halves_uses_separator() {
        let html = generate(&meta("科技", "", "AI", "", ""), "");
        assert!(html.contains(
            r#"<div class="category-wrapper"><span class="cat-part-main">科技</span> &gt; <span class="cat-part-sub">AI</span></div>"#
        ));
    }

    #[test]
    fn breadcrumb_links_halves_with_urls() {
        let html = generate(&meta("科技", "https://t", "AI", "https://a", ""), "");
        assert!(html.contains(
            r#"<span class="cat-part-main"><a href="https://t" target="_blank" rel="noopener noreferrer">科技</a></span>"#
        ));
        assert!(html.contains(
            r#"<span class="cat-part-sub"><a href="https://a" target="_blank" rel="noopener noreferrer">AI</a></span>"#
        ));
    }

    #[rstest]
    #[case("Tech", "", "only main")]
    #[case("", "Tech", "only sub")]
    fn breadcrumb_single_half_has_no_separator(
        #[case] main: &str,
        #[case] sub: &str,
        #[case] _label: &str,
    ) {
        let html = generate(&meta(main, "", sub, "", ""), "");
        assert!(html.contains(r#"<span class="cat-part-"#));
        assert!(!html.contains(CATEGORY_SEPARATOR));
        assert!(html.contains("Tech"));
    }

    #[test]
    fn breadcrumb_omitted_when_both_names_empty() {
        let html = generate(&meta("", "https://ignored", "", "", ""), "");
        assert!(!html.contains("category-wrapper"));
    }
}
