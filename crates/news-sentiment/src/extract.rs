//! Headline candidates from the two feed shapes the news source
//! serves: RSS (`<item><title>` nodes) and HTML search results
//! (anchor text nodes). The payload decides which extractor runs.

/// Extract candidate headline texts from a feed or page body.
pub fn extract_headlines(body: &str) -> Vec<String> {
    if body.contains("<item>") || body.contains("<item ") {
        extract_rss_titles(body)
    } else {
        extract_anchor_texts(body)
    }
}

/// `<title>` text of each `<item>` block. The channel-level title is
/// outside any item and is skipped.
pub fn extract_rss_titles(body: &str) -> Vec<String> {
    let mut titles = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find("<item") {
        let after = &rest[start..];
        let end = match after.find("</item>") {
            Some(e) => e,
            None => break,
        };
        let item = &after[..end];

        if let Some(title) = inner_text(item, "title") {
            let cleaned = clean_text(&title);
            if !cleaned.is_empty() {
                titles.push(cleaned);
            }
        }
        rest = &after[end + "</item>".len()..];
    }

    titles
}

/// Text content of every `<a>` element, nested markup stripped.
pub fn extract_anchor_texts(body: &str) -> Vec<String> {
    let mut texts = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find("<a") {
        let after = &rest[start..];

        // require "<a>" or "<a ..." so <article>/<abbr> don't match
        match after.as_bytes().get(2) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') => {}
            _ => {
                rest = &after[2..];
                continue;
            }
        }

        let open_end = match after.find('>') {
            Some(e) => e,
            None => break,
        };
        let close = match after[open_end..].find("</a>") {
            Some(c) => open_end + c,
            None => break,
        };

        let cleaned = clean_text(&after[open_end + 1..close]);
        if !cleaned.is_empty() {
            texts.push(cleaned);
        }
        rest = &after[close + "</a>".len()..];
    }

    texts
}

fn inner_text(fragment: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = fragment.find(&open)? + open.len();
    let end = fragment[start..].find(&close)? + start;
    Some(fragment[start..end].to_string())
}

/// Strip CDATA wrappers and residual tags, decode common entities,
/// collapse whitespace.
fn clean_text(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    if let Some(inner) = text
        .strip_prefix("<![CDATA[")
        .and_then(|t| t.strip_suffix("]]>"))
    {
        text = inner.to_string();
    }

    // drop any nested markup (<b>, <span>, images inside anchors)
    let mut stripped = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => stripped.push(c),
            _ => {}
        }
    }

    let decoded = stripped
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0"?>
        <rss><channel>
        <title>Search results for Reliance Industries</title>
        <item><title>Reliance Industries reports strong quarterly growth</title>
            <link>https://example.com/1</link></item>
        <item><title><![CDATA[Reliance &amp; partners announce new venture]]></title></item>
        <item><link>https://example.com/3</link></item>
        </channel></rss>"#;

    const HTML: &str = r#"<html><body>
        <a href="/home">Home</a>
        <a href="/story/1"><b>Reliance Industries</b> profit beats analyst estimates</a>
        <a href="/story/2">Markets close higher as energy stocks rally &#39;sharply&#39;</a>
        <a href="/broken">no closing bracket"#;

    #[test]
    fn rss_titles_skip_channel_title() {
        let titles = extract_headlines(RSS);
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0], "Reliance Industries reports strong quarterly growth");
    }

    #[test]
    fn rss_cdata_and_entities_are_decoded() {
        let titles = extract_rss_titles(RSS);
        assert_eq!(titles[1], "Reliance & partners announce new venture");
    }

    #[test]
    fn anchor_texts_strip_nested_markup() {
        let texts = extract_headlines(HTML);
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[1], "Reliance Industries profit beats analyst estimates");
        assert_eq!(
            texts[2],
            "Markets close higher as energy stocks rally 'sharply'"
        );
    }

    #[test]
    fn empty_body_yields_nothing() {
        assert!(extract_headlines("").is_empty());
        assert!(extract_headlines("plain text, no markup").is_empty());
    }
}
