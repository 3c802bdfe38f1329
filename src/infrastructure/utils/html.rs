/// Escapes text for use in HTML element content and quoted attribute values.
///
/// Whitespace and `/` come out as numeric references too; browsers read them
/// back as the original characters, including inside `value="…"`.
pub fn escape_html(raw: &str) -> String {
    ammonia::clean_text(raw)
}

/// Only http(s) links are rendered as `src`/`href`; anything else becomes empty.
pub fn safe_link(raw: &str) -> String {
    match url::Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => escape_html(url.as_str()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unescape(html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut rest = html;
        while let Some(start) = rest.find('&') {
            out.push_str(&rest[..start]);
            rest = &rest[start..];
            let Some(end) = rest.find(';') else { break };
            let entity = &rest[1..end];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "grave" => Some('`'),
                _ => entity
                    .strip_prefix('#')
                    .and_then(|n| n.parse::<u32>().ok())
                    .and_then(char::from_u32),
            };
            match decoded {
                Some(c) => {
                    out.push(c);
                    rest = &rest[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    #[test]
    fn escapes_markup_characters() {
        let escaped = escape_html(r#"<a href="x">Tom & Jerry's</a>"#);
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('"'));
        assert!(escaped.contains("&lt;a"));
        assert!(escaped.contains("&amp;"));
        assert_eq!(unescape(&escaped), r#"<a href="x">Tom & Jerry's</a>"#);
    }

    #[test]
    fn escaped_text_reads_back_unchanged() {
        let title = "Successfully added skill";
        assert_eq!(unescape(&escape_html(title)), title);
        assert_eq!(unescape(&escape_html("Computer Science")), "Computer Science");
    }

    #[test]
    fn safe_link_drops_script_urls() {
        assert_eq!(safe_link("javascript:alert(1)"), "");
        assert_eq!(unescape(&safe_link("https://x.test/g.png")), "https://x.test/g.png");
    }
}
