//! Server-rendered HTML.
//!
//! Every function here is pure: data in, markup out. Anything user supplied
//! goes through [`escape`] before it lands in the output.

mod components;
mod pages;

pub use components::{event_card, navbar};
pub use pages::{event_page, home_page, not_found_page, Notice};

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }
}
