//! Outbound email payload.

use serde::{Deserialize, Serialize};

/// A fully composed email ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// HTML body.
    pub html: String,
}

impl OutgoingEmail {
    /// Build an email whose HTML part is the text wrapped in paragraphs.
    pub fn plain(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let html = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| format!("<p>{}</p>", escape_html(line)))
            .collect::<Vec<_>>()
            .join("");
        Self {
            to: to.into(),
            subject: subject.into(),
            text,
            html,
        }
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_wraps_lines_and_escapes() {
        let email = OutgoingEmail::plain("a@b.c", "Hi", "Tom & Jerry\n\n<b>bold</b>");
        assert_eq!(email.html, "<p>Tom &amp; Jerry</p><p>&lt;b&gt;bold&lt;/b&gt;</p>");
        assert_eq!(email.text, "Tom & Jerry\n\n<b>bold</b>");
    }
}
