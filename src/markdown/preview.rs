//! Live preview renderer for the post editor.
//!
//! Rewrites a markdown draft into HTML through a fixed sequence of textual
//! passes. Fenced code blocks are lifted out before any other pass runs and
//! put back verbatim at the end, so nothing inside a fence is ever rewritten.
//!
//! List items are never grouped into a list container and every quoted line
//! becomes its own blockquote. User text is not escaped: the output is meant
//! for the author's own draft only.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Opening fence with an optional language token, body, closing fence.
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:[\w+#.-]*\n)?(.*?)\n?```").unwrap());

/// Stand-in left where a fence was lifted out. Starts with `<` so the
/// paragraph pass treats it as markup.
static FENCE_SLOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\x{E000}(\d+)\x{E000}>").unwrap());

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(#{1,3}) (.+)$").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());
static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^> (.+)$").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());
static UNORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^- (.+)$").unwrap());
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[0-9]+\. (.+)$").unwrap());
static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^---$").unwrap());
static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n([^<\n].*)").unwrap());

/// One textual rewrite applied after fences have been lifted out.
///
/// Variants are listed in application order; see [`Pass::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Heading,
    Bold,
    Italic,
    InlineCode,
    Blockquote,
    Link,
    UnorderedItem,
    OrderedItem,
    Rule,
    Paragraph,
}

impl Pass {
    /// Application order. Bold must precede italic, otherwise the single
    /// asterisk pattern would split every `**` delimiter.
    pub const ORDER: [Pass; 10] = [
        Pass::Heading,
        Pass::Bold,
        Pass::Italic,
        Pass::InlineCode,
        Pass::Blockquote,
        Pass::Link,
        Pass::UnorderedItem,
        Pass::OrderedItem,
        Pass::Rule,
        Pass::Paragraph,
    ];

    /// Applies this pass to the whole text.
    pub fn apply(self, text: &str) -> String {
        match self {
            Pass::Heading => HEADING
                .replace_all(text, |caps: &Captures| {
                    let level = caps[1].len();
                    format!("<h{level} class=\"md-h{level}\">{}</h{level}>", &caps[2])
                })
                .into_owned(),
            Pass::Bold => BOLD
                .replace_all(text, "<strong class=\"md-strong\">${1}</strong>")
                .into_owned(),
            Pass::Italic => ITALIC
                .replace_all(text, "<em class=\"md-em\">${1}</em>")
                .into_owned(),
            Pass::InlineCode => INLINE_CODE
                .replace_all(text, "<code class=\"md-code\">${1}</code>")
                .into_owned(),
            Pass::Blockquote => BLOCKQUOTE
                .replace_all(text, "<blockquote class=\"md-quote\">${1}</blockquote>")
                .into_owned(),
            Pass::Link => LINK
                .replace_all(
                    text,
                    "<a href=\"${2}\" class=\"md-link\" target=\"_blank\">${1}</a>",
                )
                .into_owned(),
            Pass::UnorderedItem => UNORDERED_ITEM
                .replace_all(
                    text,
                    "<li class=\"md-ul\"><span class=\"md-bullet\">•</span><span>${1}</span></li>",
                )
                .into_owned(),
            Pass::OrderedItem => ORDERED_ITEM
                .replace_all(text, "<li class=\"md-ol\">${1}</li>")
                .into_owned(),
            Pass::Rule => RULE.replace_all(text, "<hr class=\"md-hr\" />").into_owned(),
            Pass::Paragraph => PARAGRAPH
                .replace_all(text, "\n\n<p class=\"md-p\">${1}</p>")
                .into_owned(),
        }
    }
}

/// Renders a markdown draft to HTML for the editor preview pane.
///
/// Total over all input: unmatched text passes through unchanged and the
/// empty string renders to the empty string. Line endings are normalized to
/// `\n` before any pass runs.
///
/// # Examples
///
/// ```
/// use devlog::render_preview;
///
/// let html = render_preview("# Title");
/// assert_eq!(html, "<h1 class=\"md-h1\">Title</h1>");
/// ```
pub fn render(source: &str) -> String {
    let source = source.replace("\r\n", "\n");
    let (text, fences) = lift_fences(&source);

    let text = Pass::ORDER
        .iter()
        .fold(text, |text, pass| pass.apply(&text));

    restore_fences(&text, &fences)
}

/// Replaces every fenced block with a numbered slot and returns the bodies.
fn lift_fences(source: &str) -> (String, Vec<String>) {
    let mut bodies = Vec::new();
    let text = FENCE
        .replace_all(source, |caps: &Captures| {
            let slot = format!("<\u{E000}{}\u{E000}>", bodies.len());
            bodies.push(caps[1].to_string());
            slot
        })
        .into_owned();
    (text, bodies)
}

fn restore_fences(text: &str, bodies: &[String]) -> String {
    if bodies.is_empty() {
        return text.to_string();
    }

    FENCE_SLOT
        .replace_all(text, |caps: &Captures| {
            match caps[1].parse::<usize>().ok().and_then(|i| bodies.get(i)) {
                Some(body) => format!("<pre class=\"md-pre\"><code>{body}</code></pre>"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_renders_empty() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_plain_text_passes_through() {
        // Arrange
        let source = "just some words, nothing special";

        // Act
        let html = render(source);

        // Assert
        assert_eq!(html, source);
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(render("# Title"), "<h1 class=\"md-h1\">Title</h1>");
        assert_eq!(render("## Sub"), "<h2 class=\"md-h2\">Sub</h2>");
        assert_eq!(render("### Minor"), "<h3 class=\"md-h3\">Minor</h3>");
    }

    #[test]
    fn test_heading_requires_space_and_line_start() {
        assert_eq!(render("#NoSpace"), "#NoSpace");
        assert_eq!(render("#### Four"), "#### Four");
        assert_eq!(render("text # not heading"), "text # not heading");
    }

    #[test]
    fn test_heading_anchored_per_line() {
        // Arrange
        let source = "intro\n## Second";

        // Act
        let html = render(source);

        // Assert
        assert_eq!(html, "intro\n<h2 class=\"md-h2\">Second</h2>");
    }

    #[test]
    fn test_bold_and_italic_not_nested() {
        // Act
        let html = render("**bold** and *italic*");

        // Assert
        assert_eq!(
            html,
            "<strong class=\"md-strong\">bold</strong> and <em class=\"md-em\">italic</em>"
        );
    }

    #[test]
    fn test_emphasis_inside_heading() {
        let html = render("# A **strong** title");

        assert_eq!(
            html,
            "<h1 class=\"md-h1\">A <strong class=\"md-strong\">strong</strong> title</h1>"
        );
    }

    #[test]
    fn test_fenced_block_holds_exact_content() {
        // Act
        let html = render("```\ncode\n```");

        // Assert
        assert_eq!(html, "<pre class=\"md-pre\"><code>code</code></pre>");
    }

    #[test]
    fn test_fenced_block_is_opaque() {
        // Arrange
        let source = "```rust\n# not a heading\nlet s = \"**bold**\";\n- item\n```";

        // Act
        let html = render(source);

        // Assert
        assert!(html.contains("**bold**"), "Fence content rewritten: {html}");
        assert!(html.contains("# not a heading"));
        assert!(html.contains("- item"));
        assert!(!html.contains("<strong"));
        assert!(!html.contains("<h1"));
        assert!(!html.contains("<li"));
        assert!(!html.contains("rust"), "Language token should be dropped");
    }

    #[test]
    fn test_fence_after_blank_line_not_wrapped_in_paragraph() {
        let html = render("intro\n\n```\nx\n```");

        assert_eq!(html, "intro\n\n<pre class=\"md-pre\"><code>x</code></pre>");
    }

    #[test]
    fn test_multiple_fences() {
        let html = render("```\na\n```\ntext\n```\nb\n```");

        assert_eq!(html.matches("<pre class=\"md-pre\">").count(), 2);
        assert!(html.contains("<code>a</code>"));
        assert!(html.contains("<code>b</code>"));
    }

    #[test]
    fn test_unterminated_fence_left_alone() {
        let html = render("```\nnever closed");

        assert!(!html.contains("<pre"));
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            render("use `cargo`"),
            "use <code class=\"md-code\">cargo</code>"
        );
    }

    #[test]
    fn test_each_quote_line_is_its_own_blockquote() {
        let html = render("> one\n> two");

        assert_eq!(html.matches("<blockquote").count(), 2);
        assert!(html.contains(">one</blockquote>"));
        assert!(html.contains(">two</blockquote>"));
    }

    #[test]
    fn test_link_opens_new_context() {
        let html = render("[docs](https://docs.rs)");

        assert_eq!(
            html,
            "<a href=\"https://docs.rs\" class=\"md-link\" target=\"_blank\">docs</a>"
        );
    }

    #[test]
    fn test_list_items_not_grouped() {
        // Act
        let html = render("- a\n- b\n1. first\n2. second");

        // Assert
        assert!(!html.contains("<ul"));
        assert!(!html.contains("<ol"));
        assert_eq!(html.matches("<li class=\"md-ul\">").count(), 2);
        assert_eq!(html.matches("<li class=\"md-ol\">").count(), 2);
        assert!(html.contains("•"));
    }

    #[test]
    fn test_horizontal_rule_exact_line_only() {
        assert_eq!(render("---"), "<hr class=\"md-hr\" />");
        assert_eq!(render("----"), "----");
    }

    #[test]
    fn test_paragraph_after_blank_line() {
        // Act
        let html = render("first\n\nsecond\n\nthird");

        // Assert
        assert_eq!(
            html,
            "first\n\n<p class=\"md-p\">second</p>\n\n<p class=\"md-p\">third</p>"
        );
    }

    #[test]
    fn test_markup_lines_not_wrapped_in_paragraph() {
        let html = render("intro\n\n## Heading\n\n- item");

        assert!(!html.contains("<p class=\"md-p\"><h2"));
        assert!(!html.contains("<p class=\"md-p\"><li"));
    }

    #[test]
    fn test_crlf_normalized() {
        let html = render("a\r\n\r\nb");

        assert_eq!(html, "a\n\n<p class=\"md-p\">b</p>");
    }

    #[test]
    fn test_user_text_is_not_escaped() {
        let html = render("<span>raw</span>");

        assert_eq!(html, "<span>raw</span>");
    }

    #[test]
    fn test_dollar_signs_survive_replacement() {
        let html = render("**$1 and $2**");

        assert_eq!(html, "<strong class=\"md-strong\">$1 and $2</strong>");
    }

    #[test]
    fn test_pass_order_is_fixed() {
        assert_eq!(Pass::ORDER.first(), Some(&Pass::Heading));
        assert_eq!(Pass::ORDER.last(), Some(&Pass::Paragraph));
        let bold = Pass::ORDER.iter().position(|p| *p == Pass::Bold);
        let italic = Pass::ORDER.iter().position(|p| *p == Pass::Italic);
        assert!(bold < italic);
    }

    #[test]
    fn test_large_draft_renders() {
        // Arrange
        let section = "## Section\n\nSome **bold** text with `code` and a [link](https://x.y).\n\n- item\n1. step\n\n```\nfn main() {}\n```\n\n";
        let source = section.repeat(500);

        // Act
        let html = render(&source);

        // Assert
        assert_eq!(html.matches("<h2").count(), 500);
        assert_eq!(html.matches("<pre").count(), 500);
    }
}
