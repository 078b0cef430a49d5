//! Published post rendering with GitHub Flavored Markdown.

use anyhow::{Context, Result};
use comrak::Options;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Renders stored post bodies to HTML for the post detail page.
///
/// Unlike the editor preview, published content is visible to every reader,
/// so raw HTML in the source is escaped by comrak rather than passed through.
/// Fenced code with a language tag is highlighted with syntect using CSS
/// classes (`hl-` prefix) styled by `post.css`.
pub struct PostRenderer<'a> {
    options: Options<'a>,
    syntax_set: SyntaxSet,
}

impl Default for PostRenderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PostRenderer<'a> {
    /// Creates renderer with GFM extensions enabled.
    pub fn new() -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;

        options.parse.smart = true;

        // Readers see other authors' posts
        options.render.unsafe_ = false;
        options.render.escape = true;

        Self {
            options,
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Renders post content to HTML.
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting of a code block fails
    pub fn render(&self, content: &str) -> Result<String> {
        let html = comrak::markdown_to_html(content, &self.options);
        self.highlight_code_blocks(&html)
    }

    /// Renders post content, falling back to unhighlighted HTML on failure.
    pub fn render_or_plain(&self, content: &str) -> String {
        self.render(content).unwrap_or_else(|e| {
            crate::log!("render"; "highlighting failed, using plain output: {:#}", e);
            comrak::markdown_to_html(content, &self.options)
        })
    }

    /// Replaces the body of every `<code class="language-X">` block with
    /// classed spans from syntect.
    fn highlight_code_blocks(&self, html: &str) -> Result<String> {
        const OPEN: &str = "<code class=\"language-";
        const CLOSE: &str = "</code>";

        let mut result = String::with_capacity(html.len());
        let mut last_end = 0;
        let mut search_pos = 0;

        while let Some(offset) = html[search_pos..].find(OPEN) {
            let code_start = search_pos + offset;
            let lang_start = code_start + OPEN.len();

            let Some(lang_len) = html[lang_start..].find('"') else {
                search_pos = code_start + 1;
                continue;
            };
            let lang_end = lang_start + lang_len;
            let language = &html[lang_start..lang_end];

            let Some(tag_len) = html[lang_end..].find('>') else {
                search_pos = code_start + 1;
                continue;
            };
            let content_start = lang_end + tag_len + 1;

            let Some(content_len) = html[content_start..].find(CLOSE) else {
                search_pos = code_start + 1;
                continue;
            };
            let content_end = content_start + content_len;

            let code = html_decode(&html[content_start..content_end]);
            let highlighted = self
                .highlight(&code, language)
                .with_context(|| format!("Failed to highlight {} block", language))?;

            result.push_str(&html[last_end..code_start]);
            result.push_str(OPEN);
            result.push_str(language);
            result.push_str("\">");
            result.push_str(&highlighted);
            result.push_str(CLOSE);

            last_end = content_end + CLOSE.len();
            search_pos = last_end;
        }

        result.push_str(&html[last_end..]);
        Ok(result)
    }

    fn highlight(&self, code: &str, language: &str) -> Result<String> {
        if code.is_empty() {
            return Ok(String::new());
        }

        let Some(syntax) = self
            .syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
        else {
            return Ok(html_escape(code));
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed { prefix: "hl-" },
        );

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for highlighting")?;
        }

        Ok(generator.finalize())
    }
}

/// Reverses the entity escaping comrak applies inside code blocks.
fn html_decode(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub(crate) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
