//! Code block rendering with syntax highlighting

use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::html_escape;

/// Languages the authoring surface offers, mapped to the token used for
/// syntax lookup. Anything not in this table renders as plain text.
const LANGUAGES: &[(&str, &str)] = &[
    ("tcl", "tcl"),
    ("python", "python"),
    ("bash", "bash"),
    ("shell", "bash"),
    ("verilog", "verilog"),
    ("systemverilog", "verilog"),
    ("c", "c"),
    ("vhdl", "vhdl"),
];

/// Map a free-form language label through the allow-list,
/// case-insensitively.
pub fn resolve_language(language: &str) -> Option<&'static str> {
    let lowered = language.trim().to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, token)| *token)
}

/// Renders code blocks to HTML with syntax highlighting
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl CodeHighlighter {
    /// Create a highlighter with the default light theme
    pub fn new() -> Self {
        Self::with_options("InspiredGitHub", true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render a complete code block: language header plus highlighted body.
    ///
    /// The copy button is a hook for the page's script; the renderer only
    /// emits the markup.
    pub fn render(&self, code: &str, language: &str) -> String {
        let label = if language.trim().is_empty() {
            "code".to_string()
        } else {
            html_escape(language.trim())
        };

        let body = match resolve_language(language) {
            Some(token) => self.highlight(code, token),
            None => plain_code_block(code, "text"),
        };

        format!(
            r#"<figure class="code-block"><div class="code-header"><span class="code-lang">{}</span><button type="button" class="copy-code" data-copy-code>Copy</button></div>{}</figure>"#,
            label, body
        )
    }

    /// Highlight code for a known language token.
    fn highlight(&self, code: &str, token: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_extension(token))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("No themes available")
            });

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => {
                if self.line_numbers {
                    self.add_line_numbers(&highlighted, token)
                } else {
                    format!(
                        r#"<div class="highlight language-{}">{}</div>"#,
                        token, highlighted
                    )
                }
            }
            Err(_) => plain_code_block(code, token),
        }
    }

    /// Add a line-number gutter next to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();
        let line_count = lines.len();

        let mut gutter = String::new();
        let mut code_lines = String::new();

        for (i, line) in lines.iter().enumerate() {
            gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
            if i < line_count - 1 {
                gutter.push('\n');
            }

            code_lines.push_str(line);
            if i < line_count - 1 {
                code_lines.push('\n');
            }
        }

        format!(
            r#"<div class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></div>"#,
            lang, gutter, code_lines
        )
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Unhighlighted fallback block
fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        lang,
        html_escape(code)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_language_case_insensitive() {
        assert_eq!(resolve_language("Python"), Some("python"));
        assert_eq!(resolve_language("TCL"), Some("tcl"));
        assert_eq!(resolve_language("SystemVerilog"), Some("verilog"));
        assert_eq!(resolve_language("shell"), Some("bash"));
    }

    #[test]
    fn test_resolve_language_miss() {
        assert_eq!(resolve_language("cobol"), None);
        assert_eq!(resolve_language(""), None);
    }

    #[test]
    fn test_known_language_highlights() {
        let highlighter = CodeHighlighter::new();
        let html = highlighter.render("x = 1", "python");
        assert!(html.contains("code-block"));
        assert!(html.contains("highlight"));
        assert!(html.contains("python"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let highlighter = CodeHighlighter::new();
        let html = highlighter.render("MOVE A TO B", "cobol");
        assert!(html.contains("language-text"));
        assert!(html.contains("MOVE A TO B"));
        assert!(!html.contains(r#"class="highlight"#));
    }

    #[test]
    fn test_plain_fallback_escapes_code() {
        let html = plain_code_block("if a < b { }", "text");
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn test_empty_language_labelled_code() {
        let highlighter = CodeHighlighter::new();
        let html = highlighter.render("data", "");
        assert!(html.contains(r#"<span class="code-lang">code</span>"#));
    }
}
