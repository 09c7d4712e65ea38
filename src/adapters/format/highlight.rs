//! Best-effort terminal syntax highlighting for rendered payloads.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

#[derive(Debug, Clone, Copy)]
pub(super) enum Grammar {
    Json,
    Xml,
}

impl Grammar {
    fn extension(self) -> &'static str {
        match self {
            Grammar::Json => "json",
            Grammar::Xml => "xml",
        }
    }
}

fn syntax_set() -> &'static SyntaxSet {
    static SET: OnceLock<SyntaxSet> = OnceLock::new();
    SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        ThemeSet::load_defaults()
            .themes
            .remove("base16-ocean.dark")
            .unwrap_or_default()
    })
}

/// Highlights `body` under the given grammar; any failure falls back to
/// the unmodified body.
pub(super) fn highlight(body: &str, grammar: Grammar) -> String {
    let set = syntax_set();
    let Some(syntax) = set.find_syntax_by_extension(grammar.extension()) else {
        return body.to_string();
    };

    let mut lines = HighlightLines::new(syntax, theme());
    let mut out = String::with_capacity(body.len());
    for line in LinesWithEndings::from(body) {
        match lines.highlight_line(line, set) {
            Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges[..], false)),
            Err(_) => return body.to_string(),
        }
    }
    out
}
