//! Lexical bracket-nesting engine for C-family and JavaScript sources.
//!
//! Level 0 covers the whole document; every bracket pair at depth `d`
//! yields a span of level `d + 1` from the opening to the closing bracket.
//! String literals and comments are skipped so brackets inside them do not
//! count. Offsets are `char` offsets.

use super::{Analysis, EngineOptions, LevelEngine};
use crate::colorize::LevelSpan;

/// Only `{}` blocks open a level.
pub const MODE_MINI: &str = "mini";
/// `{}`, `()` and `[]` all open a level.
pub const MODE_FULL: &str = "full";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brackets {
    Braces,
    All,
}

impl Brackets {
    fn from_options(options: &EngineOptions) -> Option<Self> {
        let mode = options
            .get("mode")
            .and_then(|mode| mode.as_str())
            .unwrap_or(MODE_MINI);
        match mode {
            MODE_MINI => Some(Brackets::Braces),
            MODE_FULL => Some(Brackets::All),
            _ => None,
        }
    }

    fn closing_for(self, open: char) -> Option<char> {
        match (self, open) {
            (_, '{') => Some('}'),
            (Brackets::All, '(') => Some(')'),
            (Brackets::All, '[') => Some(']'),
            _ => None,
        }
    }

    fn is_closing(self, c: char) -> bool {
        match self {
            Brackets::Braces => c == '}',
            Brackets::All => matches!(c, '}' | ')' | ']'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    String(char),
    LineComment,
    BlockComment,
}

#[derive(Debug, Default)]
pub struct NestingEngine;

impl NestingEngine {
    pub fn new() -> Self {
        Self
    }

    fn spans(source: &str, brackets: Brackets) -> Option<Vec<LevelSpan>> {
        let chars: Vec<char> = source.chars().collect();
        if chars.is_empty() {
            return Some(Vec::new());
        }

        let mut spans = vec![LevelSpan::new(0, 0, chars.len() - 1)];
        // (expected closing bracket, offset of the opening bracket)
        let mut open: Vec<(char, usize)> = Vec::new();
        let mut state = Lexeme::Code;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();
            match state {
                Lexeme::Code => match (c, next) {
                    ('/', Some('/')) => {
                        state = Lexeme::LineComment;
                        i += 1;
                    }
                    ('/', Some('*')) => {
                        state = Lexeme::BlockComment;
                        i += 1;
                    }
                    ('"' | '\'' | '`', _) => state = Lexeme::String(c),
                    _ => {
                        if let Some(close) = brackets.closing_for(c) {
                            open.push((close, i));
                        } else if brackets.is_closing(c) {
                            let (expected, start) = open.pop()?;
                            if expected != c {
                                return None;
                            }
                            spans.push(LevelSpan::new(open.len() + 1, start, i));
                        }
                    }
                },
                Lexeme::String(quote) => {
                    if c == '\\' {
                        i += 1;
                    } else if c == quote {
                        state = Lexeme::Code;
                    }
                }
                Lexeme::LineComment => {
                    if c == '\n' {
                        state = Lexeme::Code;
                    }
                }
                Lexeme::BlockComment => {
                    if c == '*' && next == Some('/') {
                        state = Lexeme::Code;
                        i += 1;
                    }
                }
            }
            i += 1;
        }

        open.is_empty().then_some(spans)
    }
}

impl LevelEngine for NestingEngine {
    fn analyze(&self, source: &str, options: &EngineOptions) -> Analysis {
        let Some(brackets) = Brackets::from_options(options) else {
            log::warn!(
                target: "levels::engine",
                "Unknown nesting mode in options: {}",
                options
            );
            return Analysis::NoResult;
        };

        Self::spans(source, brackets).map_or(Analysis::NoResult, Analysis::Levels)
    }
}
