//! Splits a problem file into literal words.
//!
//! Whitespace, `// line` comments and `/* block */` comments separate words.
//! A word is not interpreted here: `3`, `-1/2` and `1.5` are all literals, and
//! the parser decides which ones are valid numbers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Literal,
    /// A `/*` that runs to the end of the input
    UnterminatedComment,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }
}

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// All tokens of `source`, always ending with an `Eof` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = Lexer::new(source).collect();
        let end = source.len();
        tokens.push(Token::new(TokenKind::Eof, Span::new(end, end), ""));
        tokens
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Skips whitespace and comments. Returns a token only for a block
    /// comment that is never closed.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else if let Some(body) = trimmed.strip_prefix("/*") {
                match body.find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => {
                        let start = self.pos;
                        self.pos = self.source.len();
                        return Some(Token::new(
                            TokenKind::UnterminatedComment,
                            Span::new(start, self.pos),
                            trimmed,
                        ));
                    }
                }
            } else {
                return None;
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(comment) = self.skip_trivia() {
            return Some(comment);
        }
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }

        let len = literal_len(rest);
        let start = self.pos;
        self.pos += len;
        Some(Token::new(
            TokenKind::Literal,
            Span::new(start, self.pos),
            &rest[..len],
        ))
    }
}

/// Length of the word at the start of `text`, which ends at whitespace or at
/// the opening of a comment.
fn literal_len(text: &str) -> usize {
    text.char_indices()
        .find(|&(i, c)| {
            c.is_whitespace() || text[i..].starts_with("//") || text[i..].starts_with("/*")
        })
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
