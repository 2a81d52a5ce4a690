use exactlp_solver::{ParseRationalError, Problem, Rational, SolveError};
use thiserror::Error;

use crate::lexer::{Lexer, Span, Token, TokenKind};

#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("Unexpected token: expected {expected}, found {found} at position {span:?}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Invalid rational {text}: {source}")]
    InvalidRational {
        text: String,
        source: ParseRationalError,
    },
    #[error("Invalid problem: {0}")]
    InvalidProblem(#[from] SolveError),
}

/// Reads a problem file: `m n`, then the `m` rows of A, then b, then c.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(source: &str) -> Result<Problem, ParseError> {
        let tokens = Lexer::tokenize(source);
        let mut parser = Parser::new(tokens);
        parser.parse_problem()
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// The next literal, or an error for the end of input or an unclosed comment.
    fn expect_literal(&mut self) -> Result<Token, ParseError> {
        let token = self.current().cloned().ok_or(ParseError::UnexpectedEof)?;
        match token.kind {
            TokenKind::Literal => {
                self.pos += 1;
                Ok(token)
            }
            TokenKind::Eof => Err(ParseError::UnexpectedEof),
            TokenKind::UnterminatedComment => Err(ParseError::UnexpectedToken {
                expected: "number".to_string(),
                found: "unterminated comment".to_string(),
                span: token.span,
            }),
        }
    }

    fn parse_problem(&mut self) -> Result<Problem, ParseError> {
        let m = self.parse_dimension()?;
        let n = self.parse_dimension()?;

        let mut constraints = Vec::with_capacity(m);
        for _ in 0..m {
            constraints.push(self.parse_row(n)?);
        }
        let rhs = self.parse_row(m)?;
        let objective = self.parse_row(n)?;

        if let Some(token) = self.current().filter(|t| t.kind != TokenKind::Eof) {
            return Err(ParseError::UnexpectedToken {
                expected: "end of file".to_string(),
                found: format!("{:?}", token.text),
                span: token.span,
            });
        }

        Ok(Problem::new(constraints, rhs, objective)?)
    }

    fn parse_dimension(&mut self) -> Result<usize, ParseError> {
        let token = self.expect_literal()?;
        token
            .text
            .parse()
            .map_err(|_| ParseError::InvalidNumber(token.text))
    }

    fn parse_row(&mut self, len: usize) -> Result<Vec<Rational>, ParseError> {
        (0..len).map(|_| self.parse_rational()).collect()
    }

    /// `num` or `num/den` written as one word
    fn parse_rational(&mut self) -> Result<Rational, ParseError> {
        let text = self.expect_literal()?.text;
        text.parse::<Rational>()
            .map_err(|source| ParseError::InvalidRational { text, source })
    }
}
