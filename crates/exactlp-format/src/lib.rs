pub mod lexer;
pub mod parser;
pub mod render;

pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use render::{render_answer, render_problem};
