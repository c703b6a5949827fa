//! Lexer (tokenizer) for wirelang scripts.

use wl_core::units::parse_si;

use crate::error::{ScriptError, ScriptResult};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Identifier text, unescaped string contents, or the raw number text.
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    /// A number, possibly with an SI suffix ("4.7k")
    Number,
    Str,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Colon,
    Semicolon,
    Dot,
    Equals,
    Minus,
    Eof,
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> ScriptResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '/' && self.peek_at(1) == Some('/') {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    pub fn next_token(&mut self) -> ScriptResult<Token> {
        self.skip_whitespace_and_comments();

        let (line, column) = (self.line, self.column);
        let token = |kind, text: String| Token {
            kind,
            text,
            line,
            column,
        };

        let Some(ch) = self.peek() else {
            return Ok(token(TokenKind::Eof, String::new()));
        };

        let punct = match ch {
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            '{' => Some(TokenKind::OpenBrace),
            '}' => Some(TokenKind::CloseBrace),
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            ';' => Some(TokenKind::Semicolon),
            '.' => Some(TokenKind::Dot),
            '=' => Some(TokenKind::Equals),
            '-' => Some(TokenKind::Minus),
            _ => None,
        };
        if let Some(kind) = punct {
            self.advance();
            return Ok(token(kind, ch.to_string()));
        }

        match ch {
            '"' => {
                let text = self.read_string(line, column)?;
                Ok(token(TokenKind::Str, text))
            }
            '0'..='9' => {
                let text = self.read_number();
                parse_si(&text).map_err(|_| {
                    ScriptError::lex(line, column, format!("invalid number '{text}'"))
                })?;
                Ok(token(TokenKind::Number, text))
            }
            _ if ch.is_alphabetic() || ch == '_' => {
                let text = self.read_identifier();
                Ok(token(TokenKind::Identifier, text))
            }
            _ => Err(ScriptError::lex(
                line,
                column,
                format!("unexpected character '{ch}'"),
            )),
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            text.push(ch);
            self.advance();
        }
    }

    /// Digits, optional fraction, optional exponent, then any SI suffix
    /// letters ("meg", "k", "µ").
    fn read_number(&mut self) -> String {
        let mut text = String::new();
        self.read_digits(&mut text);

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let exp_digit = match self.peek_at(1) {
                Some('-' | '+') => self.peek_at(2).is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if exp_digit {
                for _ in 0..2 {
                    if let Some(c) = self.advance() {
                        text.push(c);
                    }
                }
                self.read_digits(&mut text);
            }
        }

        while let Some(ch) = self.peek().filter(|c| c.is_alphabetic()) {
            text.push(ch);
            self.advance();
        }
        text
    }

    fn read_string(&mut self, line: usize, column: usize) -> ScriptResult<String> {
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.advance() {
                None | Some('\n') => {
                    return Err(ScriptError::lex(line, column, "unterminated string"));
                }
                Some('"') => return Ok(text),
                Some('\\') => {
                    let escaped = match self.advance() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('"') => '"',
                        Some('\\') => '\\',
                        other => {
                            return Err(ScriptError::lex(
                                self.line,
                                self.column,
                                format!("invalid escape {other:?}"),
                            ));
                        }
                    };
                    text.push(escaped);
                }
                Some(c) => text.push(c),
            }
        }
    }
}

pub fn tokenize(input: &str) -> ScriptResult<Vec<Token>> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn statement_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("let r1 = R(4.7k); // load"),
            [Identifier, Identifier, Equals, Identifier, OpenParen, Number, CloseParen, Semicolon, Eof]
        );
    }

    #[test]
    fn numbers_with_suffixes_and_exponents() {
        let tokens = tokenize("1meg 2.2e-9 10u 0.5").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["1meg", "2.2e-9", "10u", "0.5", ""]);
    }

    #[test]
    fn pin_reference() {
        use TokenKind::*;
        assert_eq!(kinds(r#"r1."1""#), [Identifier, Dot, Str, Eof]);
    }

    #[test]
    fn string_escapes() {
        let tokens = tokenize(r#""a \"q\" \\ b""#).unwrap();
        assert_eq!(tokens[0].text, r#"a "q" \ b"#);
    }

    #[test]
    fn positions_are_tracked() {
        let tokens = tokenize("use \"x\";\n  node();").unwrap();
        let node = &tokens[3];
        assert_eq!((node.line, node.column), (2, 3));
    }

    #[test]
    fn errors() {
        assert!(matches!(tokenize("\"open"), Err(ScriptError::Lex { .. })));
        assert!(matches!(tokenize("4.7x"), Err(ScriptError::Lex { .. })));
        assert!(matches!(tokenize("a # b"), Err(ScriptError::Lex { .. })));
    }
}
