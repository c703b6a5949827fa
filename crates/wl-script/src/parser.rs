//! Recursive-descent parser for wirelang scripts.

use crate::ast::{Expr, Program, Stmt, StmtKind};
use crate::error::{ScriptError, ScriptResult};
use crate::lexer::{Token, TokenKind, tokenize};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(source: &str) -> ScriptResult<Self> {
        Ok(Self {
            tokens: tokenize(source)?,
            pos: 0,
        })
    }

    /// Parse the entire script.
    pub fn parse(&mut self) -> ScriptResult<Program> {
        let mut program = Program::default();
        while self.current().kind != TokenKind::Eof {
            // Stray semicolons are empty statements
            if self.current().kind == TokenKind::Semicolon {
                self.advance();
                continue;
            }
            program.statements.push(self.parse_statement()?);
        }
        Ok(program)
    }

    fn current(&self) -> &Token {
        // tokenize always ends with Eof, and advance never moves past it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn at_keyword(&self, word: &str) -> bool {
        self.at(TokenKind::Identifier) && self.current().text == word
    }

    fn expect(&mut self, kind: TokenKind) -> ScriptResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("{kind:?}")))
        }
    }

    fn unexpected(&self, wanted: &str) -> ScriptError {
        let tok = self.current();
        let found = match tok.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", tok.text),
        };
        ScriptError::parse(tok.line, format!("expected {wanted}, found {found}"))
    }

    fn parse_statement(&mut self) -> ScriptResult<Stmt> {
        let line = self.current().line;
        let kind = if self.at_keyword("use") {
            self.advance();
            StmtKind::Use(self.expect(TokenKind::Str)?.text)
        } else if self.at_keyword("let") {
            self.advance();
            let name = self.expect(TokenKind::Identifier)?.text;
            self.expect(TokenKind::Equals)?;
            StmtKind::Let {
                name,
                value: self.parse_expr()?,
            }
        } else if self.at_keyword("export") {
            self.advance();
            let tok = self.advance();
            match tok.kind {
                TokenKind::Identifier | TokenKind::Str => StmtKind::Export(tok.text),
                _ => {
                    return Err(ScriptError::parse(
                        tok.line,
                        "expected an export name after 'export'",
                    ));
                }
            }
        } else {
            StmtKind::Expr(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt { kind, line })
    }

    fn parse_expr(&mut self) -> ScriptResult<Expr> {
        if self.at(TokenKind::Minus) {
            self.advance();
            return Ok(Expr::Neg(Box::new(self.parse_expr()?)));
        }
        let mut expr = self.parse_primary()?;
        while self.at(TokenKind::Dot) {
            self.advance();
            let tok = self.advance();
            let name = match tok.kind {
                TokenKind::Identifier | TokenKind::Str | TokenKind::Number => tok.text,
                _ => {
                    return Err(ScriptError::parse(
                        tok.line,
                        format!("expected a pin name after '.', found '{}'", tok.text),
                    ));
                }
            };
            expr = Expr::Member {
                target: Box::new(expr),
                name,
            };
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> ScriptResult<Expr> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Number => {
                self.advance();
                let value = wl_core::units::parse_si(&tok.text)
                    .map_err(|e| ScriptError::parse(tok.line, e.to_string()))?;
                Ok(Expr::Number(value))
            }
            TokenKind::Str => {
                self.advance();
                Ok(Expr::Str(tok.text))
            }
            TokenKind::Identifier => {
                self.advance();
                match tok.text.as_str() {
                    "true" => return Ok(Expr::Bool(true)),
                    "false" => return Ok(Expr::Bool(false)),
                    "null" => return Ok(Expr::Null),
                    _ => {}
                }
                if self.at(TokenKind::OpenParen) {
                    self.advance();
                    let args = self.parse_list(TokenKind::CloseParen, Self::parse_expr)?;
                    Ok(Expr::Call {
                        name: tok.text,
                        args,
                    })
                } else {
                    Ok(Expr::Ident(tok.text))
                }
            }
            TokenKind::OpenBracket => {
                self.advance();
                let items = self.parse_list(TokenKind::CloseBracket, Self::parse_expr)?;
                Ok(Expr::Array(items))
            }
            TokenKind::OpenBrace => {
                self.advance();
                let fields = self.parse_list(TokenKind::CloseBrace, Self::parse_field)?;
                Ok(Expr::Object(fields))
            }
            TokenKind::OpenParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_field(&mut self) -> ScriptResult<(String, Expr)> {
        let tok = self.advance();
        let key = match tok.kind {
            TokenKind::Identifier | TokenKind::Str | TokenKind::Number => tok.text,
            _ => {
                return Err(ScriptError::parse(
                    tok.line,
                    format!("expected a field name, found '{}'", tok.text),
                ));
            }
        };
        self.expect(TokenKind::Colon)?;
        Ok((key, self.parse_expr()?))
    }

    /// Comma-separated items up to `close`; a trailing comma is allowed.
    fn parse_list<T>(
        &mut self,
        close: TokenKind,
        mut item: impl FnMut(&mut Self) -> ScriptResult<T>,
    ) -> ScriptResult<Vec<T>> {
        let mut items = Vec::new();
        while !self.at(close) {
            items.push(item(self)?);
            if self.at(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(close)?;
        Ok(items)
    }
}

pub fn parse(source: &str) -> ScriptResult<Program> {
    Parser::new(source)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(source: &str) -> StmtKind {
        let program = parse(source).unwrap();
        assert_eq!(program.statements.len(), 1);
        program.statements[0].kind.clone()
    }

    #[test]
    fn let_with_factory() {
        assert_eq!(
            single("let r1 = R(4.7k);"),
            StmtKind::Let {
                name: "r1".into(),
                value: Expr::Call {
                    name: "R".into(),
                    args: vec![Expr::Number(4700.0)],
                },
            }
        );
    }

    #[test]
    fn connect_with_pin_reference() {
        let StmtKind::Expr(Expr::Call { name, args }) = single(r#"connect(r1."1", n1);"#) else {
            panic!("expected a call");
        };
        assert_eq!(name, "connect");
        assert_eq!(
            args[0],
            Expr::Member {
                target: Box::new(Expr::Ident("r1".into())),
                name: "1".into(),
            }
        );
        assert_eq!(args[1], Expr::Ident("n1".into()));
    }

    #[test]
    fn bare_numeric_pin_name() {
        let StmtKind::Expr(Expr::Member { name, .. }) = single("r1.2;") else {
            panic!("expected a member");
        };
        assert_eq!(name, "2");
    }

    #[test]
    fn objects_and_arrays() {
        let StmtKind::Expr(Expr::Call { args, .. }) =
            single(r#"identity(r1, { id: "x", pins: { "1": "y", }, tags: [1, -2] });"#)
        else {
            panic!("expected a call");
        };
        let Expr::Object(fields) = &args[1] else {
            panic!("expected an object");
        };
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["id", "pins", "tags"]);
        assert_eq!(
            fields[2].1,
            Expr::Array(vec![
                Expr::Number(1.0),
                Expr::Neg(Box::new(Expr::Number(2.0)))
            ])
        );
    }

    #[test]
    fn header_and_export() {
        let program = parse("use \"wirelang\";\ncircuit(\"LED\");\n\nexport default;\n").unwrap();
        let kinds: Vec<_> = program.statements.iter().map(|s| &s.kind).collect();
        assert_eq!(kinds[0], &StmtKind::Use("wirelang".into()));
        assert_eq!(kinds[2], &StmtKind::Export("default".into()));
        assert_eq!(program.statements[2].line, 4);
    }

    #[test]
    fn missing_semicolon_reports_line() {
        let err = parse("let a = R(1)\nlet b = R(2);").unwrap_err();
        match err {
            ScriptError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("Semicolon"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unterminated_call() {
        assert!(matches!(parse("R(1, 2"), Err(ScriptError::Parse { .. })));
    }
}
