// GraphQL SDL lexer and parser
//
// Covers the subset action schemas use:
//   [extend] type|input Name { field(arg: Type, ...): Type ... }
//   scalar Name
//   enum Name { VALUE ... }
// Comments, descriptions and commas are skipped.

use super::schema::{FieldDef, TypeDef, TypeKind, TypeRef};
use super::CodegenError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    Punct(char),
    Eof,
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    line: usize,
    column: usize,
}

/// One top-level definition; `extend` definitions add fields to an
/// earlier definition of the same name
#[derive(Debug, Clone)]
pub struct Definition {
    pub extend: bool,
    pub def: TypeDef,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> CodegenError {
        CodegenError::Parse {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Spanned>, CodegenError> {
        let mut tokens = Vec::new();
        while let Some(&c) = self.chars.peek() {
            let (line, column) = (self.line, self.column);
            match c {
                c if c.is_whitespace() || c == ',' || c == '\u{feff}' => {
                    self.bump();
                }
                '#' => {
                    while self.chars.peek().is_some_and(|&c| c != '\n') {
                        self.bump();
                    }
                }
                '"' => self.skip_string()?,
                '{' | '}' | '(' | ')' | '[' | ']' | ':' | '!' | '=' | '@' | '|' | '&' => {
                    self.bump();
                    tokens.push(Spanned {
                        token: Token::Punct(c),
                        line,
                        column,
                    });
                }
                c if c == '_' || c.is_ascii_alphabetic() => {
                    let mut name = String::new();
                    while let Some(&c) = self.chars.peek() {
                        if c == '_' || c.is_ascii_alphanumeric() {
                            name.push(c);
                            self.bump();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Spanned {
                        token: Token::Name(name),
                        line,
                        column,
                    });
                }
                other => return Err(self.error(format!("unexpected character '{other}'"))),
            }
        }
        tokens.push(Spanned {
            token: Token::Eof,
            line: self.line,
            column: self.column,
        });
        Ok(tokens)
    }

    /// Skip a "string" or """block string""" (descriptions)
    fn skip_string(&mut self) -> Result<(), CodegenError> {
        self.bump();
        let block = self.chars.peek() == Some(&'"') && {
            self.bump();
            if self.chars.peek() == Some(&'"') {
                self.bump();
                true
            } else {
                // `""`: empty string
                return Ok(());
            }
        };

        let mut quotes = 0;
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                    quotes = 0;
                }
                '"' if !block => return Ok(()),
                '"' => {
                    quotes += 1;
                    if quotes == 3 {
                        return Ok(());
                    }
                }
                '\n' if !block => return Err(self.error("unterminated string")),
                _ => quotes = 0,
            }
        }
        Err(self.error("unterminated string"))
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn next(&mut self) -> Spanned {
        let token = self.peek().clone();
        if token.token != Token::Eof {
            self.pos += 1;
        }
        token
    }

    fn error_at(spanned: &Spanned, message: impl Into<String>) -> CodegenError {
        CodegenError::Parse {
            line: spanned.line,
            column: spanned.column,
            message: message.into(),
        }
    }

    fn describe(token: &Token) -> String {
        match token {
            Token::Name(name) => format!("'{name}'"),
            Token::Punct(c) => format!("'{c}'"),
            Token::Eof => "end of input".to_string(),
        }
    }

    fn expect_punct(&mut self, expected: char) -> Result<(), CodegenError> {
        let spanned = self.next();
        if spanned.token == Token::Punct(expected) {
            Ok(())
        } else {
            Err(Self::error_at(
                &spanned,
                format!("expected '{expected}', found {}", Self::describe(&spanned.token)),
            ))
        }
    }

    fn expect_name(&mut self) -> Result<String, CodegenError> {
        let spanned = self.next();
        match spanned.token {
            Token::Name(name) => Ok(name),
            ref other => Err(Self::error_at(
                &spanned,
                format!("expected a name, found {}", Self::describe(other)),
            )),
        }
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.peek().token == Token::Punct(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_document(&mut self) -> Result<Vec<Definition>, CodegenError> {
        let mut definitions = Vec::new();
        while self.peek().token != Token::Eof {
            definitions.push(self.parse_definition()?);
        }
        Ok(definitions)
    }

    fn parse_definition(&mut self) -> Result<Definition, CodegenError> {
        let start = self.peek().clone();
        let mut keyword = self.expect_name()?;
        let extend = keyword == "extend";
        if extend {
            keyword = self.expect_name()?;
        }

        let kind = match keyword.as_str() {
            "type" => TypeKind::Object,
            "input" => TypeKind::Input,
            "scalar" => TypeKind::Scalar,
            "enum" => TypeKind::Enum,
            other => {
                return Err(Self::error_at(
                    &start,
                    format!("unsupported definition '{other}'"),
                ))
            }
        };
        let name = self.expect_name()?;
        self.reject_directives()?;

        let mut def = TypeDef::new(kind, name);
        match kind {
            TypeKind::Scalar => {}
            TypeKind::Enum => {
                self.expect_punct('{')?;
                while !self.eat_punct('}') {
                    def.values.push(self.expect_name()?);
                    self.reject_directives()?;
                }
            }
            TypeKind::Object | TypeKind::Input => {
                self.expect_punct('{')?;
                while !self.eat_punct('}') {
                    def.fields.push(self.parse_field(kind == TypeKind::Object)?);
                }
            }
        }
        Ok(Definition { extend, def })
    }

    fn parse_field(&mut self, allow_args: bool) -> Result<FieldDef, CodegenError> {
        let name = self.expect_name()?;
        let mut args = Vec::new();
        if self.peek().token == Token::Punct('(') {
            if !allow_args {
                return Err(Self::error_at(
                    self.peek(),
                    format!("input field '{name}' cannot take arguments"),
                ));
            }
            self.pos += 1;
            while !self.eat_punct(')') {
                args.push(self.parse_field(false)?);
            }
        }
        self.expect_punct(':')?;
        let ty = self.parse_type()?;
        if self.peek().token == Token::Punct('=') {
            return Err(Self::error_at(self.peek(), "default values are not supported"));
        }
        self.reject_directives()?;
        Ok(FieldDef { name, ty, args })
    }

    /// `Name`, `Name!`, `[T]`, `[T!]!`, ... flattened to (name, list, required)
    fn parse_type(&mut self) -> Result<TypeRef, CodegenError> {
        let (name, list) = if self.eat_punct('[') {
            // Checked before descending so `[[[[...` cannot recurse deeply
            if self.peek().token == Token::Punct('[') {
                return Err(Self::error_at(self.peek(), "nested lists are not supported"));
            }
            let inner = self.parse_type()?;
            self.expect_punct(']')?;
            (inner.name, true)
        } else {
            (self.expect_name()?, false)
        };
        let required = self.eat_punct('!');
        Ok(TypeRef {
            name,
            required,
            list,
        })
    }

    fn reject_directives(&self) -> Result<(), CodegenError> {
        if self.peek().token == Token::Punct('@') {
            return Err(Self::error_at(self.peek(), "directives are not supported"));
        }
        Ok(())
    }
}

/// Parse SDL source into its top-level definitions, in source order
pub fn parse(source: &str) -> Result<Vec<Definition>, CodegenError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser { tokens, pos: 0 }.parse_document()
}
