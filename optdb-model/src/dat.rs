// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Parser for AMPL-style `.dat` data command files.
//!
//! Supported statements, each terminated by `;`:
//!
//! ```text
//! set I := a b c;
//! set A := (1,2) (2,3);
//! set S[a] := x y;
//! param n := 5;
//! param d default 0 := a 1 b 2;
//! param c : x y := a 1 2 b 3 4;
//! param : p q := a 1 2 b 3 4;
//! ```
//!
//! `#` starts a comment running to the end of the line, and `.` stands for a
//! missing value. The parser only produces commands; grouping values into
//! keys needs the model's index arities and happens when binding.

use crate::error::{ModelError, Result};
use crate::index::Value;

/// A value position in a parameter statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Value(Value),
    /// The `.` placeholder.
    Missing,
}

/// Body of a single-parameter statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamBody {
    /// `param p default 0;`
    Empty,
    /// Flat list of key values followed by the entry value, repeated.
    List(Vec<Entry>),
    /// Two-dimensional table: column keys, then rows of a row key and one
    /// cell per column.
    Table {
        columns: Vec<Value>,
        cells: Vec<Entry>,
    },
}

/// One parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum DataCommand {
    Set {
        name: String,
        index: Option<Vec<Value>>,
        members: Vec<Value>,
    },
    Param {
        name: String,
        default: Option<Value>,
        body: ParamBody,
    },
    /// `param : p q := ...;` rows of a key followed by one value per name.
    Params { names: Vec<String>, rows: Vec<Entry> },
}

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Word(String),
    Quoted(String),
    Assign,
    Colon,
    Semi,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
}

impl Tok {
    fn describe(&self) -> String {
        match self {
            Tok::Word(w) => format!("'{w}'"),
            Tok::Quoted(q) => format!("\"{q}\""),
            Tok::Assign => "':='".to_owned(),
            Tok::Colon => "':'".to_owned(),
            Tok::Semi => "';'".to_owned(),
            Tok::LBracket => "'['".to_owned(),
            Tok::RBracket => "']'".to_owned(),
            Tok::LParen => "'('".to_owned(),
            Tok::RParen => "')'".to_owned(),
            Tok::Comma => "','".to_owned(),
        }
    }
}

const DELIMITERS: &[char] = &[';', ':', '[', ']', '(', ')', ',', '\'', '"', '#'];

fn lex(input: &str) -> Result<Vec<(Tok, usize)>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '#' => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
            }
            ';' => tokens.push((Tok::Semi, line)),
            '[' => tokens.push((Tok::LBracket, line)),
            ']' => tokens.push((Tok::RBracket, line)),
            '(' => tokens.push((Tok::LParen, line)),
            ')' => tokens.push((Tok::RParen, line)),
            ',' => tokens.push((Tok::Comma, line)),
            ':' => {
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push((Tok::Assign, line));
                } else {
                    tokens.push((Tok::Colon, line));
                }
            }
            '\'' | '"' => {
                let start = line;
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some(q) if q == c => {
                            // A doubled quote inside a quoted string is a literal quote.
                            if chars.peek() == Some(&c) {
                                chars.next();
                                text.push(c);
                            } else {
                                break;
                            }
                        }
                        Some(other) => {
                            if other == '\n' {
                                line += 1;
                            }
                            text.push(other);
                        }
                        None => {
                            return Err(ModelError::DatSyntax {
                                line: start,
                                reason: "unterminated quoted string".to_owned(),
                            });
                        }
                    }
                }
                tokens.push((Tok::Quoted(text), start));
            }
            c => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || DELIMITERS.contains(&next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                tokens.push((Tok::Word(word), line));
            }
        }
    }
    Ok(tokens)
}

/// Parse the contents of a data file into commands, in file order.
pub fn parse(input: &str) -> Result<Vec<DataCommand>> {
    let mut parser = Parser {
        tokens: lex(input)?,
        pos: 0,
    };
    let mut commands = Vec::new();
    while let Some(command) = parser.parse_statement()? {
        commands.extend(command);
    }
    Ok(commands)
}

struct Parser {
    tokens: Vec<(Tok, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |(_, line)| *line)
    }

    fn error(&self, reason: impl Into<String>) -> ModelError {
        ModelError::DatSyntax {
            line: self.line(),
            reason: reason.into(),
        }
    }

    fn next(&mut self) -> Result<Tok> {
        let tok = self
            .tokens
            .get(self.pos)
            .map(|(tok, _)| tok.clone())
            .ok_or_else(|| self.error("unexpected end of input"))?;
        self.pos += 1;
        Ok(tok)
    }

    fn eat(&mut self, expected: &Tok) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Tok) -> Result<()> {
        let got = self.next()?;
        if &got == expected {
            Ok(())
        } else {
            self.pos -= 1;
            Err(self.error(format!(
                "expected {}, got {}",
                expected.describe(),
                got.describe()
            )))
        }
    }

    fn name(&mut self) -> Result<String> {
        match self.next()? {
            Tok::Word(w) => Ok(w),
            other => {
                self.pos -= 1;
                Err(self.error(format!("expected a name, got {}", other.describe())))
            }
        }
    }

    fn value(&mut self) -> Result<Value> {
        match self.entry()? {
            Entry::Value(v) => Ok(v),
            Entry::Missing => {
                self.pos -= 1;
                Err(self.error("'.' is not allowed here"))
            }
        }
    }

    fn entry(&mut self) -> Result<Entry> {
        match self.next()? {
            Tok::Word(w) if w == "." => Ok(Entry::Missing),
            Tok::Word(w) => Ok(Entry::Value(Value::parse_word(&w))),
            Tok::Quoted(q) => Ok(Entry::Value(Value::Str(q))),
            other => {
                self.pos -= 1;
                Err(self.error(format!("expected a value, got {}", other.describe())))
            }
        }
    }

    /// Entries up to, and consuming, the closing `;`.
    fn entries_until_semi(&mut self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        while !self.eat(&Tok::Semi) {
            entries.push(self.entry()?);
        }
        Ok(entries)
    }

    /// `None` at end of input; `Some(None)` for statements without a command.
    fn parse_statement(&mut self) -> Result<Option<Option<DataCommand>>> {
        let Some(tok) = self.peek().cloned() else {
            return Ok(None);
        };
        let keyword = match tok {
            Tok::Word(w) => w,
            Tok::Semi => {
                self.pos += 1;
                return Ok(Some(None));
            }
            other => return Err(self.error(format!("unexpected {}", other.describe()))),
        };
        self.pos += 1;

        let command = match keyword.as_str() {
            "set" => Some(self.parse_set()?),
            "param" => Some(self.parse_param()?),
            "data" | "end" => {
                self.expect(&Tok::Semi)?;
                None
            }
            other => {
                self.pos -= 1;
                return Err(self.error(format!("unknown statement '{other}'")));
            }
        };
        Ok(Some(command))
    }

    fn parse_set(&mut self) -> Result<DataCommand> {
        let name = self.name()?;

        let index = if self.eat(&Tok::LBracket) {
            let mut index = Vec::new();
            while !self.eat(&Tok::RBracket) {
                if self.eat(&Tok::Comma) {
                    continue;
                }
                index.push(self.value()?);
            }
            Some(index)
        } else {
            None
        };

        self.expect(&Tok::Assign)?;

        let mut members = Vec::new();
        loop {
            match self.peek() {
                Some(Tok::Semi) => {
                    self.pos += 1;
                    break;
                }
                Some(Tok::LParen) => {
                    self.pos += 1;
                    while !self.eat(&Tok::RParen) {
                        if self.eat(&Tok::Comma) {
                            continue;
                        }
                        members.push(self.value()?);
                    }
                }
                Some(Tok::Comma) => self.pos += 1,
                _ => members.push(self.value()?),
            }
        }

        Ok(DataCommand::Set {
            name,
            index,
            members,
        })
    }

    fn parse_param(&mut self) -> Result<DataCommand> {
        if self.eat(&Tok::Colon) {
            let mut names = Vec::new();
            while !self.eat(&Tok::Assign) {
                names.push(self.name()?);
            }
            if names.is_empty() {
                return Err(self.error("expected parameter names before ':='"));
            }
            let rows = self.entries_until_semi()?;
            return Ok(DataCommand::Params { names, rows });
        }

        let name = self.name()?;
        let mut default = None;
        if self.peek() == Some(&Tok::Word("default".to_owned())) {
            self.pos += 1;
            default = Some(self.value()?);
        }

        let body = match self.next()? {
            Tok::Semi => ParamBody::Empty,
            Tok::Assign => ParamBody::List(self.entries_until_semi()?),
            Tok::Colon => {
                let mut columns = Vec::new();
                while !self.eat(&Tok::Assign) {
                    columns.push(self.value()?);
                }
                let cells = self.entries_until_semi()?;
                ParamBody::Table { columns, cells }
            }
            other => {
                self.pos -= 1;
                return Err(self.error(format!(
                    "expected ':=', ':' or ';' after parameter '{name}', got {}",
                    other.describe()
                )));
            }
        };

        Ok(DataCommand::Param {
            name,
            default,
            body,
        })
    }
}
