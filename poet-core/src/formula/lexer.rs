//! Hand-written lexer for PCTL source text.

use crate::error::{PoetError, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Ident(String),
    True,
    False,
    A,
    E,
    S,
    Ap,
    Ep,
    Ah,
    Eh,
    Ay,
    Ey,
    And,
    Or,
    Not,
    LParen,
    RParen,
    Implies,
    Iff,
    Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub tok: Tok,
    pub position: Position,
}

fn keyword(word: &str) -> Option<Tok> {
    Some(match word {
        "TRUE" => Tok::True,
        "FALSE" => Tok::False,
        "A" => Tok::A,
        "E" => Tok::E,
        "S" => Tok::S,
        "AP" => Tok::Ap,
        "EP" => Tok::Ep,
        "AH" => Tok::Ah,
        "EH" => Tok::Eh,
        "AY" => Tok::Ay,
        "EY" => Tok::Ey,
        _ => return None,
    })
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\'' || c == '.'
}

/// Tokenize PCTL source, terminated by a trailing `Tok::Eof`.
pub fn lex(src: &str) -> Result<Vec<Token>, PoetError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut i = 0usize;
    let mut line = 1usize;
    let mut col = 1usize;

    let advance = |i: &mut usize, line: &mut usize, col: &mut usize| {
        if chars[*i] == '\n' {
            *line += 1;
            *col = 1;
        } else {
            *col += 1;
        }
        *i += 1;
    };

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            advance(&mut i, &mut line, &mut col);
            continue;
        }
        let position = Position { line, column: col };
        match c {
            '&' => {
                tokens.push(Token { tok: Tok::And, position });
                advance(&mut i, &mut line, &mut col);
            }
            '|' => {
                tokens.push(Token { tok: Tok::Or, position });
                advance(&mut i, &mut line, &mut col);
            }
            '!' => {
                tokens.push(Token { tok: Tok::Not, position });
                advance(&mut i, &mut line, &mut col);
            }
            '(' => {
                tokens.push(Token { tok: Tok::LParen, position });
                advance(&mut i, &mut line, &mut col);
            }
            ')' => {
                tokens.push(Token { tok: Tok::RParen, position });
                advance(&mut i, &mut line, &mut col);
            }
            '-' => {
                if chars.get(i + 1) == Some(&'>') {
                    advance(&mut i, &mut line, &mut col);
                    advance(&mut i, &mut line, &mut col);
                    tokens.push(Token { tok: Tok::Implies, position });
                } else {
                    return Err(PoetError::Parse {
                        position,
                        message: "expected '->'".to_string(),
                    });
                }
            }
            '<' => {
                if chars.get(i + 1) == Some(&'-') && chars.get(i + 2) == Some(&'>') {
                    advance(&mut i, &mut line, &mut col);
                    advance(&mut i, &mut line, &mut col);
                    advance(&mut i, &mut line, &mut col);
                    tokens.push(Token { tok: Tok::Iff, position });
                } else {
                    return Err(PoetError::Parse {
                        position,
                        message: "expected '<->'".to_string(),
                    });
                }
            }
            _ if is_ident_start(c) => {
                let start = i;
                while i < chars.len() && is_ident_cont(chars[i]) {
                    advance(&mut i, &mut line, &mut col);
                }
                let word: String = chars[start..i].iter().collect();
                let tok = keyword(&word).unwrap_or(Tok::Ident(word));
                tokens.push(Token { tok, position });
            }
            _ => {
                return Err(PoetError::Parse {
                    position,
                    message: format!("unexpected character {c:?}"),
                });
            }
        }
    }

    tokens.push(Token {
        tok: Tok::Eof,
        position: Position { line, column: col },
    });
    Ok(tokens)
}
