//! Recursive-descent PCTL parser.
//!
//! Precedence, lowest to highest: `<->` (non-associative), `->`
//! (right-associative), `|` (left), `&` (left), unary `!`, unary temporal
//! (`EY AY EP AP EH AH`). Binary `S` appears only inside `A(... S ...)` or
//! `E(... S ...)`.

use crate::error::{PoetError, Position};
use crate::formula::ast::{Formula, FormulaKind, NodeId};
use crate::formula::lexer::{lex, Tok, Token};

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    next_id: NodeId,
}

impl Parser {
    fn peek(&self) -> &Tok {
        &self.tokens[self.pos].tok
    }

    fn peek_position(&self) -> Position {
        self.tokens[self.pos].position
    }

    fn bump(&mut self) -> Tok {
        let tok = self.tokens[self.pos].tok.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Tok, what: &str) -> Result<(), PoetError> {
        if self.peek() == expected {
            self.bump();
            Ok(())
        } else {
            Err(PoetError::Parse {
                position: self.peek_position(),
                message: format!("expected {what}, found {:?}", self.peek()),
            })
        }
    }

    fn node(&mut self, kind: FormulaKind) -> Formula {
        let id = self.next_id;
        self.next_id += 1;
        Formula { id, kind }
    }

    fn parse_formula(&mut self) -> Result<Formula, PoetError> {
        self.parse_iff()
    }

    fn parse_iff(&mut self) -> Result<Formula, PoetError> {
        let lhs = self.parse_implies()?;
        if *self.peek() == Tok::Iff {
            self.bump();
            let rhs = self.parse_implies()?;
            // Non-associative: reject a second `<->` at this level.
            if *self.peek() == Tok::Iff {
                return Err(PoetError::Parse {
                    position: self.peek_position(),
                    message: "'<->' is non-associative; parenthesize".to_string(),
                });
            }
            Ok(self.node(FormulaKind::Iff(Box::new(lhs), Box::new(rhs))))
        } else {
            Ok(lhs)
        }
    }

    fn parse_implies(&mut self) -> Result<Formula, PoetError> {
        let lhs = self.parse_or()?;
        if *self.peek() == Tok::Implies {
            self.bump();
            let rhs = self.parse_implies()?; // right-associative
            Ok(self.node(FormulaKind::Implies(Box::new(lhs), Box::new(rhs))))
        } else {
            Ok(lhs)
        }
    }

    fn parse_or(&mut self) -> Result<Formula, PoetError> {
        let mut lhs = self.parse_and()?;
        while *self.peek() == Tok::Or {
            self.bump();
            let rhs = self.parse_and()?;
            lhs = self.node(FormulaKind::Or(Box::new(lhs), Box::new(rhs)));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Formula, PoetError> {
        let mut lhs = self.parse_not()?;
        while *self.peek() == Tok::And {
            self.bump();
            let rhs = self.parse_not()?;
            lhs = self.node(FormulaKind::And(Box::new(lhs), Box::new(rhs)));
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Formula, PoetError> {
        if *self.peek() == Tok::Not {
            self.bump();
            let inner = self.parse_not()?;
            Ok(self.node(FormulaKind::Not(Box::new(inner))))
        } else {
            self.parse_temporal()
        }
    }

    fn parse_temporal(&mut self) -> Result<Formula, PoetError> {
        match self.peek().clone() {
            Tok::Ey => {
                self.bump();
                let inner = self.parse_temporal()?;
                Ok(self.node(FormulaKind::ExistsYesterday(Box::new(inner))))
            }
            Tok::Ay => {
                self.bump();
                let inner = self.parse_temporal()?;
                Ok(self.node(FormulaKind::ForallYesterday(Box::new(inner))))
            }
            Tok::Ep => {
                self.bump();
                let inner = self.parse_temporal()?;
                Ok(self.node(FormulaKind::ExistsPast(Box::new(inner))))
            }
            Tok::Ap => {
                self.bump();
                let inner = self.parse_temporal()?;
                Ok(self.node(FormulaKind::ForallPast(Box::new(inner))))
            }
            Tok::Eh => {
                self.bump();
                let inner = self.parse_temporal()?;
                Ok(self.node(FormulaKind::ExistsHistorically(Box::new(inner))))
            }
            Tok::Ah => {
                self.bump();
                let inner = self.parse_temporal()?;
                Ok(self.node(FormulaKind::ForallHistorically(Box::new(inner))))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Formula, PoetError> {
        match self.peek().clone() {
            Tok::True => {
                self.bump();
                Ok(self.node(FormulaKind::True))
            }
            Tok::False => {
                self.bump();
                Ok(self.node(FormulaKind::False))
            }
            Tok::Ident(name) => {
                self.bump();
                Ok(self.node(FormulaKind::Atom(name)))
            }
            Tok::LParen => {
                self.bump();
                let inner = self.parse_formula()?;
                self.expect(&Tok::RParen, "')'")?;
                Ok(inner)
            }
            Tok::E => {
                self.bump();
                self.expect(&Tok::LParen, "'(' after 'E'")?;
                let phi = self.parse_formula()?;
                self.expect(&Tok::S, "'S'")?;
                let psi = self.parse_formula()?;
                self.expect(&Tok::RParen, "')'")?;
                Ok(self.node(FormulaKind::ExistsSince(Box::new(phi), Box::new(psi))))
            }
            Tok::A => {
                self.bump();
                self.expect(&Tok::LParen, "'(' after 'A'")?;
                let phi = self.parse_formula()?;
                self.expect(&Tok::S, "'S'")?;
                let psi = self.parse_formula()?;
                self.expect(&Tok::RParen, "')'")?;
                Ok(self.node(FormulaKind::ForallSince(Box::new(phi), Box::new(psi))))
            }
            other => Err(PoetError::Parse {
                position: self.peek_position(),
                message: format!("unexpected token {other:?}"),
            }),
        }
    }
}

/// Parse PCTL source into a formula AST. Fails on any trailing input.
pub fn parse(src: &str) -> Result<Formula, PoetError> {
    let tokens = lex(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        next_id: 0,
    };
    let formula = parser.parse_formula()?;
    if *parser.peek() != Tok::Eof {
        return Err(PoetError::Parse {
            position: parser.peek_position(),
            message: format!("unexpected trailing token {:?}", parser.peek()),
        });
    }
    Ok(formula)
}
