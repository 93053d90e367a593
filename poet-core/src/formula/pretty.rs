//! Canonical, fully-parenthesized pretty-printing. Printing then reparsing
//! always yields a structurally equal AST — the property §8 S6 tests.

use std::fmt;

use crate::formula::ast::{Formula, FormulaKind};

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FormulaKind::Atom(name) => write!(f, "{name}"),
            FormulaKind::True => write!(f, "TRUE"),
            FormulaKind::False => write!(f, "FALSE"),
            FormulaKind::Not(inner) => write!(f, "!({inner})"),
            FormulaKind::And(a, b) => write!(f, "({a} & {b})"),
            FormulaKind::Or(a, b) => write!(f, "({a} | {b})"),
            FormulaKind::Implies(a, b) => write!(f, "({a} -> {b})"),
            FormulaKind::Iff(a, b) => write!(f, "({a} <-> {b})"),
            FormulaKind::ExistsYesterday(a) => write!(f, "EY({a})"),
            FormulaKind::ForallYesterday(a) => write!(f, "AY({a})"),
            FormulaKind::ExistsPast(a) => write!(f, "EP({a})"),
            FormulaKind::ForallPast(a) => write!(f, "AP({a})"),
            FormulaKind::ExistsHistorically(a) => write!(f, "EH({a})"),
            FormulaKind::ForallHistorically(a) => write!(f, "AH({a})"),
            FormulaKind::ExistsSince(a, b) => write!(f, "E({a} S {b})"),
            FormulaKind::ForallSince(a, b) => write!(f, "A({a} S {b})"),
        }
    }
}
