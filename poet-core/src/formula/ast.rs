//! Tagged-variant PCTL formula tree. Each node carries a unique id assigned
//! at parse time, used to key the per-frontier verdict cache.

/// Unique id of an AST node, stable for the lifetime of a parsed formula.
pub type NodeId = u32;

#[derive(Clone, Debug)]
pub enum FormulaKind {
    Atom(String),
    True,
    False,
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    /// Exists-predecessor.
    ExistsYesterday(Box<Formula>),
    /// Forall-predecessor.
    ForallYesterday(Box<Formula>),
    /// Exists some past frontier.
    ExistsPast(Box<Formula>),
    /// Forall some past frontier (along every backward path).
    ForallPast(Box<Formula>),
    /// Held continuously back to the root, along some backward path.
    ExistsHistorically(Box<Formula>),
    /// Held continuously back to the root, along every backward path.
    ForallHistorically(Box<Formula>),
    /// `E(phi S psi)`.
    ExistsSince(Box<Formula>, Box<Formula>),
    /// `A(phi S psi)`.
    ForallSince(Box<Formula>, Box<Formula>),
}

#[derive(Clone, Debug)]
pub struct Formula {
    pub id: NodeId,
    pub kind: FormulaKind,
}

impl Formula {
    /// Structural equality ignoring node ids, used by the parser-roundtrip
    /// property test: two ASTs parsed from different source strings (or
    /// pretty-printed and reparsed) are considered equal if they have the
    /// same shape, regardless of the ids the parser happened to assign.
    pub fn structurally_eq(&self, other: &Formula) -> bool {
        use FormulaKind::*;
        match (&self.kind, &other.kind) {
            (Atom(a), Atom(b)) => a == b,
            (True, True) | (False, False) => true,
            (Not(a), Not(b)) => a.structurally_eq(b),
            (And(a1, a2), And(b1, b2))
            | (Or(a1, a2), Or(b1, b2))
            | (Implies(a1, a2), Implies(b1, b2))
            | (Iff(a1, a2), Iff(b1, b2))
            | (ExistsSince(a1, a2), ExistsSince(b1, b2))
            | (ForallSince(a1, a2), ForallSince(b1, b2)) => {
                a1.structurally_eq(b1) && a2.structurally_eq(b2)
            }
            (ExistsYesterday(a), ExistsYesterday(b))
            | (ForallYesterday(a), ForallYesterday(b))
            | (ExistsPast(a), ExistsPast(b))
            | (ForallPast(a), ForallPast(b))
            | (ExistsHistorically(a), ExistsHistorically(b))
            | (ForallHistorically(a), ForallHistorically(b)) => a.structurally_eq(b),
            _ => false,
        }
    }
}
