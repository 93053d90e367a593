//! Graphviz DOT export of the frontier DAG for `--visual`. Rendering the
//! DOT file to SVG/PNG is left to the user's own `dot` install — shelling
//! out to graphviz is out of scope here.

use std::fmt;
use std::path::Path;

use petgraph::dot::Dot;

use poet_core::frontier::FrontierGraph;

struct NodeLabel<'a>(&'a poet_core::frontier::FrontierState);

impl fmt::Display for NodeLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.cut())
    }
}

pub fn write_dot(graph: &FrontierGraph, path: &Path) -> std::io::Result<()> {
    let relabeled = graph.map(|_, state| NodeLabel(state).to_string(), |_, edge| edge.clone());
    let dot = Dot::new(&relabeled);
    std::fs::write(path, format!("{dot:?}"))
}
