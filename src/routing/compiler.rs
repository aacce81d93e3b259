//! Route compilation: chain building, collapse, compaction.
//!
//! Every route first becomes its own chain hanging off the shared start node:
//!
//! ```text
//!   start ─'/'─▶ n ─'b'─▶ n ─ … ─'s'─▶ n ─end─▶ accept(show)
//!         ─'/'─▶ n ─'b'─▶ n ─ … ─'w'─▶ n ─end─▶ accept(create)
//! ```
//!
//! Collapsing then folds transitions that leave the same node with the same
//! label into the same destination class, which shares common prefixes and
//! leaves at most one transition per label on every node. Nodes orphaned by
//! folding are dropped by a final compaction pass.

use crate::error::CompileError;
use crate::routing::automaton::{Automaton, Label, Node, NodeId, NodeKind, Transition};
use crate::routing::route::{Route, check_handler_name, parse_routes};

/// Compiles routes into a deterministic automaton.
///
/// Fails without producing anything if the set is empty, a path is not
/// absolute, or two routes share a literal path.
pub fn compile(routes: &[Route]) -> Result<Automaton, CompileError> {
    if routes.is_empty() {
        return Err(CompileError::EmptyInput);
    }

    let mut nodes = build(routes)?;
    collapse(&mut nodes)?;
    let automaton = compact(&nodes);

    tracing::info!(
        routes = routes.len(),
        nodes = automaton.nodes.len(),
        "Compiled route automaton"
    );
    Ok(automaton)
}

/// Parses a route source and compiles it.
pub fn compile_source(source: &str) -> Result<Automaton, CompileError> {
    compile(&parse_routes(source)?)
}

fn build(routes: &[Route]) -> Result<Vec<Node>, CompileError> {
    let mut nodes = vec![Node::new(NodeKind::Start)];

    for route in routes {
        // Routes built in code skip the source parser, so names are checked here too.
        check_handler_name(route.handler.as_str()).map_err(|reason| {
            CompileError::InvalidRouteSyntax {
                line: route.line,
                reason,
            }
        })?;
        if !route.path.starts_with('/') {
            return Err(CompileError::InvalidRouteSyntax {
                line: route.line,
                reason: "path must start with '/'",
            });
        }

        let mut prev = Automaton::START;
        for &b in route.path.as_bytes() {
            prev = push_node(&mut nodes, prev, Label::Byte(b), NodeKind::Intermediate);
        }
        push_node(
            &mut nodes,
            prev,
            Label::EndOfPath,
            NodeKind::Accepting {
                handler: route.handler.clone(),
                path: route.path.clone(),
            },
        );
    }

    Ok(nodes)
}

fn push_node(nodes: &mut Vec<Node>, from: NodeId, label: Label, kind: NodeKind) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(Node::new(kind));
    nodes[from.0].transitions.push(Transition { label, to: id });
    id
}

/// Folds equivalent sibling transitions, depth first from the start node.
///
/// Uses an explicit stack so path length never bounds recursion depth.
fn collapse(nodes: &mut [Node]) -> Result<(), CompileError> {
    let mut stack = vec![Automaton::START];

    while let Some(id) = stack.pop() {
        let mut i = 0;
        while i < nodes[id.0].transitions.len() {
            let kept = nodes[id.0].transitions[i];
            let mut j = i + 1;
            while j < nodes[id.0].transitions.len() {
                let other = nodes[id.0].transitions[j];
                if !equivalent(nodes, kept, other) {
                    j += 1;
                    continue;
                }
                reject_accepting_fold(nodes, kept.to, other.to)?;

                nodes[id.0].transitions.remove(j);
                let moved = std::mem::take(&mut nodes[other.to.0].transitions);
                nodes[kept.to.0].transitions.extend(moved);
            }
            stack.push(kept.to);
            i += 1;
        }
    }

    Ok(())
}

// Same label, destinations of the same class.
fn equivalent(nodes: &[Node], a: Transition, b: Transition) -> bool {
    a.label == b.label && nodes[a.to.0].class() == nodes[b.to.0].class()
}

/// Two accepting destinations under the same node and label are two routes
/// with one literal path; that is never merged.
fn reject_accepting_fold(nodes: &[Node], kept: NodeId, other: NodeId) -> Result<(), CompileError> {
    match (&nodes[kept.0].kind, &nodes[other.0].kind) {
        (
            NodeKind::Accepting {
                handler: first,
                path,
            },
            NodeKind::Accepting {
                handler: second, ..
            },
        ) => Err(CompileError::DuplicateRoute {
            path: path.clone(),
            first: first.to_string(),
            second: second.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Copies the nodes reachable from the start into a fresh arena, numbered in
/// depth-first discovery order.
fn compact(nodes: &[Node]) -> Automaton {
    let mut remap: Vec<Option<NodeId>> = vec![None; nodes.len()];
    let mut order = Vec::new();
    let mut stack = vec![Automaton::START];

    while let Some(old) = stack.pop() {
        if remap[old.0].is_some() {
            continue;
        }
        remap[old.0] = Some(NodeId(order.len()));
        order.push(old);
        for t in nodes[old.0].transitions.iter().rev() {
            stack.push(t.to);
        }
    }

    let compacted = order
        .iter()
        .map(|old| {
            let node = &nodes[old.0];
            Node {
                kind: node.kind.clone(),
                transitions: node
                    .transitions
                    .iter()
                    .filter_map(|t| {
                        remap[t.to.0].map(|to| Transition {
                            label: t.label,
                            to,
                        })
                    })
                    .collect(),
            }
        })
        .collect();

    Automaton { nodes: compacted }
}
