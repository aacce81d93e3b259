//! Arena-backed route automaton.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. The start
//! node is always `NodeId(0)`.

use std::fmt;

/// Name of the handler a route is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(String);

impl HandlerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HandlerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for HandlerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HandlerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Index of a node in [`Automaton::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// What a transition consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Byte(u8),
    /// Taken only once the input is exhausted.
    EndOfPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub label: Label,
    pub to: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Start,
    Intermediate,
    /// End of one complete route. `path` is kept for diagnostics.
    Accepting { handler: HandlerId, path: String },
}

/// Coarse node class used when deciding whether two transitions are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Start,
    Intermediate,
    Accepting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub transitions: Vec<Transition>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            transitions: Vec::new(),
        }
    }

    pub fn class(&self) -> NodeClass {
        match self.kind {
            NodeKind::Start => NodeClass::Start,
            NodeKind::Intermediate => NodeClass::Intermediate,
            NodeKind::Accepting { .. } => NodeClass::Accepting,
        }
    }

    pub fn handler(&self) -> Option<&HandlerId> {
        match &self.kind {
            NodeKind::Accepting { handler, .. } => Some(handler),
            _ => None,
        }
    }

    /// Destination of the transition carrying `label`, if any.
    pub fn step(&self, label: Label) -> Option<NodeId> {
        self.transitions
            .iter()
            .find(|t| t.label == label)
            .map(|t| t.to)
    }
}

/// A compiled, deterministic route automaton.
///
/// Built by [`crate::routing::compile`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    pub(crate) nodes: Vec<Node>,
}

impl Automaton {
    pub const START: NodeId = NodeId(0);

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn start(&self) -> &Node {
        self.node(Self::START)
    }

    /// Handlers bound in this automaton, sorted and de-duplicated.
    pub fn handlers(&self) -> Vec<&HandlerId> {
        let mut handlers: Vec<&HandlerId> = self.nodes.iter().filter_map(Node::handler).collect();
        handlers.sort();
        handlers.dedup();
        handlers
    }

    /// Every (path, handler) pair the automaton accepts, sorted by path.
    pub fn routes(&self) -> Vec<(String, &HandlerId)> {
        let mut out = Vec::new();
        let mut stack = vec![(Self::START, Vec::new())];
        while let Some((id, prefix)) = stack.pop() {
            let node = self.node(id);
            if let Some(handler) = node.handler() {
                out.push((String::from_utf8_lossy(&prefix).into_owned(), handler));
                continue;
            }
            for t in &node.transitions {
                let mut next = prefix.clone();
                if let Label::Byte(b) = t.label {
                    next.push(b);
                }
                stack.push((t.to, next));
            }
        }
        out.sort();
        out
    }

    /// True when no node has two outgoing transitions with the same label.
    pub fn is_deterministic(&self) -> bool {
        self.nodes.iter().all(|node| {
            let mut labels: Vec<Label> = node.transitions.iter().map(|t| t.label).collect();
            labels.sort();
            labels.windows(2).all(|w| w[0] != w[1])
        })
    }
}
