use crate::routing::automaton::{Automaton, HandlerId, Label};

/// Resolves URIs against a compiled [`Automaton`].
///
/// The walk is linear in the URI length and allocation free. The automaton is
/// never mutated after construction, so a dispatcher can be shared across
/// connection tasks behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    automaton: Automaton,
}

impl Dispatcher {
    pub fn new(automaton: Automaton) -> Self {
        Self { automaton }
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Returns the handler bound to exactly `uri`, or `None` on a miss.
    ///
    /// The end-of-path transition is only considered once every byte has been
    /// consumed, so `/books` never matches `/books/extra`. The URI is matched
    /// as raw bytes; it need not be UTF-8.
    pub fn dispatch(&self, uri: impl AsRef<[u8]>) -> Option<&HandlerId> {
        let mut node = self.automaton.start();
        for &b in uri.as_ref() {
            let next = node.step(Label::Byte(b))?;
            node = self.automaton.node(next);
        }

        let accept = node.step(Label::EndOfPath)?;
        self.automaton.node(accept).handler()
    }
}
