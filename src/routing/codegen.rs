//! Emits a compiled automaton as standalone Rust source.
//!
//! The output declares a `Handlers<C>` trait with one method per handler id
//! and a `match_url` function that walks the automaton as a `loop`/`match`
//! state machine, calling the matched handler method. It is meant to be
//! written to a file and compiled next to hand-written handler bodies.

use std::fmt::Write;

use crate::routing::automaton::{Automaton, Label, NodeKind};

// Strict and reserved keywords that need the `r#` prefix. `self`, `Self`,
// `super` and `crate` cannot be raw, so route parsing rejects them instead.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Renders `automaton` as Rust source text.
pub fn render(automaton: &Automaton) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render_into(&mut out, automaton);
    out
}

fn render_into(out: &mut String, automaton: &Automaton) -> std::fmt::Result {
    writeln!(out, "// Generated by crestgen. Do not edit.")?;
    writeln!(out)?;

    writeln!(out, "pub trait Handlers<C: ?Sized> {{")?;
    for handler in automaton.handlers() {
        writeln!(out, "    fn {}(&self, conn: &mut C);", ident(handler.as_str()))?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(
        out,
        "pub fn match_url<C: ?Sized, H: Handlers<C> + ?Sized>(url: &[u8], handlers: &H, conn: &mut C) -> bool {{"
    )?;
    writeln!(out, "    let mut state: usize = 0;")?;
    writeln!(out, "    let mut pos: usize = 0;")?;
    writeln!(out, "    loop {{")?;
    writeln!(out, "        match state {{")?;

    for (index, node) in automaton.nodes().iter().enumerate() {
        if let NodeKind::Accepting { handler, .. } = &node.kind {
            writeln!(out, "            {index} => {{")?;
            writeln!(out, "                handlers.{}(conn);", ident(handler.as_str()))?;
            writeln!(out, "                return true;")?;
            writeln!(out, "            }}")?;
            continue;
        }

        writeln!(out, "            {index} => match url.get(pos) {{")?;
        for t in &node.transitions {
            match t.label {
                Label::Byte(b) => {
                    writeln!(out, "                Some(b'{}') => {{", b.escape_ascii())?;
                    writeln!(out, "                    state = {};", t.to.0)?;
                    writeln!(out, "                    pos += 1;")?;
                    writeln!(out, "                }}")?;
                }
                Label::EndOfPath => {
                    writeln!(out, "                None => state = {},", t.to.0)?;
                }
            }
        }
        writeln!(out, "                _ => return false,")?;
        writeln!(out, "            }},")?;
    }

    writeln!(out, "            _ => return false,")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn ident(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}
