//! Factor rendering for `put` and `fput`
//!
//! Layout-aware pretty printing belongs to the host. This is the plain
//! one-line form: literals as they would be written, words by name.

use crate::builtins;
use crate::interp::Interp;
use crate::string_ops::format_g;
use joy_core::value::set_members;
use joy_core::{NodeRef, Payload};
use std::fmt::Write;

/// Render one factor.
pub fn factor(interp: &Interp, payload: &Payload) -> String {
    let mut out = String::new();
    write_factor(interp, payload, &mut out);
    out
}

/// Render the items of a list separated by spaces, without brackets.
pub fn term(interp: &Interp, list: NodeRef) -> String {
    let mut out = String::new();
    write_term(interp, list, &mut out);
    out
}

fn write_term(interp: &Interp, list: NodeRef, out: &mut String) {
    for (i, (_, node)) in interp.arena.iter(list).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_factor(interp, &node.payload, out);
    }
}

fn write_factor(interp: &Interp, payload: &Payload, out: &mut String) {
    match payload {
        Payload::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Payload::Char(c) => {
            out.push('\'');
            out.push(*c);
        }
        Payload::Int(n) => {
            let _ = write!(out, "{}", n);
        }
        Payload::Float(f) => out.push_str(&format_g(*f)),
        Payload::Set(bits) => {
            out.push('{');
            for (i, member) in set_members(*bits).enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{}", member);
            }
            out.push('}');
        }
        Payload::Str(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Payload::List(list) => {
            out.push('[');
            write_term(interp, *list, out);
            out.push(']');
        }
        Payload::User(sym) => out.push_str(interp.symbols.name(*sym)),
        Payload::Builtin(op) => out.push_str(interp.builtin(*op).name),
        Payload::Anon(anon) => match builtins::anon(*anon) {
            Some(aux) => out.push_str(aux.name),
            None => out.push_str("__ANON_FUNCT"),
        },
        Payload::File(Some(file)) => {
            let _ = write!(out, "file:{:p}", std::rc::Rc::as_ptr(file));
        }
        Payload::File(None) => out.push_str("file:NULL"),
        Payload::Illegal => out.push_str("__ILLEGAL"),
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::eval;

    #[test]
    fn test_literals() {
        assert_eq!(eval("true 'x 42 \"hi\""), "\"hi\" 42 'x true");
        assert_eq!(eval("{5 1 3}"), "{1 3 5}");
        assert_eq!(eval("2.5"), "2.5");
    }

    #[test]
    fn test_nested_quotation() {
        assert_eq!(eval("[1 [2 3] dup]"), "[1 [2 3] dup]");
        assert_eq!(eval("[]"), "[]");
    }
}
