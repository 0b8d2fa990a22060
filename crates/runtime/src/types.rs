//! Type predicates and emptiness tests

use crate::check;
use crate::interp::Interp;
use joy_core::value::set_first;
use joy_core::{Payload, Result};

/// Zero, empty or null.
///
/// Stack effect: ( X -- B )
pub fn null(interp: &mut Interp) -> Result<()> {
    let [x] = interp.args::<1>("null")?;
    let empty = match &x {
        Payload::Str(s) => s.is_empty(),
        Payload::Float(f) => *f == 0.0,
        Payload::File(f) => f.is_none(),
        Payload::List(l) => l.is_none(),
        Payload::Set(bits) => *bits == 0,
        Payload::Bool(_) | Payload::Char(_) | Payload::Int(_) => x.numeric() == Some(0),
        _ => return Err(check::bad_data("null")),
    };
    interp.replace(1, Payload::Bool(empty))
}

/// Integer below two, or aggregate with at most one member.
///
/// Stack effect: ( X -- B )
pub fn small(interp: &mut Interp) -> Result<()> {
    let [x] = interp.args::<1>("small")?;
    let small = match &x {
        Payload::Bool(_) => true,
        Payload::Int(n) => *n < 2,
        Payload::Set(bits) => match set_first(*bits) {
            None => true,
            Some(first) => bits & !(1u64 << first) == 0,
        },
        Payload::Str(s) => s.chars().nth(1).is_none(),
        Payload::List(l) => l.is_none_or(|id| interp.node(id).next.is_none()),
        _ => return Err(check::bad_data("small")),
    };
    interp.replace(1, Payload::Bool(small))
}

fn is(interp: &mut Interp, op: &'static str, test: fn(&Payload) -> bool) -> Result<()> {
    let [x] = interp.args::<1>(op)?;
    interp.replace(1, Payload::Bool(test(&x)))
}

/// Stack effect: ( X -- B )
pub fn is_integer(interp: &mut Interp) -> Result<()> {
    is(interp, "integer", |x| matches!(x, Payload::Int(_)))
}

/// Stack effect: ( X -- B )
pub fn is_char(interp: &mut Interp) -> Result<()> {
    is(interp, "char", |x| matches!(x, Payload::Char(_)))
}

/// Stack effect: ( X -- B )
pub fn is_logical(interp: &mut Interp) -> Result<()> {
    is(interp, "logical", |x| matches!(x, Payload::Bool(_)))
}

/// Stack effect: ( X -- B )
pub fn is_set(interp: &mut Interp) -> Result<()> {
    is(interp, "set", |x| matches!(x, Payload::Set(_)))
}

/// Stack effect: ( X -- B )
pub fn is_string(interp: &mut Interp) -> Result<()> {
    is(interp, "string", |x| matches!(x, Payload::Str(_)))
}

/// Stack effect: ( X -- B )
pub fn is_list(interp: &mut Interp) -> Result<()> {
    is(interp, "list", Payload::is_list)
}

/// Anything that is not a list.
///
/// Stack effect: ( X -- B )
pub fn is_leaf(interp: &mut Interp) -> Result<()> {
    is(interp, "leaf", |x| !x.is_list())
}

/// A user-defined word, defined or not.
///
/// Stack effect: ( X -- B )
pub fn is_user(interp: &mut Interp) -> Result<()> {
    is(interp, "user", |x| matches!(x, Payload::User(_)))
}

/// Stack effect: ( X -- B )
pub fn is_float(interp: &mut Interp) -> Result<()> {
    is(interp, "float", |x| matches!(x, Payload::Float(_)))
}

/// Stack effect: ( X -- B )
pub fn is_file(interp: &mut Interp) -> Result<()> {
    is(interp, "file", |x| matches!(x, Payload::File(_)))
}
