//! Operand checks shared by the builtins.
//!
//! Each check takes the operator name for the error message and returns
//! the unwrapped operand on success.

use joy_core::{FileRef, NodeRef, Payload, Result, RuntimeError};
use std::rc::Rc;

pub(crate) fn type_error(op: &'static str, needed: &'static str) -> RuntimeError {
    RuntimeError::Type { op, needed }
}

/// A quotation at stack position `pos` (1 = top).
pub(crate) fn quote(op: &'static str, p: &Payload, pos: usize) -> Result<NodeRef> {
    match p {
        Payload::List(l) => Ok(*l),
        _ => Err(type_error(
            op,
            match pos {
                1 => "quotation as top parameter",
                2 => "quotation as second parameter",
                3 => "quotation as third parameter",
                _ => "quotation as fourth parameter",
            },
        )),
    }
}

pub(crate) fn list(op: &'static str, p: &Payload) -> Result<NodeRef> {
    p.list().ok_or(type_error(op, "list"))
}

pub(crate) fn list2(op: &'static str, p: &Payload) -> Result<NodeRef> {
    p.list().ok_or(type_error(op, "list as second parameter"))
}

pub(crate) fn integer(op: &'static str, p: &Payload) -> Result<i64> {
    match p {
        Payload::Int(n) => Ok(*n),
        _ => Err(type_error(op, "integer")),
    }
}

pub(crate) fn integer2(op: &'static str, p: &Payload) -> Result<i64> {
    match p {
        Payload::Int(n) => Ok(*n),
        _ => Err(type_error(op, "integer as second parameter")),
    }
}

/// Integer, character or truth value.
pub(crate) fn numeric(op: &'static str, p: &Payload) -> Result<i64> {
    p.numeric().ok_or(type_error(op, "numeric"))
}

pub(crate) fn character(op: &'static str, p: &Payload) -> Result<char> {
    match p {
        Payload::Char(c) => Ok(*c),
        _ => Err(type_error(op, "character")),
    }
}

pub(crate) fn string(op: &'static str, p: &Payload) -> Result<Rc<str>> {
    match p {
        Payload::Str(s) => Ok(Rc::clone(s)),
        _ => Err(type_error(op, "string")),
    }
}

pub(crate) fn string2(op: &'static str, p: &Payload) -> Result<Rc<str>> {
    match p {
        Payload::Str(s) => Ok(Rc::clone(s)),
        _ => Err(type_error(op, "string as second parameter")),
    }
}

/// An open stream; the null stream is rejected.
pub(crate) fn file(op: &'static str, p: &Payload) -> Result<FileRef> {
    match p {
        Payload::File(Some(f)) => Ok(Rc::clone(f)),
        _ => Err(type_error(op, "file")),
    }
}

pub(crate) fn float(op: &'static str, p: &Payload) -> Result<f64> {
    p.floatable().ok_or(type_error(op, "float or integer"))
}

/// Integer from a character or integer, as used for string and set members.
pub(crate) fn set_member(op: &'static str, p: &Payload) -> Result<u32> {
    match p {
        Payload::Int(_) | Payload::Char(_) => match p.numeric() {
            Some(n) if (0..i64::from(joy_core::SETSIZE)).contains(&n) => Ok(n as u32),
            _ => Err(type_error(op, "small numeric")),
        },
        _ => Err(type_error(op, "small numeric")),
    }
}

pub(crate) fn empty_list(op: &'static str) -> RuntimeError {
    RuntimeError::EmptyAggregate {
        op,
        needed: "non-empty list",
    }
}

pub(crate) fn empty_string(op: &'static str) -> RuntimeError {
    RuntimeError::EmptyAggregate {
        op,
        needed: "non-empty string",
    }
}

pub(crate) fn empty_set(op: &'static str) -> RuntimeError {
    RuntimeError::EmptyAggregate {
        op,
        needed: "non-empty set",
    }
}

pub(crate) fn bad_aggregate(op: &'static str) -> RuntimeError {
    type_error(op, "aggregate parameter")
}

pub(crate) fn bad_data(op: &'static str) -> RuntimeError {
    type_error(op, "different type")
}
