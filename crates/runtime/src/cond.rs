//! Conditional combinators
//!
//! Tests run on a copy of the stack they were called on, and the branch
//! taken runs from the same point, so a test never leaves anything behind.

use crate::check;
use crate::compare::order;
use crate::interp::Interp;
use joy_core::{NodeRef, Payload, Result};

/// Condition quotation and body of a `cond` clause `[[B] T..]`. A clause
/// that is not a list has neither.
fn split_clause(interp: &Interp, clause: &Payload) -> (NodeRef, NodeRef) {
    match clause.child() {
        Some(id) => {
            let node = interp.node(id);
            (node.payload.child(), node.next)
        }
        None => (None, None),
    }
}

/// Stack effect: ( B [T] [F] -- ... )
pub fn branch(interp: &mut Interp) -> Result<()> {
    let [b, t, f] = interp.args::<3>("branch")?;
    let f = check::quote("branch", &f, 1)?;
    let t = check::quote("branch", &t, 2)?;
    let chosen = if b.truthy() { t } else { f };
    interp.with_frame(|frame| {
        frame.restore(4);
        frame.exeterm(chosen)
    })
}

/// Stack effect: ( [B] [T] [F] -- ... )
pub fn ifte(interp: &mut Interp) -> Result<()> {
    let [b, t, f] = interp.args::<3>("ifte")?;
    let f = check::quote("ifte", &f, 1)?;
    let t = check::quote("ifte", &t, 2)?;
    let b = check::quote("ifte", &b, 3)?;
    interp.with_frame(|frame| {
        frame.restore(4);
        let taken = frame.test(b)?;
        frame.restore(4);
        frame.exeterm(if taken { t } else { f })
    })
}

/// Run T if X passes `test`, otherwise E. X stays on the stack.
fn if_type(interp: &mut Interp, op: &'static str, test: fn(&Payload) -> bool) -> Result<()> {
    let [x, t, e] = interp.args::<3>(op)?;
    let e = check::quote(op, &e, 1)?;
    let t = check::quote(op, &t, 2)?;
    let chosen = if test(&x) { t } else { e };
    interp.with_frame(|frame| {
        frame.restore(3);
        frame.exeterm(chosen)
    })
}

/// Stack effect: ( X [T] [E] -- ... )
pub fn ifinteger(interp: &mut Interp) -> Result<()> {
    if_type(interp, "ifinteger", |x| matches!(x, Payload::Int(_)))
}

/// Stack effect: ( X [T] [E] -- ... )
pub fn ifchar(interp: &mut Interp) -> Result<()> {
    if_type(interp, "ifchar", |x| matches!(x, Payload::Char(_)))
}

/// Stack effect: ( X [T] [E] -- ... )
pub fn iflogical(interp: &mut Interp) -> Result<()> {
    if_type(interp, "iflogical", |x| matches!(x, Payload::Bool(_)))
}

/// Stack effect: ( X [T] [E] -- ... )
pub fn ifset(interp: &mut Interp) -> Result<()> {
    if_type(interp, "ifset", |x| matches!(x, Payload::Set(_)))
}

/// Stack effect: ( X [T] [E] -- ... )
pub fn ifstring(interp: &mut Interp) -> Result<()> {
    if_type(interp, "ifstring", |x| matches!(x, Payload::Str(_)))
}

/// Stack effect: ( X [T] [E] -- ... )
pub fn iflist(interp: &mut Interp) -> Result<()> {
    if_type(interp, "iflist", Payload::is_list)
}

/// Stack effect: ( X [T] [E] -- ... )
pub fn iffloat(interp: &mut Interp) -> Result<()> {
    if_type(interp, "iffloat", |x| matches!(x, Payload::Float(_)))
}

/// Stack effect: ( X [T] [E] -- ... )
pub fn iffile(interp: &mut Interp) -> Result<()> {
    if_type(interp, "iffile", |x| matches!(x, Payload::File(_)))
}

/// Try each clause `[[B] T..]` in turn and run the body of the first whose
/// condition holds. The last clause is the default and runs whole.
///
/// Stack effect: ( [..[[Bi] Ti]..[D]] -- ... )
pub fn cond(interp: &mut Interp) -> Result<()> {
    let [clauses] = interp.args::<1>("cond")?;
    if check::list("cond", &clauses)?.is_none() {
        return Err(check::empty_list("cond"));
    }
    interp.with_frame(|frame| {
        let list = frame.saved_list(1);
        let clauses = frame.items(list);
        let Some((default, rest)) = clauses.split_last() else {
            return Ok(());
        };
        for clause in rest {
            let (condition, body) = split_clause(frame, clause);
            frame.restore(2);
            if frame.test(condition)? {
                frame.restore(2);
                return frame.exeterm(body);
            }
        }
        frame.restore(2);
        frame.exeterm(default.child())
    })
}

/// Pick the clause whose first member equals X. A match drops X before
/// running the rest of its clause; the default keeps X and runs whole.
///
/// Stack effect: ( X [..[X Xs]..] -- ... )
pub fn case(interp: &mut Interp) -> Result<()> {
    let [x, clauses] = interp.args::<2>("case")?;
    let list = check::list("case", &clauses)?;
    let clauses = interp.items(list);
    let Some((default, rest)) = clauses.split_last() else {
        return Err(check::empty_list("case"));
    };
    let matched = rest.iter().find_map(|clause| {
        let id = clause.child()?;
        let node = interp.node(id);
        order(interp, &node.payload, &x)
            .is_equal()
            .then_some(node.next)
    });
    match matched {
        Some(body) => {
            interp.drop_n(2);
            interp.exeterm(body)
        }
        None => {
            interp.drop_n(1);
            interp.exeterm(default.child())
        }
    }
}

/// Stack effect: ( [B] [D] -- ... )
pub fn while_(interp: &mut Interp) -> Result<()> {
    let [b, d] = interp.args::<2>("while")?;
    let d = check::quote("while", &d, 1)?;
    let b = check::quote("while", &b, 2)?;
    interp.with_frame(|frame| {
        let state = frame.saved(3);
        let state = frame.hold(state);
        loop {
            let current = frame.get(state);
            frame.set_stack(current);
            if !frame.test(b)? {
                break;
            }
            frame.set_stack(current);
            frame.exeterm(d)?;
            let next = frame.stack();
            frame.set(state, next);
        }
        let current = frame.get(state);
        frame.set_stack(current);
        Ok(())
    })
}
