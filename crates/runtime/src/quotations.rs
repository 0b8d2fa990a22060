//! Quotation combinators
//!
//! A combinator that must get back to the stack it was called on runs its
//! work inside a [`Frame`](crate::interp::Frame). The frame snapshot is
//! read positionally, 1 being the old top:
//!
//! ```text
//!   X Y [P] binary
//!   saved(1) = [P]   saved(2) = Y   saved(3) = X   saved(4) = rest
//! ```
//!
//! Intermediate results are collected in frame registers, never in plain
//! locals, because running a quotation may collect garbage.

use crate::check;
use crate::interp::Interp;
use joy_core::{Payload, Result};

/// Execute a quotation.
///
/// Stack effect: ( [P] -- ... )
pub fn i(interp: &mut Interp) -> Result<()> {
    let [p] = interp.args::<1>("i")?;
    let quote = check::quote("i", &p, 1)?;
    interp.drop_n(1);
    interp.exeterm(quote)
}

/// Execute a quotation, leaving it on the stack underneath.
///
/// Stack effect: ( [P] -- [P] ... )
pub fn x(interp: &mut Interp) -> Result<()> {
    let [p] = interp.args::<1>("x")?;
    let quote = check::quote("x", &p, 1)?;
    interp.exeterm(quote)
}

/// Execute P with X out of the way, then put X back.
///
/// Stack effect: ( X [P] -- ... X )
pub fn dip(interp: &mut Interp) -> Result<()> {
    let [_, p] = interp.args::<2>("dip")?;
    check::quote("dip", &p, 1)?;
    interp.with_frame(|frame| {
        frame.restore(3);
        let quote = frame.saved_list(1);
        frame.exeterm(quote)?;
        let x = frame.saved_item(2);
        frame.push(x)
    })
}

/// Run the quotation on top of the `params - 1` items under it and keep
/// only the single value it leaves, on the stack beneath those items.
fn n_ary(interp: &mut Interp, op: &'static str, params: usize) -> Result<()> {
    interp.need(op, params)?;
    let [p] = interp.args::<1>(op)?;
    check::quote(op, &p, 1)?;
    interp.with_frame(|frame| {
        frame.restore(2);
        let quote = frame.saved_list(1);
        frame.exeterm(quote)?;
        let result = frame.result(op)?;
        let base = frame.saved(params + 1);
        frame.push_on(base, result)
    })
}

/// Stack effect: ( [P] -- R )
pub fn nullary(interp: &mut Interp) -> Result<()> {
    n_ary(interp, "nullary", 1)
}

/// Stack effect: ( X [P] -- R )
pub fn unary(interp: &mut Interp) -> Result<()> {
    n_ary(interp, "unary", 2)
}

/// Stack effect: ( X Y [P] -- R )
pub fn binary(interp: &mut Interp) -> Result<()> {
    n_ary(interp, "binary", 3)
}

/// Stack effect: ( X Y Z [P] -- R )
pub fn ternary(interp: &mut Interp) -> Result<()> {
    n_ary(interp, "ternary", 4)
}

/// Stack effect: ( X [P] -- R )
pub fn app1(interp: &mut Interp) -> Result<()> {
    let [_, p] = interp.args::<2>("app1")?;
    let quote = check::quote("app1", &p, 1)?;
    interp.drop_n(1);
    interp.exeterm(quote)
}

/// Stack effect: ( X Y [P] -- R )
pub fn app11(interp: &mut Interp) -> Result<()> {
    interp.need("app11", 3)?;
    let [p] = interp.args::<1>("app11")?;
    check::quote("app11", &p, 1)?;
    app1(interp)?;
    let [_, r] = interp.args::<2>("app11")?;
    interp.replace(2, r)
}

/// Run P separately on each of the `n` items under it, each time with
/// only that item above the rest of the stack.
fn unary_n(interp: &mut Interp, op: &'static str, n: usize) -> Result<()> {
    interp.need(op, n + 1)?;
    let [p] = interp.args::<1>(op)?;
    check::quote(op, &p, 1)?;
    interp.with_frame(|frame| {
        let quote = frame.saved_list(1);
        let results = frame.hold(None);
        for pos in (2..=n + 1).rev() {
            let arg = frame.saved_item(pos);
            let base = frame.saved(n + 2);
            frame.push_on(base, arg)?;
            frame.exeterm(quote)?;
            let result = frame.result(op)?;
            frame.accumulate(results, result)?;
        }
        frame.restore(n + 2);
        for result in frame.accumulated(results) {
            frame.push(result)?;
        }
        Ok(())
    })
}

/// Stack effect: ( X1 X2 [P] -- R1 R2 )
pub fn unary2(interp: &mut Interp) -> Result<()> {
    unary_n(interp, "unary2", 2)
}

/// Stack effect: ( X1 X2 X3 [P] -- R1 R2 R3 )
pub fn unary3(interp: &mut Interp) -> Result<()> {
    unary_n(interp, "unary3", 3)
}

/// Stack effect: ( X1 X2 X3 X4 [P] -- R1 R2 R3 R4 )
pub fn unary4(interp: &mut Interp) -> Result<()> {
    unary_n(interp, "unary4", 4)
}

/// Stack effect: ( X Y1 Y2 [P] -- R1 R2 )
pub fn app12(interp: &mut Interp) -> Result<()> {
    interp.need("app12", 3)?;
    unary2(interp)?;
    let [_, r1, r2] = interp.args::<3>("app12")?;
    interp.reshape(3, vec![r1, r2])
}

/// Run both quotations on X.
///
/// Stack effect: ( X [P1] [P2] -- R1 R2 )
pub fn cleave(interp: &mut Interp) -> Result<()> {
    let [_, p1, p2] = interp.args::<3>("cleave")?;
    check::quote("cleave", &p2, 1)?;
    check::quote("cleave", &p1, 2)?;
    interp.with_frame(|frame| {
        let results = frame.hold(None);
        for pos in [2, 1] {
            frame.restore(3);
            let quote = frame.saved_list(pos);
            frame.exeterm(quote)?;
            let result = frame.result("cleave")?;
            frame.accumulate(results, result)?;
        }
        frame.restore(4);
        for result in frame.accumulated(results) {
            frame.push(result)?;
        }
        Ok(())
    })
}

/// Run P, then run each Pi from the stack P left and keep the value each
/// leaves; the results go on top of the stack the call started from.
///
/// Stack effect: ( [P] [[P1] [P2] ..] -- R1 R2 .. )
pub fn construct(interp: &mut Interp) -> Result<()> {
    let [p, programs] = interp.args::<2>("construct")?;
    check::quote("construct", &programs, 1)?;
    check::quote("construct", &p, 2)?;
    interp.with_frame(|frame| {
        frame.restore(3);
        let quote = frame.saved_list(2);
        frame.exeterm(quote)?;
        let after = frame.stack();
        let after = frame.hold(after);
        let results = frame.hold(None);
        let programs = frame.saved_list(1);
        for program in frame.items(programs) {
            let start = frame.get(after);
            frame.set_stack(start);
            frame.exeterm(program.child())?;
            let result = frame.result("construct")?;
            frame.accumulate(results, result)?;
        }
        frame.restore(3);
        for result in frame.accumulated(results) {
            frame.push(result)?;
        }
        Ok(())
    })
}

/// Execute P N times.
///
/// Stack effect: ( N [P] -- ... )
pub fn times(interp: &mut Interp) -> Result<()> {
    let [n, p] = interp.args::<2>("times")?;
    let quote = check::quote("times", &p, 1)?;
    let n = check::integer2("times", &n)?;
    interp.with_frame(|frame| {
        frame.restore(3);
        for _ in 0..n {
            frame.exeterm(quote)?;
        }
        Ok(())
    })
}

/// Run P with the list L1 as the stack; the resulting stack comes back as
/// the list L2.
///
/// Stack effect: ( L1 [P] -- L2 )
pub fn infra(interp: &mut Interp) -> Result<()> {
    let [l, p] = interp.args::<2>("infra")?;
    let quote = check::quote("infra", &p, 1)?;
    let list = check::list2("infra", &l)?;
    interp.with_frame(|frame| {
        frame.set_stack(list);
        frame.exeterm(quote)?;
        let result = frame.stack();
        let base = frame.saved(3);
        frame.push_on(base, Payload::List(result))
    })
}
