//! Recursion combinators
//!
//! `linrec`, `binrec`, `tailrec` and the conditional forms keep their
//! quotations in the frame snapshot and recurse natively. `genrec`,
//! `treerec` and `treegenrec` instead pack their quotations into a
//! closure list ending in an anonymous step procedure, so the recursion
//! is driven by whatever combinator the user's program applies to that
//! closure:
//!
//! ```text
//!   [B] [T] [R1] [R2] genrec
//!     => [[B] [T] [R1] R2] <genrec step>
//!     => on recursion, R2 sees [[[B] [T] [R1] R2] <genrec step>] on top
//! ```

use crate::aggregate::members;
use crate::builtins::{GENREC_STEP, TREEGENREC_STEP, TREEREC_STEP};
use crate::check;
use crate::interp::{Frame, Interp, Reg};
use joy_core::{NodeRef, Payload, Result};

/// Run `test` on the current stack and put the stack back as it was.
/// `state` roots the stack while the test runs.
fn holds(frame: &mut Frame<'_>, state: Reg, test: NodeRef) -> Result<bool> {
    let current = frame.stack();
    frame.set(state, current);
    let result = frame.test(test)?;
    let current = frame.get(state);
    frame.set_stack(current);
    Ok(result)
}

/// The first `N` quotations of a closure and whatever follows them.
fn unpack<const N: usize>(interp: &Interp, closure: NodeRef) -> ([NodeRef; N], NodeRef) {
    let mut quotes = [None; N];
    let mut cursor = closure;
    for slot in quotes.iter_mut() {
        if let Some(id) = cursor {
            let node = interp.node(id);
            *slot = node.payload.child();
            cursor = node.next;
        }
    }
    (quotes, cursor)
}

/// Linear recursion: if P holds run T, else run R1, recurse, run R2.
///
/// Stack effect: ( [P] [T] [R1] [R2] -- ... )
pub fn linrec(interp: &mut Interp) -> Result<()> {
    let quotes = four_quotes(interp, "linrec")?;
    interp.with_frame(|frame| {
        frame.restore(5);
        let state = frame.hold(None);
        linrec_aux(frame, state, quotes)
    })
}

fn linrec_aux(frame: &mut Frame<'_>, state: Reg, quotes: [NodeRef; 4]) -> Result<()> {
    let [p, t, r1, r2] = quotes;
    if holds(frame, state, p)? {
        return frame.exeterm(t);
    }
    frame.exeterm(r1)?;
    linrec_aux(frame, state, quotes)?;
    frame.exeterm(r2)
}

/// Binary recursion: if P holds run T, else R1 splits the top into two,
/// each is recursed on, and R2 combines the two results.
///
/// Stack effect: ( [P] [T] [R1] [R2] -- ... )
pub fn binrec(interp: &mut Interp) -> Result<()> {
    let quotes = four_quotes(interp, "binrec")?;
    interp.with_frame(|frame| {
        frame.restore(5);
        let state = frame.hold(None);
        let pending = frame.hold(None);
        binrec_aux(frame, state, pending, quotes)
    })
}

fn binrec_aux(frame: &mut Frame<'_>, state: Reg, pending: Reg, quotes: [NodeRef; 4]) -> Result<()> {
    let [p, t, r1, r2] = quotes;
    if holds(frame, state, p)? {
        return frame.exeterm(t);
    }
    frame.exeterm(r1)?;
    let [second] = frame.args::<1>("binrec")?;
    frame.accumulate(pending, second)?;
    frame.drop_n(1);
    binrec_aux(frame, state, pending, quotes)?;
    if let Some(id) = frame.get(pending) {
        let node = frame.node(id);
        let (second, rest) = (node.payload.clone(), node.next);
        frame.push(second)?;
        frame.set(pending, rest);
    }
    binrec_aux(frame, state, pending, quotes)?;
    frame.exeterm(r2)
}

fn four_quotes(interp: &Interp, op: &'static str) -> Result<[NodeRef; 4]> {
    let [p, t, r1, r2] = interp.args::<4>(op)?;
    let r2 = check::quote(op, &r2, 1)?;
    let r1 = check::quote(op, &r1, 2)?;
    let t = check::quote(op, &t, 3)?;
    let p = check::quote(op, &p, 4)?;
    Ok([p, t, r1, r2])
}

/// Tail recursion: run R1 until P holds, then run T.
///
/// Stack effect: ( [P] [T] [R1] -- ... )
pub fn tailrec(interp: &mut Interp) -> Result<()> {
    let [p, t, r1] = interp.args::<3>("tailrec")?;
    let r1 = check::quote("tailrec", &r1, 1)?;
    let t = check::quote("tailrec", &t, 2)?;
    let p = check::quote("tailrec", &p, 3)?;
    interp.with_frame(|frame| {
        frame.restore(4);
        let state = frame.hold(None);
        while !holds(frame, state, p)? {
            frame.exeterm(r1)?;
        }
        frame.exeterm(t)
    })
}

/// Stack effect: ( [B] [T] [R1] [R2] -- ... )
pub fn genrec(interp: &mut Interp) -> Result<()> {
    let [b, t, r1, r2] = interp.args::<4>("genrec")?;
    let rest = check::quote("genrec", &r2, 1)?;
    check::quote("genrec", &r1, 2)?;
    check::quote("genrec", &t, 3)?;
    check::quote("genrec", &b, 4)?;
    let closure = interp.list_from(vec![b, t, r1], rest)?;
    interp.reshape(4, vec![Payload::List(closure)])?;
    genrec_step(interp)
}

/// Anonymous step of `genrec`: test B, then either T or R1 followed by R2
/// with the rebuilt closure on top.
///
/// Stack effect: ( [[B] [T] [R1] R2] -- ... )
pub fn genrec_step(interp: &mut Interp) -> Result<()> {
    let [closure] = interp.args::<1>("genrec")?;
    let closure = check::quote("genrec", &closure, 1)?;
    let ([b, t, r1], r2) = unpack::<3>(interp, closure);
    interp.with_frame(|frame| {
        frame.restore(2);
        let taken = frame.test(b)?;
        frame.restore(2);
        if taken {
            return frame.exeterm(t);
        }
        frame.exeterm(r1)?;
        let again = frame.list_from(
            vec![Payload::List(closure), Payload::Anon(GENREC_STEP)],
            None,
        )?;
        frame.push(Payload::List(again))?;
        frame.exeterm(r2)
    })
}

/// Stack effect: ( [Cs] -- ... )
pub fn condlinrec(interp: &mut Interp) -> Result<()> {
    cond_rec(interp, "condlinrec", Some(2))
}

/// Stack effect: ( [Cs] -- ... )
pub fn condnestrec(interp: &mut Interp) -> Result<()> {
    cond_rec(interp, "condnestrec", None)
}

/// Shared driver of the conditional recursions. Each clause is
/// `[[B] [R1] [R2] ..]`, the last one `[[R1] [R2] ..]` without a test.
/// The chosen clause runs its first part, then between each further part
/// recurses on the same clause list. `condlinrec` stops after two parts.
fn cond_rec(interp: &mut Interp, op: &'static str, max_parts: Option<usize>) -> Result<()> {
    let [clauses] = interp.args::<1>(op)?;
    if check::list(op, &clauses)?.is_none() {
        return Err(check::empty_list(op));
    }
    interp.with_frame(|frame| {
        frame.restore(2);
        let list = frame.saved_list(1);
        let clauses = frame.items(list);
        let state = frame.hold(None);
        cond_rec_aux(frame, state, &clauses, max_parts)
    })
}

fn cond_rec_aux(
    frame: &mut Frame<'_>,
    state: Reg,
    clauses: &[Payload],
    max_parts: Option<usize>,
) -> Result<()> {
    let Some((default, rest)) = clauses.split_last() else {
        return Ok(());
    };
    let mut chosen = default.child();
    for clause in rest {
        let Some(id) = clause.child() else {
            continue;
        };
        let node = frame.node(id);
        let (condition, body) = (node.payload.child(), node.next);
        if holds(frame, state, condition)? {
            chosen = body;
            break;
        }
    }
    let parts = frame.items(chosen);
    let limit = max_parts.unwrap_or(parts.len());
    for (i, part) in parts.iter().take(limit).enumerate() {
        if i > 0 {
            cond_rec_aux(frame, state, clauses, max_parts)?;
        }
        frame.exeterm(part.child())?;
    }
    Ok(())
}

/// Push the members of X one at a time (integers count down from X to
/// 1), run I, then run C once per member.
///
/// Stack effect: ( X [I] [C] -- R )
pub fn primrec(interp: &mut Interp) -> Result<()> {
    let [x, i, c] = interp.args::<3>("primrec")?;
    let c = check::quote("primrec", &c, 1)?;
    let i = check::quote("primrec", &i, 2)?;
    let items = match &x {
        Payload::Int(_) => None,
        other => Some(members(interp, other).ok_or(check::bad_data("primrec"))?),
    };
    interp.with_frame(|frame| {
        frame.restore(4);
        let count = match (items, &x) {
            (Some(items), _) => {
                let count = items.len();
                for item in items {
                    frame.push(item)?;
                }
                count
            }
            (None, Payload::Int(n)) => {
                for j in (1..=*n).rev() {
                    frame.push(Payload::Int(j))?;
                }
                usize::try_from(*n).unwrap_or(0)
            }
            (None, _) => 0,
        };
        frame.exeterm(i)?;
        for _ in 0..count {
            frame.exeterm(c)?;
        }
        Ok(())
    })
}

/// Run P on every leaf of the tree T, depth first.
///
/// Stack effect: ( T [P] -- ... )
pub fn treestep(interp: &mut Interp) -> Result<()> {
    let [_, p] = interp.args::<2>("treestep")?;
    let program = check::quote("treestep", &p, 1)?;
    interp.with_frame(|frame| {
        frame.restore(3);
        let tree = frame.saved_item(2);
        treestep_aux(frame, tree, program)
    })
}

fn treestep_aux(frame: &mut Frame<'_>, item: Payload, program: NodeRef) -> Result<()> {
    match item {
        Payload::List(list) => {
            for member in frame.items(list) {
                treestep_aux(frame, member, program)?;
            }
            Ok(())
        }
        leaf => {
            frame.push(leaf)?;
            frame.exeterm(program)
        }
    }
}

/// If T is a leaf run O on it, otherwise run C on T with the recursion
/// packed as a quotation on top.
///
/// Stack effect: ( T [O] [C] -- ... )
pub fn treerec(interp: &mut Interp) -> Result<()> {
    let [_, o, c] = interp.args::<3>("treerec")?;
    let rest = check::quote("treerec", &c, 1)?;
    check::quote("treerec", &o, 2)?;
    let closure = interp.list_from(vec![o], rest)?;
    interp.replace(2, Payload::List(closure))?;
    treerec_step(interp)
}

/// Anonymous step of `treerec`.
///
/// Stack effect: ( T [[O] C] -- ... )
pub fn treerec_step(interp: &mut Interp) -> Result<()> {
    let [t, closure] = interp.args::<2>("treerec")?;
    let list = check::quote("treerec", &closure, 1)?;
    let ([o], c) = unpack::<1>(interp, list);
    if !t.is_list() {
        interp.drop_n(1);
        return interp.exeterm(o);
    }
    let again = interp.list_from(vec![closure, Payload::Anon(TREEREC_STEP)], None)?;
    interp.replace(1, Payload::List(again))?;
    interp.exeterm(c)
}

/// Like `treerec`, but a list T is first transformed by O2.
///
/// Stack effect: ( T [O1] [O2] [C] -- ... )
pub fn treegenrec(interp: &mut Interp) -> Result<()> {
    let [_, o1, o2, c] = interp.args::<4>("treegenrec")?;
    let rest = check::quote("treegenrec", &c, 1)?;
    check::quote("treegenrec", &o2, 2)?;
    check::quote("treegenrec", &o1, 3)?;
    let closure = interp.list_from(vec![o1, o2], rest)?;
    interp.reshape(3, vec![Payload::List(closure)])?;
    treegenrec_step(interp)
}

/// Anonymous step of `treegenrec`.
///
/// Stack effect: ( T [[O1] [O2] C] -- ... )
pub fn treegenrec_step(interp: &mut Interp) -> Result<()> {
    let [t, closure] = interp.args::<2>("treegenrec")?;
    let list = check::quote("treegenrec", &closure, 1)?;
    let ([o1, o2], c) = unpack::<2>(interp, list);
    if !t.is_list() {
        interp.drop_n(1);
        return interp.exeterm(o1);
    }
    interp.with_frame(|frame| {
        frame.restore(2);
        frame.exeterm(o2)?;
        let closure = frame.saved_item(1);
        let again = frame.list_from(vec![closure, Payload::Anon(TREEGENREC_STEP)], None)?;
        frame.push(Payload::List(again))
    })?;
    interp.exeterm(c)
}

#[cfg(test)]
mod tests {
    use crate::testing::{eval, eval_err, interp, interp_with_output, run};
    use joy_core::RuntimeError;

    #[test]
    fn test_linrec() {
        assert_eq!(eval("5 [null] [succ] [dup pred] [*] linrec"), "120");
        assert_eq!(
            eval_err("5 [null] [succ] [dup pred] 1 linrec"),
            "run time error: quotation as top parameter needed for linrec"
        );
    }

    #[test]
    fn test_binrec() {
        assert_eq!(eval("10 [small] [] [pred dup pred] [+] binrec"), "55");
        assert_eq!(
            eval("[3 1 2] [small] [] [uncons [>] split] [enconcat] binrec"),
            "[1 2 3]"
        );
    }

    #[test]
    fn test_binrec_runs_first_half_before_second() {
        let (mut joy, buf) = interp_with_output();
        run(
            &mut joy,
            "[1 2 3 4] [small] [dup put] [uncons [2 <] split] [enconcat] binrec",
        )
        .unwrap();
        assert_eq!(buf.text(), "[] [] [] [4] ");
    }

    #[test]
    fn test_tailrec() {
        assert_eq!(
            eval("0 5 [null] [pop] [dup rolldown + swap pred] tailrec"),
            "15"
        );
    }

    #[test]
    fn test_genrec() {
        assert_eq!(eval("5 [null] [succ] [dup pred] [i *] genrec"), "120");
        assert_eq!(eval("0 [null] [succ] [dup pred] [i *] genrec"), "1");
    }

    #[test]
    fn test_genrec_closure_is_visible() {
        assert_eq!(
            eval("1 [null] [] [pred] [] genrec"),
            "[[[null] [] [pred]] genrec] 0"
        );
    }

    #[test]
    fn test_cond_recursions() {
        let clauses = "[[[null] [pop 1]] [[dup pred] [*]]]";
        assert_eq!(eval(&format!("5 {clauses} condlinrec")), "120");
        assert_eq!(eval(&format!("5 {clauses} condnestrec")), "120");
        assert_eq!(
            eval_err("[] condlinrec"),
            "run time error: non-empty list needed for condlinrec"
        );
    }

    #[test]
    fn test_primrec() {
        assert_eq!(eval("5 [1] [*] primrec"), "120");
        assert_eq!(eval("[1 2 3] [0] [+] primrec"), "6");
        assert_eq!(eval("\"abc\" [0] [swap pop succ] primrec"), "3");
        assert_eq!(eval("{1 2} [0] [+] primrec"), "3");
        assert_eq!(
            eval_err("1.5 [1] [*] primrec"),
            "run time error: different type needed for primrec"
        );
    }

    #[test]
    fn test_primrec_exhausting_the_arena_is_an_error() {
        let mut joy = interp();
        let err = run(&mut joy, "1000000000000 [1] [*] primrec").unwrap_err();
        assert!(matches!(err, RuntimeError::OutOfMemory { .. }));
        assert_eq!(eval("0 [1] [*] primrec -3 [1] [*] primrec"), "1 1");
    }

    #[test]
    fn test_treestep() {
        assert_eq!(eval("0 [1 [2 3] 4] [+] treestep"), "10");
    }

    #[test]
    fn test_treerec() {
        assert_eq!(eval("[1 [2 3]] [dup *] [map] treerec"), "[1 [4 9]]");
        assert_eq!(eval("3 [dup *] [map] treerec"), "9");
    }

    #[test]
    fn test_treegenrec() {
        assert_eq!(
            eval("[1 [2 3]] [dup *] [rest] [map] treegenrec"),
            "[[9]]"
        );
        assert_eq!(eval("4 [dup *] [rest] [map] treegenrec"), "16");
    }
}
