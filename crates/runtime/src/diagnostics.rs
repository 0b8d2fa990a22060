//! Interpreter state and control words
//!
//! Constants, the observable internals (`__dump`, `conts`, arena
//! counters), the mode flags and their setters, the random number
//! generator, and the words that end a run.

use crate::builtins::CATALOG;
use crate::check;
use crate::interp::Interp;
use joy_core::{MAXINT, NodeRef, Payload, Result, RuntimeError, SETSIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Stack effect: ( -- false )
pub fn push_false(interp: &mut Interp) -> Result<()> {
    interp.push(Payload::Bool(false))
}

/// Stack effect: ( -- true )
pub fn push_true(interp: &mut Interp) -> Result<()> {
    interp.push(Payload::Bool(true))
}

/// Stack effect: ( -- maxint )
pub fn maxint(interp: &mut Interp) -> Result<()> {
    interp.push(Payload::Int(MAXINT))
}

/// Stack effect: ( -- setsize )
pub fn setsize(interp: &mut Interp) -> Result<()> {
    interp.push(Payload::Int(i64::from(SETSIZE)))
}

/// Push a list whose members are the given lists, in order.
fn push_lists(interp: &mut Interp, lists: Vec<NodeRef>) -> Result<()> {
    let items = lists.into_iter().map(Payload::List).collect();
    let list = interp.list_from(items, None)?;
    interp.push(Payload::List(list))
}

/// The saved stacks of the combinators currently running, most recent
/// first.
///
/// Stack effect: ( -- [..] )
pub fn dump(interp: &mut Interp) -> Result<()> {
    let saved = interp.dump.iter().rev().copied().collect();
    push_lists(interp, saved)
}

/// The remaining programs of every active continuation, innermost first.
///
/// Stack effect: ( -- [[P] [Q] ..] )
pub fn conts(interp: &mut Interp) -> Result<()> {
    let pending = interp.conts.iter().rev().copied().collect();
    push_lists(interp, pending)
}

/// Stack effect: ( -- I )
pub fn autoput(interp: &mut Interp) -> Result<()> {
    interp.push(Payload::Int(interp.flags.autoput))
}

/// Stack effect: ( -- I )
pub fn undeferror(interp: &mut Interp) -> Result<()> {
    interp.push(Payload::Int(interp.flags.undef_error))
}

/// Stack effect: ( -- I )
pub fn echo(interp: &mut Interp) -> Result<()> {
    interp.push(Payload::Int(interp.flags.echo))
}

/// Uniform over `0..=i32::MAX`.
///
/// Stack effect: ( -- I )
pub fn rand(interp: &mut Interp) -> Result<()> {
    let n = interp.rng.gen_range(0..=i64::from(i32::MAX));
    interp.push(Payload::Int(n))
}

/// Reseed the generator; equal seeds give equal sequences.
///
/// Stack effect: ( I -- )
pub fn srand(interp: &mut Interp) -> Result<()> {
    let [seed] = interp.args::<1>("srand")?;
    let seed = check::integer("srand", &seed)?;
    interp.rng = StdRng::seed_from_u64(seed as u64);
    interp.drop_n(1);
    Ok(())
}

/// Arena capacity in nodes.
///
/// Stack effect: ( -- I )
pub fn memorymax(interp: &mut Interp) -> Result<()> {
    let max = interp.arena().capacity() as i64;
    interp.push(Payload::Int(max))
}

/// Live nodes in the arena.
///
/// Stack effect: ( -- I )
pub fn memoryindex(interp: &mut Interp) -> Result<()> {
    let live = interp.arena().live() as i64;
    interp.push(Payload::Int(live))
}

/// One `[name effect description]` triple per builtin, in catalog order.
///
/// Stack effect: ( -- L )
pub fn manual_list(interp: &mut Interp) -> Result<()> {
    interp.with_frame(|frame| {
        let entries = frame.hold(None);
        for builtin in CATALOG {
            let triple = frame.list_from(
                vec![
                    Payload::string(builtin.name),
                    Payload::string(builtin.effect),
                    Payload::string(builtin.doc),
                ],
                None,
            )?;
            frame.accumulate(entries, Payload::List(triple))?;
        }
        let items = frame.accumulated(entries);
        let list = frame.list_from(items, None)?;
        frame.push(Payload::List(list))
    })
}

/// Pop a numeric operand for a flag setter.
fn flag_value(interp: &mut Interp, op: &'static str) -> Result<i64> {
    let [n] = interp.args::<1>(op)?;
    let n = check::numeric(op, &n)?;
    interp.drop_n(1);
    debug!(op, value = n, "flag set");
    Ok(n)
}

/// Stack effect: ( I -- )
pub fn settracegc(interp: &mut Interp) -> Result<()> {
    interp.flags.trace_gc = flag_value(interp, "settracegc")?;
    Ok(())
}

/// Stack effect: ( I -- )
pub fn setautoput(interp: &mut Interp) -> Result<()> {
    interp.flags.autoput = flag_value(interp, "setautoput")?;
    Ok(())
}

/// Stack effect: ( I -- )
pub fn setundeferror(interp: &mut Interp) -> Result<()> {
    interp.flags.undef_error = flag_value(interp, "setundeferror")?;
    Ok(())
}

/// Stack effect: ( I -- )
pub fn setecho(interp: &mut Interp) -> Result<()> {
    interp.flags.echo = flag_value(interp, "setecho")?;
    Ok(())
}

/// Stack effect: ( -- )
pub fn gc(interp: &mut Interp) -> Result<()> {
    interp.collect();
    Ok(())
}

/// Stack effect: ( -- )
pub fn abort(_interp: &mut Interp) -> Result<()> {
    Err(RuntimeError::Aborted)
}

/// Stack effect: ( -- )
pub fn quit(_interp: &mut Interp) -> Result<()> {
    Err(RuntimeError::Quit(0))
}

#[cfg(test)]
mod tests {
    use crate::builtins::CATALOG;
    use crate::testing::{eval, eval_err, interp, run, top};
    use joy_core::{Payload, RuntimeError};

    #[test]
    fn test_constants() {
        assert_eq!(eval("false true"), "true false");
        assert_eq!(eval("maxint setsize"), format!("64 {}", i64::MAX));
    }

    #[test]
    fn test_flags_round_trip() {
        let mut joy = interp();
        run(&mut joy, "2 setautoput 1 setecho 0 setundeferror 3 __settracegc").unwrap();
        assert_eq!(joy.flags.autoput, 2);
        assert_eq!(joy.flags.echo, 1);
        assert_eq!(joy.flags.undef_error, 0);
        assert_eq!(joy.flags.trace_gc, 3);
        run(&mut joy, "autoput echo undeferror").unwrap();
        assert_eq!(crate::testing::stack(&joy), "0 1 2");
        assert_eq!(
            eval_err("\"x\" setecho"),
            "run time error: numeric needed for setecho"
        );
    }

    #[test]
    fn test_srand_makes_rand_repeatable() {
        let first = eval("42 srand rand rand");
        let second = eval("42 srand rand rand");
        assert_eq!(first, second);
        let mut joy = interp();
        run(&mut joy, "rand").unwrap();
        assert!(matches!(top(&joy), Payload::Int(n) if (0..=i64::from(i32::MAX)).contains(&n)));
        assert_eq!(
            eval_err("1.5 srand"),
            "run time error: integer needed for srand"
        );
    }

    #[test]
    fn test_manual_list_covers_catalog() {
        let mut joy = interp();
        run(&mut joy, "__manual_list size").unwrap();
        assert!(matches!(top(&joy), Payload::Int(n) if n as usize == CATALOG.len()));
        assert_eq!(
            eval("__manual_list first"),
            format!(
                "[\"false\" \"{}\" \"{}\"]",
                CATALOG[0].effect, CATALOG[0].doc
            )
        );
    }

    #[test]
    fn test_dump_and_conts() {
        assert_eq!(eval("__dump"), "[]");
        assert_eq!(eval("1 [__dump] nullary first"), "[[__dump] 1] 1");
        assert_eq!(eval("[conts 7] i"), "7 [[7] []]");
    }

    #[test]
    fn test_arena_counters() {
        let mut joy = interp();
        run(&mut joy, "[1 2 3] pop gc __memoryindex __memorymax").unwrap();
        assert!(matches!(top(&joy), Payload::Int(20000)));
        let items = joy.stack_items();
        assert!(matches!(items[1], Payload::Int(n) if n < 20000));
    }

    #[test]
    fn test_abort_and_quit() {
        let mut joy = interp();
        assert!(matches!(run(&mut joy, "abort"), Err(RuntimeError::Aborted)));
        assert!(matches!(run(&mut joy, "quit"), Err(RuntimeError::Quit(0))));
    }
}
