//! Aggregate traversal combinators
//!
//! Every member is visited on top of the stack the combinator was called
//! on, minus its own operands, so the quotation can read values beneath
//! the aggregate.

use crate::aggregate::members;
use crate::arithmetic::char_of;
use crate::check;
use crate::interp::Interp;
use crate::stack;
use joy_core::{Payload, Result, RuntimeError};

/// The aggregate's members, or an error naming `op`.
fn members_of(interp: &Interp, op: &'static str, aggregate: &Payload) -> Result<Vec<Payload>> {
    members(interp, aggregate).ok_or(check::bad_aggregate(op))
}

/// An aggregate of the same kind as `like` holding `items`.
fn rebuild(interp: &mut Interp, like: &Payload, items: Vec<Payload>) -> Result<Payload> {
    Ok(match like {
        Payload::Str(_) => {
            let text: String = items
                .iter()
                .filter_map(|p| match p {
                    Payload::Char(c) => Some(*c),
                    _ => None,
                })
                .collect();
            Payload::string(&text)
        }
        Payload::Set(_) => Payload::Set(
            items
                .iter()
                .filter_map(Payload::numeric)
                .fold(0u64, |set, m| set | (1u64 << m)),
        ),
        _ => Payload::List(interp.list_from(items, None)?),
    })
}

/// Push each member of A in turn and run P after each.
///
/// Stack effect: ( A [P] -- ... )
pub fn step(interp: &mut Interp) -> Result<()> {
    let [a, p] = interp.args::<2>("step")?;
    let program = check::quote("step", &p, 1)?;
    let items = members_of(interp, "step", &a)?;
    interp.with_frame(|frame| {
        frame.restore(3);
        for item in items {
            frame.push(item)?;
            frame.exeterm(program)?;
        }
        Ok(())
    })
}

/// Fold A with the binary operation P, starting from V0.
///
/// Stack effect: ( A V0 [P] -- V )
pub fn fold(interp: &mut Interp) -> Result<()> {
    interp.need("fold", 3)?;
    stack::swapd(interp)?;
    step(interp)
}

/// Stack effect: ( A [P] -- B )
pub fn map(interp: &mut Interp) -> Result<()> {
    let [a, p] = interp.args::<2>("map")?;
    let program = check::quote("map", &p, 1)?;
    let items = members_of(interp, "map", &a)?;
    interp.with_frame(|frame| {
        let results = frame.hold(None);
        for item in items {
            let base = frame.saved(3);
            frame.push_on(base, item)?;
            frame.exeterm(program)?;
            let result = match frame.stack() {
                Some(id) => frame.node(id).payload.clone(),
                None => {
                    return Err(RuntimeError::Arity {
                        op: "map",
                        needed: "non-empty stack",
                    });
                }
            };
            let result = match &a {
                Payload::Str(_) => Payload::Char(char_of(check::numeric("map", &result)?)),
                Payload::Set(_) => Payload::Int(i64::from(check::set_member("map", &result)?)),
                _ => result,
            };
            frame.accumulate(results, result)?;
        }
        let items = frame.accumulated(results);
        let mapped = rebuild(frame, &a, items)?;
        let base = frame.saved(3);
        frame.push_on(base, mapped)
    })
}

/// Leave the members of A for which B holds, then those for which it
/// does not.
fn partition(interp: &mut Interp, op: &'static str) -> Result<()> {
    let [a, b] = interp.args::<2>(op)?;
    let test = check::quote(op, &b, 1)?;
    let items = members_of(interp, op, &a)?;
    interp.with_frame(|frame| {
        let (mut yes, mut no) = (Vec::new(), Vec::new());
        for item in items {
            let base = frame.saved(3);
            frame.push_on(base, item.clone())?;
            if frame.test(test)? {
                yes.push(item);
            } else {
                no.push(item);
            }
        }
        frame.restore(3);
        let yes = rebuild(frame, &a, yes)?;
        frame.push(yes)?;
        let no = rebuild(frame, &a, no)?;
        frame.push(no)
    })
}

/// Stack effect: ( A [B] -- A1 )
pub fn filter(interp: &mut Interp) -> Result<()> {
    partition(interp, "filter")?;
    interp.drop_n(1);
    Ok(())
}

/// Stack effect: ( A [B] -- A1 A2 )
pub fn split(interp: &mut Interp) -> Result<()> {
    partition(interp, "split")
}

/// Test members until one gives `!initial`.
fn quantify(interp: &mut Interp, op: &'static str, initial: bool) -> Result<()> {
    let [a, b] = interp.args::<2>(op)?;
    let test = check::quote(op, &b, 1)?;
    let items = members_of(interp, op, &a)?;
    interp.with_frame(|frame| {
        let mut result = initial;
        for item in items {
            let base = frame.saved(3);
            frame.push_on(base, item)?;
            if frame.test(test)? != initial {
                result = !initial;
                break;
            }
        }
        let base = frame.saved(3);
        frame.push_on(base, Payload::Bool(result))
    })
}

/// Stack effect: ( A [B] -- X )
pub fn some(interp: &mut Interp) -> Result<()> {
    quantify(interp, "some", false)
}

/// Stack effect: ( A [B] -- X )
pub fn all(interp: &mut Interp) -> Result<()> {
    quantify(interp, "all", true)
}

#[cfg(test)]
mod tests {
    use crate::testing::{eval, eval_err};

    #[test]
    fn test_step_and_fold() {
        assert_eq!(eval("0 [1 2 3] [+] step"), "6");
        assert_eq!(eval("\"ab\" [] step"), "'b 'a");
        assert_eq!(eval("[1 2 3] 0 [+] fold"), "6");
        assert_eq!(
            eval_err("5 [] step"),
            "run time error: aggregate parameter needed for step"
        );
    }

    #[test]
    fn test_map() {
        assert_eq!(eval("[1 2 3] [dup *] map"), "[1 4 9]");
        assert_eq!(eval("\"abc\" [succ] map"), "\"bcd\"");
        assert_eq!(eval("{1 2} [succ] map"), "{2 3}");
        assert_eq!(eval("10 [1 2] [+] map"), "[11 12] 10");
    }

    #[test]
    fn test_map_errors() {
        assert_eq!(
            eval_err("[1] [pop] map"),
            "run time error: non-empty stack needed for map"
        );
        assert_eq!(
            eval_err("{1} [pop 70] map"),
            "run time error: small numeric needed for map"
        );
    }

    #[test]
    fn test_filter() {
        assert_eq!(eval("[1 5 2 6] [3 <] filter"), "[1 2]");
        assert_eq!(eval("\"aBc\" ['a >=] filter"), "\"ac\"");
        assert_eq!(eval("{1 5 7} [4 >] filter"), "{5 7}");
        assert_eq!(eval("4 [1 5 7] [>] filter"), "[1] 4");
    }

    #[test]
    fn test_split() {
        assert_eq!(eval("[1 5 2 6] [3 <] split"), "[5 6] [1 2]");
        assert_eq!(eval("{} [3 <] split"), "{} {}");
    }

    #[test]
    fn test_some_and_all() {
        assert_eq!(eval("[1 5] [3 >] some [] [3 >] some"), "false true");
        assert_eq!(eval("[1 5] [3 >] all {} [3 >] all"), "true false");
        assert_eq!(eval("\"ab\" ['a =] some"), "true");
    }

    #[test]
    fn test_quantifiers_stop_early() {
        assert_eq!(eval("[1 \"x\"] [1 =] some"), "true");
        assert_eq!(eval("[2 \"x\"] [1 =] all"), "false");
    }
}
