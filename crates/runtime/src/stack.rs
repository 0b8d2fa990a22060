//! Stack shuffling builtins
//!
//! Nodes are never rewritten in place: every shuffle allocates fresh cells
//! for the items it moves and links them onto the untouched rest of the
//! stack. The `...d` variants run their base shuffle one item down, under a
//! frame that keeps the top item alive.

use crate::check;
use crate::interp::Interp;
use joy_core::{Payload, Result};

/// Push the whole stack as a list, top first.
///
/// Stack effect: ( .. X Y Z -- .. X Y Z [Z Y X ..] )
pub fn stack(interp: &mut Interp) -> Result<()> {
    let stk = interp.stack();
    interp.push(Payload::List(stk))
}

/// Replace the stack by a list, whose first item becomes the top.
///
/// Stack effect: ( [X Y ..] -- ..Y X )
pub fn unstack(interp: &mut Interp) -> Result<()> {
    let [list] = interp.args::<1>("unstack")?;
    let list = check::list("unstack", &list)?;
    interp.set_stack(list);
    Ok(())
}

/// Stack effect: ( -- )
pub fn id(_interp: &mut Interp) -> Result<()> {
    Ok(())
}

/// Stack effect: ( X -- X X )
pub fn dup(interp: &mut Interp) -> Result<()> {
    let [x] = interp.args::<1>("dup")?;
    interp.push(x)
}

/// Stack effect: ( X -- )
pub fn pop(interp: &mut Interp) -> Result<()> {
    interp.need("pop", 1)?;
    interp.drop_n(1);
    Ok(())
}

/// Stack effect: ( X Y -- Y X )
pub fn swap(interp: &mut Interp) -> Result<()> {
    let [x, y] = interp.args::<2>("swap")?;
    interp.reshape(2, vec![y, x])
}

/// Stack effect: ( X Y Z -- Z X Y )
pub fn rollup(interp: &mut Interp) -> Result<()> {
    let [x, y, z] = interp.args::<3>("rollup")?;
    interp.reshape(3, vec![z, x, y])
}

/// Stack effect: ( X Y Z -- Y Z X )
pub fn rolldown(interp: &mut Interp) -> Result<()> {
    let [x, y, z] = interp.args::<3>("rolldown")?;
    interp.reshape(3, vec![y, z, x])
}

/// Stack effect: ( X Y Z -- Z Y X )
pub fn rotate(interp: &mut Interp) -> Result<()> {
    let [x, y, z] = interp.args::<3>("rotate")?;
    interp.reshape(3, vec![z, y, x])
}

/// Run `shuffle` beneath the top item.
fn dipped(
    interp: &mut Interp,
    op: &'static str,
    arity: usize,
    shuffle: fn(&mut Interp) -> Result<()>,
) -> Result<()> {
    interp.need(op, arity)?;
    interp.with_frame(|frame| {
        frame.drop_n(1);
        shuffle(frame)?;
        let top = frame.saved_item(1);
        frame.push(top)
    })
}

/// Stack effect: ( Y Z -- Z )
pub fn popd(interp: &mut Interp) -> Result<()> {
    dipped(interp, "popd", 2, pop)
}

/// Stack effect: ( Y Z -- Y Y Z )
pub fn dupd(interp: &mut Interp) -> Result<()> {
    dipped(interp, "dupd", 2, dup)
}

/// Stack effect: ( X Y Z -- Y X Z )
pub fn swapd(interp: &mut Interp) -> Result<()> {
    dipped(interp, "swapd", 3, swap)
}

/// Stack effect: ( X Y Z W -- Z X Y W )
pub fn rollupd(interp: &mut Interp) -> Result<()> {
    dipped(interp, "rollupd", 4, rollup)
}

/// Stack effect: ( X Y Z W -- Y Z X W )
pub fn rolldownd(interp: &mut Interp) -> Result<()> {
    dipped(interp, "rolldownd", 4, rolldown)
}

/// Stack effect: ( X Y Z W -- Z Y X W )
pub fn rotated(interp: &mut Interp) -> Result<()> {
    dipped(interp, "rotated", 4, rotate)
}

/// Pick `T` when `B` is true, else `F`.
///
/// Stack effect: ( B T F -- X )
pub fn choice(interp: &mut Interp) -> Result<()> {
    let [b, t, f] = interp.args::<3>("choice")?;
    interp.replace(3, if b.truthy() { t } else { f })
}

#[cfg(test)]
mod tests {
    use crate::testing::{eval, eval_err};

    #[test]
    fn test_rollup_scenario() {
        assert_eq!(eval("1 2 3 rollup"), "2 1 3");
    }

    #[test]
    fn test_three_item_shuffles() {
        assert_eq!(eval("1 2 3 rolldown"), "1 3 2");
        assert_eq!(eval("1 2 3 rotate"), "1 2 3");
        assert_eq!(eval("1 2 swap"), "1 2");
    }

    #[test]
    fn test_dipped_variants() {
        assert_eq!(eval("1 2 popd"), "2");
        assert_eq!(eval("1 2 dupd"), "2 1 1");
        assert_eq!(eval("1 2 3 swapd"), "3 1 2");
        assert_eq!(eval("1 2 3 4 rollupd"), "4 2 1 3");
        assert_eq!(eval("1 2 3 4 rolldownd"), "4 1 3 2");
        assert_eq!(eval("1 2 3 4 rotated"), "4 1 2 3");
    }

    #[test]
    fn test_dipped_arity() {
        assert_eq!(
            eval_err("1 2 3 rotated"),
            "run time error: four parameters needed for rotated"
        );
    }

    #[test]
    fn test_swap_swap_is_identity() {
        assert_eq!(eval("'a [b] swap swap"), "[b] 'a");
    }

    #[test]
    fn test_dup_pop_is_identity() {
        assert_eq!(eval("1 \"x\" dup pop"), "\"x\" 1");
    }

    #[test]
    fn test_stack_and_unstack() {
        assert_eq!(eval("1 2 stack"), "[2 1] 2 1");
        assert_eq!(eval("9 [3 4] unstack"), "3 4");
        assert_eq!(
            eval_err("1 unstack"),
            "run time error: list needed for unstack"
        );
    }

    #[test]
    fn test_choice() {
        assert_eq!(eval("true 1 2 choice"), "1");
        assert_eq!(eval("false 1 2 choice"), "2");
    }

    #[test]
    fn test_pop_empty() {
        assert_eq!(
            eval_err("pop"),
            "run time error: one parameter needed for pop"
        );
    }
}
