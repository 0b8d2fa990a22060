//! Comparison builtins
//!
//! All relations go through [`order`], which compares across the numeric
//! kinds (truth values, characters, integers and floats), compares words
//! and strings by name, and refuses everything else. A set on top of the
//! stack switches the relations to subset tests instead.

use crate::check;
use crate::interp::Interp;
use joy_core::stream::address;
use joy_core::{NodeRef, Payload, Result};
use std::cmp::Ordering;

/// Outcome of comparing two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Order {
    Ordered(Ordering),
    /// A NaN took part
    Unordered,
    /// The kinds cannot be compared
    Mismatch,
}

impl Order {
    fn of_floats(a: f64, b: f64) -> Order {
        a.partial_cmp(&b).map_or(Order::Unordered, Order::Ordered)
    }

    pub(crate) fn is_equal(self) -> bool {
        self == Order::Ordered(Ordering::Equal)
    }
}

/// The name a word or string compares by.
fn name_of<'a>(interp: &'a Interp, p: &'a Payload) -> Option<&'a str> {
    match p {
        Payload::User(sym) => Some(interp.symbols.name(*sym)),
        Payload::Str(s) => Some(&**s),
        Payload::Builtin(op) => Some(interp.builtin(*op).name),
        _ => None,
    }
}

/// Compare `first` against `second`.
pub(crate) fn order(interp: &Interp, first: &Payload, second: &Payload) -> Order {
    use Payload::*;
    match (first, second) {
        (Int(a), Int(b)) => Order::Ordered(a.cmp(b)),
        (Float(a), Float(b)) => Order::of_floats(*a, *b),
        (Bool(_) | Char(_) | Int(_), Bool(_) | Char(_) | Int(_)) => {
            match (first.numeric(), second.numeric()) {
                (Some(a), Some(b)) => Order::Ordered(a.cmp(&b)),
                _ => Order::Mismatch,
            }
        }
        (Bool(_) | Char(_) | Int(_), Float(b)) => match first.numeric() {
            Some(a) => Order::of_floats(a as f64, *b),
            None => Order::Mismatch,
        },
        (Float(a), Bool(_) | Char(_) | Int(_)) => match second.numeric() {
            Some(b) => Order::of_floats(*a, b as f64),
            None => Order::Mismatch,
        },
        (Set(a), Set(b)) => Order::Ordered(a.cmp(b)),
        (Anon(a), Anon(b)) => Order::Ordered(a.cmp(b)),
        (File(a), File(b)) => Order::Ordered(address(a).cmp(&address(b))),
        (User(_) | Str(_) | Builtin(_), User(_) | Str(_) | Builtin(_)) => {
            match (name_of(interp, first), name_of(interp, second)) {
                (Some(a), Some(b)) => Order::Ordered(a.as_bytes().cmp(b.as_bytes())),
                _ => Order::Mismatch,
            }
        }
        _ => Order::Mismatch,
    }
}

/// Structural equality: lists element by element, everything else by
/// [`order`].
pub(crate) fn equal_values(interp: &Interp, a: &Payload, b: &Payload) -> bool {
    match (a, b) {
        (Payload::List(x), Payload::List(y)) => equal_lists(interp, *x, *y),
        _ => order(interp, a, b).is_equal(),
    }
}

fn equal_lists(interp: &Interp, mut x: NodeRef, mut y: NodeRef) -> bool {
    loop {
        match (x, y) {
            (None, None) => return true,
            (Some(a), Some(b)) => {
                let (na, nb) = (interp.node(a), interp.node(b));
                if !equal_values(interp, &na.payload, &nb.payload) {
                    return false;
                }
                x = na.next;
                y = nb.next;
            }
            _ => return false,
        }
    }
}

/// One relational operator: how to read an ordering, and how to read a
/// pair of sets `(second, top)`.
struct Relation {
    name: &'static str,
    on_order: fn(Ordering) -> bool,
    on_sets: fn(u64, u64) -> bool,
    /// Result when a NaN is involved
    unordered: bool,
}

fn relate(interp: &mut Interp, rel: Relation) -> Result<()> {
    let [x, y] = interp.args::<2>(rel.name)?;
    let result = match (&x, &y) {
        (Payload::Set(i), Payload::Set(j)) => (rel.on_sets)(*i, *j),
        (_, Payload::Set(_)) => return Err(check::bad_data(rel.name)),
        _ => match order(interp, &x, &y) {
            Order::Ordered(o) => (rel.on_order)(o),
            Order::Unordered => rel.unordered,
            Order::Mismatch => return Err(check::bad_data(rel.name)),
        },
    };
    interp.replace(2, Payload::Bool(result))
}

/// Stack effect: ( X Y -- B )
pub fn eql(interp: &mut Interp) -> Result<()> {
    relate(
        interp,
        Relation {
            name: "=",
            on_order: Ordering::is_eq,
            on_sets: |i, j| i == j,
            unordered: false,
        },
    )
}

/// Stack effect: ( X Y -- B )
pub fn neql(interp: &mut Interp) -> Result<()> {
    relate(
        interp,
        Relation {
            name: "!=",
            on_order: Ordering::is_ne,
            on_sets: |i, j| i != j,
            unordered: true,
        },
    )
}

/// X less than Y; for sets, X a proper subset of Y.
///
/// Stack effect: ( X Y -- B )
pub fn less(interp: &mut Interp) -> Result<()> {
    relate(
        interp,
        Relation {
            name: "<",
            on_order: Ordering::is_lt,
            on_sets: |i, j| i != j && i & !j == 0,
            unordered: false,
        },
    )
}

/// Stack effect: ( X Y -- B )
pub fn leql(interp: &mut Interp) -> Result<()> {
    relate(
        interp,
        Relation {
            name: "<=",
            on_order: Ordering::is_le,
            on_sets: |i, j| i & !j == 0,
            unordered: false,
        },
    )
}

/// Stack effect: ( X Y -- B )
pub fn greater(interp: &mut Interp) -> Result<()> {
    relate(
        interp,
        Relation {
            name: ">",
            on_order: Ordering::is_gt,
            on_sets: |i, j| i != j && j & !i == 0,
            unordered: false,
        },
    )
}

/// Stack effect: ( X Y -- B )
pub fn geql(interp: &mut Interp) -> Result<()> {
    relate(
        interp,
        Relation {
            name: ">=",
            on_order: Ordering::is_ge,
            on_sets: |i, j| j & !i == 0,
            unordered: false,
        },
    )
}

/// -1, 0 or 1 as X is less than, equal to or greater than Y.
///
/// Stack effect: ( X Y -- I )
pub fn compare(interp: &mut Interp) -> Result<()> {
    let [x, y] = interp.args::<2>("compare")?;
    let ordering = match (&x, &y) {
        (Payload::Set(i), Payload::Set(j)) => i.cmp(j),
        (_, Payload::Set(_)) => return Err(check::bad_data("compare")),
        _ => match order(interp, &x, &y) {
            Order::Ordered(o) => o,
            Order::Unordered => Ordering::Equal,
            Order::Mismatch => return Err(check::bad_data("compare")),
        },
    };
    interp.replace(2, Payload::Int(ordering as i64))
}

/// Recursive equality of trees.
///
/// Stack effect: ( T U -- B )
pub fn equal(interp: &mut Interp) -> Result<()> {
    let [t, u] = interp.args::<2>("equal")?;
    let result = equal_values(interp, &u, &t);
    interp.replace(2, Payload::Bool(result))
}

fn contains(interp: &Interp, op: &'static str, aggregate: &Payload, elem: &Payload) -> Result<bool> {
    match aggregate {
        Payload::Set(bits) => Ok(match elem.numeric() {
            Some(n) if (0..i64::from(joy_core::SETSIZE)).contains(&n) => bits & (1u64 << n) != 0,
            _ => false,
        }),
        Payload::Str(s) => Ok(elem
            .numeric()
            .is_some_and(|n| s.chars().any(|c| i64::from(u32::from(c)) == n))),
        Payload::List(list) => Ok(interp
            .items(*list)
            .iter()
            .any(|item| order(interp, item, elem).is_equal())),
        _ => Err(check::bad_aggregate(op)),
    }
}

/// Stack effect: ( A X -- B )
pub fn has(interp: &mut Interp) -> Result<()> {
    let [a, x] = interp.args::<2>("has")?;
    let found = contains(interp, "has", &a, &x)?;
    interp.replace(2, Payload::Bool(found))
}

/// Stack effect: ( X A -- B )
pub fn in_(interp: &mut Interp) -> Result<()> {
    let [x, a] = interp.args::<2>("in")?;
    let found = contains(interp, "in", &a, &x)?;
    interp.replace(2, Payload::Bool(found))
}

/// Whether X and Y have the same type. Builtins are the same type only as
/// the same operator.
///
/// Stack effect: ( X Y -- B )
pub fn sametype(interp: &mut Interp) -> Result<()> {
    let [x, y] = interp.args::<2>("sametype")?;
    interp.replace(2, Payload::Bool(x.same_type(&y)))
}

#[cfg(test)]
mod tests {
    use crate::testing::{eval, eval_err};

    #[test]
    fn test_numeric_relations() {
        assert_eq!(eval("1 2 <"), "true");
        assert_eq!(eval("2 2 <="), "true");
        assert_eq!(eval("'a 97 ="), "true");
        assert_eq!(eval("1.5 1 >"), "true");
        assert_eq!(eval("true 0 >="), "true");
        assert_eq!(eval("3 3 !="), "false");
    }

    #[test]
    fn test_strings_and_words() {
        assert_eq!(eval("\"abc\" \"abd\" <"), "true");
        assert_eq!(eval("\"dup\" [dup] first ="), "true");
        assert_eq!(eval("[swap] first [dup] first >"), "true");
        assert_eq!(eval("[foo] first \"foo\" ="), "true");
    }

    #[test]
    fn test_set_relations() {
        assert_eq!(eval("{1} {1 2} <"), "true");
        assert_eq!(eval("{1 2} {1 2} <"), "false");
        assert_eq!(eval("{1 2} {1 2} <="), "true");
        assert_eq!(eval("{1 2 3} {2} >"), "true");
        assert_eq!(eval("{1} {2} <="), "false");
        assert_eq!(eval("{1} {2} ="), "false");
    }

    #[test]
    fn test_mismatched_kinds() {
        assert_eq!(
            eval_err("[1] [1] ="),
            "run time error: different type needed for ="
        );
        assert_eq!(
            eval_err("1 \"1\" <"),
            "run time error: different type needed for <"
        );
        assert_eq!(
            eval_err("1 {1} ="),
            "run time error: different type needed for ="
        );
    }

    #[test]
    fn test_compare_sign() {
        assert_eq!(eval("1 2 compare"), "-1");
        assert_eq!(eval("2 2 compare"), "0");
        assert_eq!(eval("0.5 0 compare"), "1");
        assert_eq!(eval("\"b\" \"a\" compare"), "1");
    }

    #[test]
    fn test_nan_is_unordered() {
        assert_eq!(eval("-1.0 sqrt dup ="), "false");
        assert_eq!(eval("-1.0 sqrt dup !="), "true");
        assert_eq!(eval("-1.0 sqrt 1 <"), "false");
    }

    #[test]
    fn test_equal_is_structural() {
        assert_eq!(eval("[1 [2 \"x\"]] [1 [2 \"x\"]] equal"), "true");
        assert_eq!(eval("[1 [2]] [1 [3]] equal"), "false");
        assert_eq!(eval("[1 2] [1] equal"), "false");
        assert_eq!(eval("[1 [2]] [1 2] equal"), "false");
        assert_eq!(eval("1 1.0 equal"), "true");
    }

    #[test]
    fn test_membership() {
        assert_eq!(eval("3 [1 2 3] in"), "true");
        assert_eq!(eval("[1 2 3] 4 has"), "false");
        assert_eq!(eval("'b \"abc\" in"), "true");
        assert_eq!(eval("2 {1 2} in"), "true");
        assert_eq!(eval("{1 2} 70 has"), "false");
        assert_eq!(eval("\"x\" [\"x\" 1] in"), "true");
        assert_eq!(
            eval_err("1 2 in"),
            "run time error: aggregate parameter needed for in"
        );
    }

    #[test]
    fn test_sametype() {
        assert_eq!(eval("1 2 sametype"), "true");
        assert_eq!(eval("1 'a sametype"), "false");
        assert_eq!(eval("[dup] first [dup] first sametype"), "true");
        assert_eq!(eval("[dup] first [pop] first sametype"), "false");
    }
}
