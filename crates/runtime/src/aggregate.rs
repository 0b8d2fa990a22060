//! Aggregate builtins: lists, strings and sets
//!
//! Lists share structure. `rest`, `drop` and the second operand of
//! `concat` are reused as they are; only the cells in front of a shared
//! tail are copied. Strings and sets are plain values and are rebuilt.

use crate::check;
use crate::interp::Interp;
use crate::stack;
use joy_core::value::{set_first, set_members};
use joy_core::{NodeRef, Payload, Result, RuntimeError};

/// Members of an aggregate in order: list items, string characters, or
/// set members ascending. `None` if `p` is not an aggregate.
pub(crate) fn members(interp: &Interp, p: &Payload) -> Option<Vec<Payload>> {
    match p {
        Payload::List(list) => Some(interp.items(*list)),
        Payload::Str(s) => Some(s.chars().map(Payload::Char).collect()),
        Payload::Set(bits) => Some(set_members(*bits).map(|m| Payload::Int(i64::from(m))).collect()),
        _ => None,
    }
}

fn prepend(interp: &mut Interp, op: &'static str, aggregate: &Payload, elem: Payload) -> Result<Payload> {
    match aggregate {
        Payload::List(list) => {
            let id = interp.alloc(elem, *list)?;
            Ok(Payload::List(Some(id)))
        }
        Payload::Set(bits) => {
            let member = check::set_member(op, &elem)?;
            Ok(Payload::Set(bits | (1u64 << member)))
        }
        Payload::Str(s) => {
            let c = check::character(op, &elem)?;
            let mut text = String::with_capacity(s.len() + c.len_utf8());
            text.push(c);
            text.push_str(s);
            Ok(Payload::string(&text))
        }
        _ => Err(check::bad_aggregate(op)),
    }
}

/// Stack effect: ( X A -- B )
pub fn cons(interp: &mut Interp) -> Result<()> {
    let [x, a] = interp.args::<2>("cons")?;
    let result = prepend(interp, "cons", &a, x)?;
    interp.replace(2, result)
}

/// Stack effect: ( A X -- B )
pub fn swons(interp: &mut Interp) -> Result<()> {
    let [a, x] = interp.args::<2>("swons")?;
    let result = prepend(interp, "swons", &a, x)?;
    interp.replace(2, result)
}

/// First member and the rest of a non-empty aggregate.
fn split_first(interp: &Interp, op: &'static str, aggregate: &Payload) -> Result<(Payload, Payload)> {
    match aggregate {
        Payload::List(list) => {
            let id = list.ok_or(check::empty_list(op))?;
            let node = interp.node(id);
            Ok((node.payload.clone(), Payload::List(node.next)))
        }
        Payload::Str(s) => {
            let mut chars = s.chars();
            let first = chars.next().ok_or(check::empty_string(op))?;
            Ok((Payload::Char(first), Payload::string(chars.as_str())))
        }
        Payload::Set(bits) => {
            let first = set_first(*bits).ok_or(check::empty_set(op))?;
            Ok((
                Payload::Int(i64::from(first)),
                Payload::Set(bits & !(1u64 << first)),
            ))
        }
        _ => Err(check::bad_aggregate(op)),
    }
}

/// Stack effect: ( A -- F )
pub fn first(interp: &mut Interp) -> Result<()> {
    let [a] = interp.args::<1>("first")?;
    let (first, _) = split_first(interp, "first", &a)?;
    interp.replace(1, first)
}

/// Stack effect: ( A -- R )
pub fn rest(interp: &mut Interp) -> Result<()> {
    let [a] = interp.args::<1>("rest")?;
    let (_, rest) = split_first(interp, "rest", &a)?;
    interp.replace(1, rest)
}

/// Stack effect: ( A -- F R )
pub fn uncons(interp: &mut Interp) -> Result<()> {
    let [a] = interp.args::<1>("uncons")?;
    let (first, rest) = split_first(interp, "uncons", &a)?;
    interp.reshape(1, vec![first, rest])
}

/// Stack effect: ( A -- R F )
pub fn unswons(interp: &mut Interp) -> Result<()> {
    let [a] = interp.args::<1>("unswons")?;
    let (first, rest) = split_first(interp, "unswons", &a)?;
    interp.reshape(1, vec![rest, first])
}

fn index_into(interp: &Interp, op: &'static str, aggregate: &Payload, index: &Payload) -> Result<Payload> {
    let index = match index {
        Payload::Int(n) if *n >= 0 => *n as usize,
        _ => return Err(check::type_error(op, "non-negative integer")),
    };
    match aggregate {
        Payload::Set(bits) => {
            if *bits == 0 {
                return Err(check::empty_set(op));
            }
            set_members(*bits)
                .nth(index)
                .map(|m| Payload::Int(i64::from(m)))
                .ok_or(RuntimeError::Index { op })
        }
        Payload::Str(s) => s
            .chars()
            .nth(index)
            .map(Payload::Char)
            .ok_or(RuntimeError::Index { op }),
        Payload::List(list) => {
            if list.is_none() {
                return Err(check::empty_list(op));
            }
            interp
                .arena
                .iter(*list)
                .nth(index)
                .map(|(_, node)| node.payload.clone())
                .ok_or(RuntimeError::Index { op })
        }
        _ => Err(check::bad_aggregate(op)),
    }
}

/// Member of A at position I, counting from zero.
///
/// Stack effect: ( A I -- X )
pub fn at(interp: &mut Interp) -> Result<()> {
    let [a, i] = interp.args::<2>("at")?;
    let x = index_into(interp, "at", &a, &i)?;
    interp.replace(2, x)
}

/// Stack effect: ( I A -- X )
pub fn of(interp: &mut Interp) -> Result<()> {
    let [i, a] = interp.args::<2>("of")?;
    let x = index_into(interp, "of", &a, &i)?;
    interp.replace(2, x)
}

/// Stack effect: ( A -- I )
pub fn size(interp: &mut Interp) -> Result<()> {
    let [a] = interp.args::<1>("size")?;
    let n = match &a {
        Payload::Set(bits) => bits.count_ones() as usize,
        Payload::Str(s) => s.chars().count(),
        Payload::List(list) => interp.arena.iter(*list).count(),
        _ => return Err(check::bad_aggregate("size")),
    };
    interp.replace(1, Payload::Int(n as i64))
}

/// Pick the clause whose first item has the type of X and leave its
/// remainder; the last clause is the default and is left whole.
///
/// Stack effect: ( X [..[X Xs]..] -- X [Xs] )
pub fn opcase(interp: &mut Interp) -> Result<()> {
    let [x, clauses] = interp.args::<2>("opcase")?;
    let clauses = check::list("opcase", &clauses)?;
    if clauses.is_none() {
        return Err(check::empty_list("opcase"));
    }
    let mut chosen = None;
    for (_, node) in interp.arena.iter(clauses) {
        let is_last = node.next.is_none();
        let Payload::List(clause) = node.payload else {
            return Err(check::type_error("opcase", "internal list"));
        };
        if is_last {
            chosen = Some(clause);
            break;
        }
        let head = clause.map(|c| interp.node(c));
        if head.is_some_and(|h| h.payload.same_type(&x)) {
            chosen = Some(head.and_then(|h| h.next));
            break;
        }
    }
    let result = chosen.flatten();
    interp.replace(1, Payload::List(result))
}

/// Stack effect: ( A N -- B )
pub fn drop(interp: &mut Interp) -> Result<()> {
    let [a, n] = interp.args::<2>("drop")?;
    let n = check::integer("drop", &n)?;
    let skip = usize::try_from(n).unwrap_or(0);
    let result = match &a {
        Payload::Set(bits) => Payload::Set(
            set_members(*bits)
                .skip(skip)
                .fold(0, |set, m| set | (1u64 << m)),
        ),
        Payload::Str(s) => Payload::string(&s.chars().skip(skip).collect::<String>()),
        Payload::List(list) => Payload::List(crate::interp::skip(&interp.arena, *list, skip)),
        _ => return Err(check::bad_aggregate("drop")),
    };
    interp.replace(2, result)
}

/// Stack effect: ( A N -- B )
pub fn take(interp: &mut Interp) -> Result<()> {
    let [a, n] = interp.args::<2>("take")?;
    let n = check::integer("take", &n)?;
    let keep = usize::try_from(n).unwrap_or(0);
    let result = match &a {
        Payload::Set(bits) => Payload::Set(
            set_members(*bits)
                .take(keep)
                .fold(0, |set, m| set | (1u64 << m)),
        ),
        Payload::Str(s) => {
            if keep >= s.chars().count() {
                a.clone()
            } else {
                Payload::string(&s.chars().take(keep).collect::<String>())
            }
        }
        Payload::List(list) => {
            let items: Vec<Payload> = interp
                .arena
                .iter(*list)
                .take(keep)
                .map(|(_, node)| node.payload.clone())
                .collect();
            Payload::List(interp.list_from(items, None)?)
        }
        _ => return Err(check::bad_aggregate("take")),
    };
    interp.replace(2, result)
}

fn joined(interp: &mut Interp, front: NodeRef, back: NodeRef) -> Result<NodeRef> {
    if front.is_none() {
        return Ok(back);
    }
    let items = interp.items(front);
    interp.list_from(items, back)
}

/// Stack effect: ( S T -- U )
pub fn concat(interp: &mut Interp) -> Result<()> {
    let [s, t] = interp.args::<2>("concat")?;
    if !s.same_type(&t) {
        return Err(check::type_error("concat", "two parameters of the same type"));
    }
    let result = match (&s, &t) {
        (Payload::Set(a), Payload::Set(b)) => Payload::Set(a | b),
        (Payload::Str(a), Payload::Str(b)) => {
            let mut text = String::with_capacity(a.len() + b.len());
            text.push_str(a);
            text.push_str(b);
            Payload::string(&text)
        }
        (Payload::List(a), Payload::List(b)) => Payload::List(joined(interp, *a, *b)?),
        _ => return Err(check::bad_aggregate("concat")),
    };
    interp.replace(2, result)
}

/// X inserted between S and T.
///
/// Stack effect: ( X S T -- U )
pub fn enconcat(interp: &mut Interp) -> Result<()> {
    let [_, s, t] = interp.args::<3>("enconcat")?;
    if !s.same_type(&t) {
        return Err(check::type_error("enconcat", "two parameters of the same type"));
    }
    stack::swapd(interp)?;
    cons(interp)?;
    concat(interp)
}
