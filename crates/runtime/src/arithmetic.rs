//! Integer, character and logical arithmetic
//!
//! Integer arithmetic wraps on overflow. When either operand of `+ - * /`
//! is a float and the other is a float or an integer the operation is done
//! in floating point instead. A character on the left of `+` or `-` keeps
//! the result a character, which is how programs step through the
//! alphabet (`'a 1 +`).

use crate::check;
use crate::interp::Interp;
use joy_core::{Payload, Result, RuntimeError};

/// Character with code `n`. Codes outside Unicode map to U+FFFD.
pub(crate) fn char_of(n: i64) -> char {
    u32::try_from(n)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Both operands as floats, if at least one of them is a float and the
/// other is a float or an integer.
pub(crate) fn float_pair(x: &Payload, y: &Payload) -> Option<(f64, f64)> {
    match (x, y) {
        (Payload::Float(_), _) | (_, Payload::Float(_)) => Some((x.floatable()?, y.floatable()?)),
        _ => None,
    }
}

fn integers(op: &'static str, x: &Payload, y: &Payload) -> Result<(i64, i64)> {
    match (x, y) {
        (Payload::Int(a), Payload::Int(b)) => Ok((*a, *b)),
        _ => Err(check::type_error(op, "two integers")),
    }
}

fn same_types(op: &'static str, x: &Payload, y: &Payload) -> Result<()> {
    if x.same_type(y) {
        Ok(())
    } else {
        Err(check::type_error(op, "two parameters of the same type"))
    }
}

fn nonzero(op: &'static str, n: i64) -> Result<()> {
    if n == 0 {
        return Err(RuntimeError::DivisionByZero {
            op,
            needed: "non-zero operand",
        });
    }
    Ok(())
}

// ---- logic ----------------------------------------------------------------

fn logical(
    interp: &mut Interp,
    op: &'static str,
    on_sets: fn(u64, u64) -> u64,
    on_values: fn(&Payload, &Payload) -> bool,
) -> Result<()> {
    let [x, y] = interp.args::<2>(op)?;
    same_types(op, &x, &y)?;
    let result = match (&x, &y) {
        (Payload::Set(a), Payload::Set(b)) => Payload::Set(on_sets(*a, *b)),
        (Payload::Bool(_) | Payload::Char(_) | Payload::Int(_) | Payload::List(_), _) => {
            Payload::Bool(on_values(&x, &y))
        }
        _ => return Err(check::bad_data(op)),
    };
    interp.replace(2, result)
}

/// Differ as raw values: numbers by value, lists by identity.
fn differ(x: &Payload, y: &Payload) -> bool {
    match (x, y) {
        (Payload::List(a), Payload::List(b)) => a != b,
        _ => x.numeric() != y.numeric(),
    }
}

/// Set intersection, or logical conjunction.
///
/// Stack effect: ( X Y -- Z )
pub fn and(interp: &mut Interp) -> Result<()> {
    logical(interp, "and", |a, b| a & b, |x, y| x.truthy() && y.truthy())
}

/// Set union, or logical disjunction.
///
/// Stack effect: ( X Y -- Z )
pub fn or(interp: &mut Interp) -> Result<()> {
    logical(interp, "or", |a, b| a | b, |x, y| x.truthy() || y.truthy())
}

/// Symmetric difference of sets; for other values, whether they differ.
///
/// Stack effect: ( X Y -- Z )
pub fn xor(interp: &mut Interp) -> Result<()> {
    logical(interp, "xor", |a, b| a ^ b, differ)
}

/// Set complement, or logical negation.
///
/// Stack effect: ( X -- Y )
pub fn not(interp: &mut Interp) -> Result<()> {
    let [x] = interp.args::<1>("not")?;
    let result = match x {
        Payload::Set(bits) => Payload::Set(!bits),
        Payload::Bool(b) => Payload::Bool(!b),
        _ => return Err(check::bad_data("not")),
    };
    interp.replace(1, result)
}

// ---- arithmetic -----------------------------------------------------------

fn plus_minus(
    interp: &mut Interp,
    op: &'static str,
    on_floats: fn(f64, f64) -> f64,
    on_ints: fn(i64, i64) -> i64,
) -> Result<()> {
    let [m, i] = interp.args::<2>(op)?;
    if let Some((a, b)) = float_pair(&m, &i) {
        return interp.replace(2, Payload::Float(on_floats(a, b)));
    }
    let i = check::integer(op, &i)?;
    let result = match m {
        Payload::Char(c) => Payload::Char(char_of(on_ints(i64::from(u32::from(c)), i))),
        Payload::Int(n) => Payload::Int(on_ints(n, i)),
        _ => return Err(check::type_error(op, "numeric second parameter")),
    };
    interp.replace(2, result)
}

/// Stack effect: ( M I -- N )
pub fn plus(interp: &mut Interp) -> Result<()> {
    plus_minus(interp, "+", |a, b| a + b, i64::wrapping_add)
}

/// Stack effect: ( M I -- N )
pub fn minus(interp: &mut Interp) -> Result<()> {
    plus_minus(interp, "-", |a, b| a - b, i64::wrapping_sub)
}

/// Stack effect: ( I J -- K )
pub fn mul(interp: &mut Interp) -> Result<()> {
    let [x, y] = interp.args::<2>("*")?;
    if let Some((a, b)) = float_pair(&x, &y) {
        return interp.replace(2, Payload::Float(a * b));
    }
    let (a, b) = integers("*", &x, &y)?;
    interp.replace(2, Payload::Int(a.wrapping_mul(b)))
}

/// Stack effect: ( I J -- K )
pub fn divide(interp: &mut Interp) -> Result<()> {
    let [x, y] = interp.args::<2>("/")?;
    if matches!(y, Payload::Int(0)) || matches!(y, Payload::Float(f) if f == 0.0) {
        return Err(RuntimeError::DivisionByZero {
            op: "/",
            needed: "non-zero divisor",
        });
    }
    if let Some((a, b)) = float_pair(&x, &y) {
        return interp.replace(2, Payload::Float(a / b));
    }
    let (a, b) = integers("/", &x, &y)?;
    interp.replace(2, Payload::Int(a.wrapping_div(b)))
}

/// Remainder of integer division, or `fmod` for floats.
///
/// Stack effect: ( I J -- K )
pub fn rem(interp: &mut Interp) -> Result<()> {
    let [x, y] = interp.args::<2>("rem")?;
    if let Some((a, b)) = float_pair(&x, &y) {
        return interp.replace(2, Payload::Float(a % b));
    }
    let (a, b) = integers("rem", &x, &y)?;
    nonzero("rem", b)?;
    interp.replace(2, Payload::Int(a.wrapping_rem(b)))
}

/// Quotient and remainder.
///
/// Stack effect: ( I J -- K L )
pub fn div(interp: &mut Interp) -> Result<()> {
    let [x, y] = interp.args::<2>("div")?;
    let (a, b) = integers("div", &x, &y)?;
    nonzero("div", b)?;
    interp.reshape(
        2,
        vec![Payload::Int(a.wrapping_div(b)), Payload::Int(a.wrapping_rem(b))],
    )
}

fn float_or_int(
    interp: &mut Interp,
    op: &'static str,
    on_int: fn(i64) -> i64,
    on_float: fn(f64) -> f64,
) -> Result<()> {
    let [x] = interp.args::<1>(op)?;
    let result = match x {
        Payload::Int(n) => Payload::Int(on_int(n)),
        _ => Payload::Float(on_float(check::float(op, &x)?)),
    };
    interp.replace(1, result)
}

/// -1, 0 or 1 by the sign of the number.
///
/// Stack effect: ( N1 -- N2 )
pub fn sign(interp: &mut Interp) -> Result<()> {
    float_or_int(interp, "sign", i64::signum, |f| {
        if f < 0.0 {
            -1.0
        } else if f > 0.0 {
            1.0
        } else {
            0.0
        }
    })
}

/// Stack effect: ( I -- J )
pub fn neg(interp: &mut Interp) -> Result<()> {
    float_or_int(interp, "neg", i64::wrapping_neg, |f| -f)
}

/// Stack effect: ( N1 -- N2 )
pub fn abs(interp: &mut Interp) -> Result<()> {
    float_or_int(interp, "abs", i64::wrapping_abs, f64::abs)
}

/// Stack effect: ( C -- I )
pub fn ord(interp: &mut Interp) -> Result<()> {
    let [c] = interp.args::<1>("ord")?;
    let n = check::numeric("ord", &c)?;
    interp.replace(1, Payload::Int(n))
}

/// Stack effect: ( I -- C )
pub fn chr(interp: &mut Interp) -> Result<()> {
    let [n] = interp.args::<1>("chr")?;
    let n = check::numeric("chr", &n)?;
    interp.replace(1, Payload::Char(char_of(n)))
}

fn step(interp: &mut Interp, op: &'static str, delta: i64) -> Result<()> {
    let [m] = interp.args::<1>(op)?;
    let n = check::numeric(op, &m)?.wrapping_add(delta);
    let result = match m {
        Payload::Char(_) => Payload::Char(char_of(n)),
        _ => Payload::Int(n),
    };
    interp.replace(1, result)
}

/// Predecessor; characters stay characters.
///
/// Stack effect: ( M -- N )
pub fn pred(interp: &mut Interp) -> Result<()> {
    step(interp, "pred", -1)
}

/// Successor; characters stay characters.
///
/// Stack effect: ( M -- N )
pub fn succ(interp: &mut Interp) -> Result<()> {
    step(interp, "succ", 1)
}

fn extreme(interp: &mut Interp, op: &'static str, take_second: fn(f64, f64) -> bool) -> Result<()> {
    let [x, y] = interp.args::<2>(op)?;
    if let Some((a, b)) = float_pair(&x, &y) {
        let pick = if take_second(b, a) { a } else { b };
        return interp.replace(2, Payload::Float(pick));
    }
    same_types(op, &x, &y)?;
    let b = check::numeric(op, &y)?;
    let a = x.numeric().unwrap_or(b);
    let pick = if take_second(b as f64, a as f64) { a } else { b };
    let result = match y {
        Payload::Char(_) => Payload::Char(char_of(pick)),
        _ => Payload::Int(pick),
    };
    interp.replace(2, result)
}

/// Stack effect: ( N1 N2 -- N )
pub fn max(interp: &mut Interp) -> Result<()> {
    extreme(interp, "max", |top, second| top < second)
}

/// Stack effect: ( N1 N2 -- N )
pub fn min(interp: &mut Interp) -> Result<()> {
    extreme(interp, "min", |top, second| top > second)
}
