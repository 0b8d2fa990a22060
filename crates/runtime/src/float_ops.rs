//! Floating-point builtins
//!
//! Every operand may be an integer or a float; integers are widened before
//! the call. Results are floats except for `trunc`, and the integer half of
//! `frexp`.

use crate::check;
use crate::interp::Interp;
use joy_core::{Payload, Result};

fn unary(interp: &mut Interp, op: &'static str, f: fn(f64) -> f64) -> Result<()> {
    let [x] = interp.args::<1>(op)?;
    let x = check::float(op, &x)?;
    interp.replace(1, Payload::Float(f(x)))
}

fn binary(interp: &mut Interp, op: &'static str, f: fn(f64, f64) -> f64) -> Result<()> {
    let [x, y] = interp.args::<2>(op)?;
    match (x.floatable(), y.floatable()) {
        (Some(x), Some(y)) => interp.replace(2, Payload::Float(f(x, y))),
        _ => Err(check::type_error(op, "two floats or integers")),
    }
}

/// `frexp(3)`: mantissa with magnitude in [0.5, 1) and exponent.
fn split_exponent(x: f64) -> (f64, i64) {
    if x == 0.0 || !x.is_finite() {
        return (x, 0);
    }
    let bits = x.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i64;
    if biased == 0 {
        // subnormal
        let (m, e) = split_exponent(x * 2f64.powi(54));
        return (m, e - 54);
    }
    let mantissa = f64::from_bits((bits & !(0x7ffu64 << 52)) | (1022u64 << 52));
    (mantissa, biased - 1022)
}

/// `ldexp(3)`: x times two to the e, scaling in steps so intermediate
/// powers stay finite.
fn scale(mut x: f64, mut e: i64) -> f64 {
    e = e.clamp(-2200, 2200);
    while e > 1000 {
        x *= 2f64.powi(1000);
        e -= 1000;
    }
    while e < -1000 {
        x *= 2f64.powi(-1000);
        e += 1000;
    }
    x * 2f64.powi(e as i32)
}

/// Stack effect: ( F -- G )
pub fn acos(interp: &mut Interp) -> Result<()> {
    unary(interp, "acos", f64::acos)
}

/// Stack effect: ( F -- G )
pub fn asin(interp: &mut Interp) -> Result<()> {
    unary(interp, "asin", f64::asin)
}

/// Stack effect: ( F -- G )
pub fn atan(interp: &mut Interp) -> Result<()> {
    unary(interp, "atan", f64::atan)
}

/// Arc tangent of F / G.
///
/// Stack effect: ( F G -- H )
pub fn atan2(interp: &mut Interp) -> Result<()> {
    binary(interp, "atan2", f64::atan2)
}

/// Stack effect: ( F -- G )
pub fn ceil(interp: &mut Interp) -> Result<()> {
    unary(interp, "ceil", f64::ceil)
}

/// Stack effect: ( F -- G )
pub fn cos(interp: &mut Interp) -> Result<()> {
    unary(interp, "cos", f64::cos)
}

/// Stack effect: ( F -- G )
pub fn cosh(interp: &mut Interp) -> Result<()> {
    unary(interp, "cosh", f64::cosh)
}

/// Stack effect: ( F -- G )
pub fn exp(interp: &mut Interp) -> Result<()> {
    unary(interp, "exp", f64::exp)
}

/// Stack effect: ( F -- G )
pub fn floor(interp: &mut Interp) -> Result<()> {
    unary(interp, "floor", f64::floor)
}

/// Stack effect: ( F -- G )
pub fn log(interp: &mut Interp) -> Result<()> {
    unary(interp, "log", f64::ln)
}

/// Stack effect: ( F -- G )
pub fn log10(interp: &mut Interp) -> Result<()> {
    unary(interp, "log10", f64::log10)
}

/// Stack effect: ( F G -- H )
pub fn pow(interp: &mut Interp) -> Result<()> {
    binary(interp, "pow", f64::powf)
}

/// Stack effect: ( F -- G )
pub fn sin(interp: &mut Interp) -> Result<()> {
    unary(interp, "sin", f64::sin)
}

/// Stack effect: ( F -- G )
pub fn sinh(interp: &mut Interp) -> Result<()> {
    unary(interp, "sinh", f64::sinh)
}

/// Stack effect: ( F -- G )
pub fn sqrt(interp: &mut Interp) -> Result<()> {
    unary(interp, "sqrt", f64::sqrt)
}

/// Stack effect: ( F -- G )
pub fn tan(interp: &mut Interp) -> Result<()> {
    unary(interp, "tan", f64::tan)
}

/// Stack effect: ( F -- G )
pub fn tanh(interp: &mut Interp) -> Result<()> {
    unary(interp, "tanh", f64::tanh)
}

/// Truncate towards zero, giving an integer.
///
/// Stack effect: ( F -- I )
pub fn trunc(interp: &mut Interp) -> Result<()> {
    let [x] = interp.args::<1>("trunc")?;
    let x = check::float("trunc", &x)?;
    interp.replace(1, Payload::Int(x.trunc() as i64))
}

/// Split into a mantissa in [0.5, 1) and a power of two.
///
/// Stack effect: ( F -- G I )
pub fn frexp(interp: &mut Interp) -> Result<()> {
    let [x] = interp.args::<1>("frexp")?;
    let x = check::float("frexp", &x)?;
    let (mantissa, exp) = split_exponent(x);
    interp.reshape(1, vec![Payload::Float(mantissa), Payload::Int(exp)])
}

/// F times two to the I.
///
/// Stack effect: ( F I -- G )
pub fn ldexp(interp: &mut Interp) -> Result<()> {
    let [x, e] = interp.args::<2>("ldexp")?;
    let e = check::integer("ldexp", &e)?;
    let x = check::float("ldexp", &x)?;
    interp.replace(2, Payload::Float(scale(x, e)))
}

/// Fractional and integral parts, both floats.
///
/// Stack effect: ( F -- G H )
pub fn modf(interp: &mut Interp) -> Result<()> {
    let [x] = interp.args::<1>("modf")?;
    let x = check::float("modf", &x)?;
    let whole = x.trunc();
    let fraction = if x.is_infinite() { 0.0f64.copysign(x) } else { x - whole };
    interp.reshape(1, vec![Payload::Float(fraction), Payload::Float(whole)])
}
