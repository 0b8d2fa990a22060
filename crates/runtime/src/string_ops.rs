//! String conversion builtins
//!
//! Number parsing and formatting follow the C library exactly, so these go
//! through `libc` (`strtoll`, `strtod`, `snprintf`) rather than Rust's own
//! parsers and formatters.

use crate::check;
use crate::interp::Interp;
use joy_core::{Payload, Result};
use libc::{c_char, c_int};
use std::ffi::{CStr, CString};

/// C view of a Joy string: everything before the first NUL.
pub(crate) fn c_string(s: &str) -> CString {
    let prefix = s.split('\0').next().unwrap_or("");
    CString::new(prefix).unwrap_or_default()
}

/// Run an `snprintf`-style call, growing the buffer until the output fits.
fn with_buffer(mut print: impl FnMut(*mut c_char, usize) -> c_int) -> String {
    let mut buf = vec![0u8; 64];
    loop {
        let wanted = print(buf.as_mut_ptr().cast::<c_char>(), buf.len());
        let Ok(wanted) = usize::try_from(wanted) else {
            return String::new();
        };
        if wanted < buf.len() {
            buf.truncate(wanted);
            return String::from_utf8_lossy(&buf).into_owned();
        }
        buf.resize(wanted + 1, 0);
    }
}

fn int_format(spec: char) -> Option<&'static CStr> {
    Some(match spec {
        'd' => c"%*.*lld",
        'i' => c"%*.*lli",
        'o' => c"%*.*llo",
        'x' => c"%*.*llx",
        'X' => c"%*.*llX",
        _ => return None,
    })
}

fn float_format(spec: char) -> Option<&'static CStr> {
    Some(match spec {
        'e' => c"%*.*e",
        'E' => c"%*.*E",
        'f' => c"%*.*f",
        'g' => c"%*.*g",
        'G' => c"%*.*G",
        _ => return None,
    })
}

fn c_int_of(n: i64) -> c_int {
    n.clamp(i64::from(c_int::MIN), i64::from(c_int::MAX)) as c_int
}

/// `%*.*<spec>` of an integer.
pub(crate) fn format_int(format: &CStr, width: i64, prec: i64, n: i64) -> String {
    let (width, prec) = (c_int_of(width), c_int_of(prec));
    with_buffer(|buf, len| {
        // SAFETY: `format` has exactly three conversions, matched by
        // (int, int, long long); `buf` is valid for `len` bytes.
        unsafe { libc::snprintf(buf, len, format.as_ptr(), width, prec, n as libc::c_longlong) }
    })
}

/// `%*.*<spec>` of a double.
pub(crate) fn format_float(format: &CStr, width: i64, prec: i64, f: f64) -> String {
    let (width, prec) = (c_int_of(width), c_int_of(prec));
    with_buffer(|buf, len| {
        // SAFETY: `format` has exactly three conversions, matched by
        // (int, int, double); `buf` is valid for `len` bytes.
        unsafe { libc::snprintf(buf, len, format.as_ptr(), width, prec, f) }
    })
}

/// `%g`, the form floats are printed in.
pub fn format_g(f: f64) -> String {
    with_buffer(|buf, len| {
        // SAFETY: one `%g` conversion matched by a double.
        unsafe { libc::snprintf(buf, len, c"%g".as_ptr(), f) }
    })
}

/// Convert a string to an integer in the given base (0 autodetects).
///
/// Stack effect: ( S I -- J )
pub fn strtol(interp: &mut Interp) -> Result<()> {
    let [s, base] = interp.args::<2>("strtol")?;
    let base = check::integer("strtol", &base)?;
    let s = check::string("strtol", &s)?;
    let text = c_string(&s);
    // SAFETY: `text` is NUL-terminated; a null end pointer is allowed.
    let n = unsafe { libc::strtoll(text.as_ptr(), std::ptr::null_mut(), c_int_of(base)) };
    interp.replace(2, Payload::Int(n))
}

/// Convert a string to a float.
///
/// Stack effect: ( S -- R )
pub fn strtod(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("strtod")?;
    let s = check::string("strtod", &s)?;
    let text = c_string(&s);
    // SAFETY: `text` is NUL-terminated; a null end pointer is allowed.
    let f = unsafe { libc::strtod(text.as_ptr(), std::ptr::null_mut()) };
    interp.replace(1, Payload::Float(f))
}

/// Format a numeric value with one of `d i o x X`, a width and a precision.
///
/// Stack effect: ( N C I J -- S )
pub fn format(interp: &mut Interp) -> Result<()> {
    let [n, spec, width, prec] = interp.args::<4>("format")?;
    let prec = check::integer("format", &prec)?;
    let width = check::integer2("format", &width)?;
    let spec = check::character("format", &spec)?;
    let format = int_format(spec).ok_or(check::type_error("format", "one of: d i o x X"))?;
    let n = check::numeric("format", &n)?;
    let text = format_int(format, width, prec, n);
    interp.replace(4, Payload::string(&text))
}

/// Format a float with one of `e E f g G`, a width and a precision.
///
/// Stack effect: ( F C I J -- S )
pub fn formatf(interp: &mut Interp) -> Result<()> {
    let [f, spec, width, prec] = interp.args::<4>("formatf")?;
    let prec = check::integer("formatf", &prec)?;
    let width = check::integer2("formatf", &width)?;
    let spec = check::character("formatf", &spec)?;
    let format = float_format(spec).ok_or(check::type_error("formatf", "one of: e E f g G"))?;
    let f = check::float("formatf", &f)?;
    let text = format_float(format, width, prec, f);
    interp.replace(4, Payload::string(&text))
}

#[cfg(test)]
mod tests {
    use crate::testing::{eval, eval_err};

    #[test]
    fn test_strtol_bases() {
        assert_eq!(eval("\"42\" 10 strtol"), "42");
        assert_eq!(eval("\"ff\" 16 strtol"), "255");
        assert_eq!(eval("\"0x1A\" 0 strtol"), "26");
        assert_eq!(eval("\"017\" 0 strtol"), "15");
        assert_eq!(eval("\"12abc\" 10 strtol"), "12");
    }

    #[test]
    fn test_strtol_checks_base_first() {
        assert_eq!(
            eval_err("\"1\" 'a strtol"),
            "run time error: integer needed for strtol"
        );
    }

    #[test]
    fn test_strtod() {
        assert_eq!(eval("\"2.5e1xyz\" strtod"), "25");
    }

    #[test]
    fn test_format_modes() {
        assert_eq!(eval("255 'x 4 0 format"), "\"  ff\"");
        assert_eq!(eval("7 'd 3 3 format"), "\"007\"");
        assert_eq!(eval("8 'o 0 0 format"), "\"10\"");
    }

    #[test]
    fn test_format_rejects_mode() {
        assert_eq!(
            eval_err("1 'q 1 1 format"),
            "run time error: one of: d i o x X needed for format"
        );
    }

    #[test]
    fn test_formatf() {
        assert_eq!(eval("3.14159 'f 6 2 formatf"), "\"  3.14\"");
        assert_eq!(eval("1500.0 'e 0 1 formatf"), "\"1.5e+03\"");
        assert_eq!(eval("2 'g 0 3 formatf"), "\"2\"");
    }
}
