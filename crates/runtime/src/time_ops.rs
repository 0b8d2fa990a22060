//! Time builtins
//!
//! Calendar conversions go through the C library (`localtime_r`, `gmtime_r`,
//! `mktime`, `strftime`) so results follow the process time zone exactly.
//!
//! A broken-down time is the list
//!
//! ```text
//!   [ year month day hour minute second isdst yearday weekday ]
//! ```
//!
//! with months counted from 1 and weekdays 1 = Monday .. 7 = Sunday. When
//! decoding a list, fields are taken by position while they have the right
//! type; the first mismatch ends decoding and the rest stay zero.

use crate::check;
use crate::interp::Interp;
use joy_core::{NodeRef, Payload, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds of CPU time used by the process.
#[cfg(unix)]
pub(crate) fn cpu_clock() -> i64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: ts is a valid pointer to a timespec struct
    unsafe {
        libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts);
    }
    #[allow(clippy::unnecessary_cast)] // Required for 32-bit platforms
    let millis = (ts.tv_sec as i64).saturating_mul(1000);
    #[allow(clippy::unnecessary_cast)]
    millis.saturating_add(ts.tv_nsec as i64 / 1_000_000)
}

#[cfg(not(unix))]
pub(crate) fn cpu_clock() -> i64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static BASE: OnceLock<Instant> = OnceLock::new();
    let base = BASE.get_or_init(Instant::now);
    base.elapsed().as_millis().try_into().unwrap_or(i64::MAX)
}

/// CPU time in milliseconds since the interpreter started.
///
/// Stack effect: ( -- I )
pub fn clock(interp: &mut Interp) -> Result<()> {
    let elapsed = cpu_clock() - interp.start_clock;
    interp.push(Payload::Int(elapsed))
}

/// Seconds since the Epoch.
///
/// Stack effect: ( -- I )
pub fn time(interp: &mut Interp) -> Result<()> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    interp.push(Payload::Int(secs))
}

fn empty_tm() -> libc::tm {
    // SAFETY: `tm` is plain old data; all-zero is a valid value
    unsafe { std::mem::zeroed() }
}

fn encode(interp: &mut Interp, t: &libc::tm) -> Result<NodeRef> {
    let wday = if t.tm_wday == 0 { 7 } else { t.tm_wday };
    let fields = vec![
        Payload::Int(i64::from(t.tm_year) + 1900),
        Payload::Int(i64::from(t.tm_mon) + 1),
        Payload::Int(i64::from(t.tm_mday)),
        Payload::Int(i64::from(t.tm_hour)),
        Payload::Int(i64::from(t.tm_min)),
        Payload::Int(i64::from(t.tm_sec)),
        Payload::Bool(t.tm_isdst > 0),
        Payload::Int(i64::from(t.tm_yday)),
        Payload::Int(i64::from(wday)),
    ];
    interp.list_from(fields, None)
}

fn decode(interp: &Interp, list: NodeRef) -> libc::tm {
    let items = interp.items(list);
    let mut fields = items.iter().peekable();
    let mut t = empty_tm();
    let mut int_field = |offset: i64| -> Option<libc::c_int> {
        match fields.peek() {
            Some(Payload::Int(n)) => {
                let v = (n - offset) as libc::c_int;
                fields.next();
                Some(v)
            }
            _ => None,
        }
    };
    let Some(year) = int_field(1900) else { return t };
    t.tm_year = year;
    let Some(mon) = int_field(1) else { return t };
    t.tm_mon = mon;
    let Some(mday) = int_field(0) else { return t };
    t.tm_mday = mday;
    let Some(hour) = int_field(0) else { return t };
    t.tm_hour = hour;
    let Some(min) = int_field(0) else { return t };
    t.tm_min = min;
    let Some(sec) = int_field(0) else { return t };
    t.tm_sec = sec;
    drop(int_field);
    match fields.peek() {
        Some(Payload::Bool(b)) => {
            t.tm_isdst = libc::c_int::from(*b);
            fields.next();
        }
        _ => return t,
    }
    if let Some(Payload::Int(n)) = fields.peek() {
        t.tm_yday = *n as libc::c_int;
        fields.next();
    } else {
        return t;
    }
    if let Some(Payload::Int(n)) = fields.peek() {
        t.tm_wday = *n as libc::c_int;
    }
    t
}

fn broken_down(
    interp: &mut Interp,
    op: &'static str,
    convert: unsafe extern "C" fn(*const libc::time_t, *mut libc::tm) -> *mut libc::tm,
) -> Result<()> {
    let [secs] = interp.args::<1>(op)?;
    let secs = check::integer(op, &secs)? as libc::time_t;
    let mut t = empty_tm();
    // SAFETY: both pointers are valid for the duration of the call
    let converted = unsafe { convert(&secs, &mut t) };
    if converted.is_null() {
        return Err(check::type_error(op, "representable time"));
    }
    let list = encode(interp, &t)?;
    interp.replace(1, Payload::List(list))
}

/// Broken-down local time.
///
/// Stack effect: ( I -- T )
pub fn localtime(interp: &mut Interp) -> Result<()> {
    broken_down(interp, "localtime", libc::localtime_r)
}

/// Broken-down UTC time.
///
/// Stack effect: ( I -- T )
pub fn gmtime(interp: &mut Interp) -> Result<()> {
    broken_down(interp, "gmtime", libc::gmtime_r)
}

/// Seconds since the Epoch for a broken-down local time.
///
/// Stack effect: ( T -- I )
pub fn mktime(interp: &mut Interp) -> Result<()> {
    let [t] = interp.args::<1>("mktime")?;
    let list = check::list("mktime", &t)?;
    let mut t = decode(interp, list);
    // SAFETY: `t` is a valid, exclusively borrowed tm
    let secs = unsafe { libc::mktime(&mut t) };
    interp.replace(1, Payload::Int(secs as i64))
}

/// Format a broken-down time.
///
/// Stack effect: ( T S1 -- S2 )
pub fn strftime(interp: &mut Interp) -> Result<()> {
    let [t, fmt] = interp.args::<2>("strftime")?;
    let fmt = check::string("strftime", &fmt)?;
    let list = check::list("strftime", &t)?;
    let t = decode(interp, list);
    let fmt = crate::string_ops::c_string(&fmt);
    let mut buf = vec![0u8; 256];
    let written = loop {
        // SAFETY: `buf` is valid for `buf.len()` bytes and `fmt` is
        // NUL-terminated.
        let n = unsafe {
            libc::strftime(
                buf.as_mut_ptr().cast::<libc::c_char>(),
                buf.len(),
                fmt.as_ptr(),
                &t,
            )
        };
        // Zero is ambiguous (empty result or overflow); stop growing at 64K.
        if n > 0 || buf.len() >= 1 << 16 {
            break n;
        }
        buf.resize(buf.len() * 4, 0);
    };
    buf.truncate(written);
    let text = String::from_utf8_lossy(&buf).into_owned();
    interp.replace(2, Payload::string(&text))
}

#[cfg(test)]
mod tests {
    use crate::testing::{eval, eval_err};
    use serial_test::serial;

    #[test]
    fn test_gmtime_fields() {
        // 2001-09-09 01:46:40 UTC, a Sunday
        assert_eq!(
            eval("1000000000 gmtime"),
            "[2001 9 9 1 46 40 false 251 7]"
        );
    }

    #[test]
    fn test_gmtime_needs_integer() {
        assert_eq!(
            eval_err("\"x\" gmtime"),
            "run time error: integer needed for gmtime"
        );
    }

    #[test]
    fn test_strftime_from_gmtime() {
        assert_eq!(
            eval("0 gmtime \"%Y-%m-%d %H:%M\" strftime"),
            "\"1970-01-01 00:00\""
        );
    }

    #[test]
    fn test_strftime_partial_list() {
        assert_eq!(eval("[1999 12] \"%Y/%m\" strftime"), "\"1999/12\"");
    }

    #[test]
    #[serial]
    fn test_mktime_inverts_localtime() {
        assert_eq!(eval("86400 localtime mktime"), "86400");
    }

    #[test]
    fn test_time_is_recent() {
        let mut joy = crate::testing::interp();
        crate::testing::run(&mut joy, "time").unwrap();
        match crate::testing::top(&joy) {
            joy_core::Payload::Int(secs) => assert!(secs > 1_577_836_800),
            other => panic!("expected integer, got {:?}", other),
        }
    }

    #[test]
    fn test_clock_non_negative() {
        let mut joy = crate::testing::interp();
        crate::testing::run(&mut joy, "clock").unwrap();
        assert!(matches!(crate::testing::top(&joy), joy_core::Payload::Int(n) if n >= 0));
    }
}
