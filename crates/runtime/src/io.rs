//! Console I/O and reader-backed input
//!
//! Output builtins write to the interpreter's output sink, not directly
//! to the process stdout. Input of program text goes through the attached
//! [`FactorReader`](crate::reader::FactorReader).

use crate::arithmetic::char_of;
use crate::check;
use crate::display;
use crate::interp::Interp;
use joy_core::{Payload, Result, RuntimeError};
use std::io::Write;

/// Read one factor from the current input. End of input ends the
/// program.
///
/// Stack effect: ( -- F )
pub fn get(interp: &mut Interp) -> Result<()> {
    let factor = interp.with_reader("get", |reader, interp| reader.read_factor(interp))?;
    match factor {
        Some(factor) => interp.push(factor),
        None => Err(RuntimeError::Quit(0)),
    }
}

/// Read one factor from S. Nothing is pushed at end of file; `feof`
/// reports it.
///
/// Stack effect: ( S -- S F )
pub fn fget(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("fget")?;
    let stream = check::file("fget", &s)?;
    let factor = interp.with_reader("fget", |reader, interp| {
        reader.read_factor_from(interp, &stream)
    })?;
    match factor {
        Some(factor) => interp.push(factor),
        None => Ok(()),
    }
}

/// Stack effect: ( -- C )
pub fn getch(interp: &mut Interp) -> Result<()> {
    let byte = interp.std_streams[0].borrow_mut().read_byte();
    interp.push(match byte {
        Some(b) => Payload::Char(char::from(b)),
        None => Payload::Int(-1),
    })
}

/// Write X followed by a space.
///
/// Stack effect: ( X -- )
pub fn put(interp: &mut Interp) -> Result<()> {
    let [x] = interp.args::<1>("put")?;
    let text = display::factor(interp, &x);
    write!(interp.output, "{} ", text)?;
    interp.drop_n(1);
    Ok(())
}

/// Write the character with code N.
///
/// Stack effect: ( N -- )
pub fn putch(interp: &mut Interp) -> Result<()> {
    let [n] = interp.args::<1>("putch")?;
    let c = char_of(check::numeric("putch", &n)?);
    write!(interp.output, "{}", c)?;
    interp.drop_n(1);
    Ok(())
}

/// Stack effect: ( "abc.." -- )
pub fn putchars(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("putchars")?;
    let s = check::string("putchars", &s)?;
    interp.output.write_all(s.as_bytes())?;
    interp.drop_n(1);
    Ok(())
}

/// Continue reading program text from a file, returning to the current
/// input when it is exhausted.
///
/// Stack effect: ( "filnam.ext" -- )
pub fn include(interp: &mut Interp) -> Result<()> {
    let [path] = interp.args::<1>("include")?;
    let path = check::string("include", &path)?;
    interp.drop_n(1);
    interp.with_reader("include", |reader, interp| reader.include(interp, &path))
}

#[cfg(test)]
mod tests {
    use crate::reader::FactorReader;
    use crate::testing::{eval_err, interp, interp_with_output, run, top};
    use joy_core::{FileRef, Payload, Result, RuntimeError};

    /// Hands out queued factors; `include` queues the path it was given.
    struct Scripted(Vec<Payload>);

    impl FactorReader for Scripted {
        fn read_factor(&mut self, _interp: &mut crate::Interp) -> Result<Option<Payload>> {
            Ok(self.0.pop())
        }

        fn read_factor_from(
            &mut self,
            interp: &mut crate::Interp,
            _stream: &FileRef,
        ) -> Result<Option<Payload>> {
            self.read_factor(interp)
        }

        fn include(&mut self, _interp: &mut crate::Interp, path: &str) -> Result<()> {
            self.0.push(Payload::string(path));
            Ok(())
        }
    }

    #[test]
    fn test_output_builtins() {
        let (mut joy, buf) = interp_with_output();
        run(&mut joy, "[1 \"a\"] put 'x putch \"hi\" putchars 65 putch").unwrap();
        assert_eq!(buf.text(), "[1 \"a\"] xhiA");
        assert!(joy.stack_items().is_empty());
    }

    #[test]
    fn test_putch_needs_numeric() {
        assert_eq!(
            eval_err("\"a\" putch"),
            "run time error: numeric needed for putch"
        );
    }

    #[test]
    fn test_reader_builtins_need_a_reader() {
        assert_eq!(
            eval_err("get"),
            "run time error: attached reader needed for get"
        );
        assert_eq!(
            eval_err("\"lib.joy\" include"),
            "run time error: attached reader needed for include"
        );
    }

    #[test]
    fn test_get_reads_through_the_reader() {
        let mut joy = interp();
        joy.set_reader(Box::new(Scripted(vec![Payload::Int(2), Payload::Int(1)])));
        run(&mut joy, "get get +").unwrap();
        assert!(matches!(top(&joy), Payload::Int(3)));
        let err = run(&mut joy, "get").unwrap_err();
        assert!(matches!(err, RuntimeError::Quit(0)));
    }

    #[test]
    fn test_include_and_fget() {
        let mut joy = interp();
        joy.set_reader(Box::new(Scripted(Vec::new())));
        run(&mut joy, "\"lib.joy\" include get").unwrap();
        assert!(matches!(top(&joy), Payload::Str(ref s) if &**s == "lib.joy"));

        run(&mut joy, "stdin fget").unwrap();
        assert!(matches!(top(&joy), Payload::File(Some(_))));
    }
}
