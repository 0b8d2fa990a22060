//! File builtins
//!
//! File values are shared handles: `dup` copies the handle, not the
//! stream, and `fclose` closes it for every copy. Failures that C reports
//! through return codes stay data here too. `fopen` pushes the null file,
//! `fseek` pushes `true`, and `fremove`/`frename` push `false`.
//!
//! Most operations leave the stream on the stack so calls can be chained:
//!
//! ```text
//!   "log.txt" "w" fopen  "started" fputchars  10 fputch  fclose
//! ```

use crate::check;
use crate::display;
use crate::interp::Interp;
use joy_core::stream::{Stream, whence};
use joy_core::{Payload, Result};
use std::rc::Rc;
use tracing::debug;

fn standard(interp: &mut Interp, index: usize) -> Result<()> {
    let stream = Rc::clone(&interp.std_streams[index]);
    interp.push(Payload::File(Some(stream)))
}

/// Stack effect: ( -- S )
pub fn stdin(interp: &mut Interp) -> Result<()> {
    standard(interp, 0)
}

/// Stack effect: ( -- S )
pub fn stdout(interp: &mut Interp) -> Result<()> {
    standard(interp, 1)
}

/// Stack effect: ( -- S )
pub fn stderr(interp: &mut Interp) -> Result<()> {
    standard(interp, 2)
}

/// Open the file at P with C mode M. The null file on failure.
///
/// Stack effect: ( P M -- S )
pub fn fopen(interp: &mut Interp) -> Result<()> {
    let [path, mode] = interp.args::<2>("fopen")?;
    let mode = check::string("fopen", &mode)?;
    let path = check::string2("fopen", &path)?;
    let stream = match Stream::open(&path, &mode) {
        Ok(stream) => Some(stream),
        Err(e) => {
            debug!(path = &*path, mode = &*mode, error = %e, "fopen failed");
            None
        }
    };
    interp.replace(2, Payload::File(stream))
}

/// Stack effect: ( S -- )
pub fn fclose(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("fclose")?;
    if !matches!(s, Payload::File(None)) {
        check::file("fclose", &s)?.borrow_mut().close();
    }
    interp.drop_n(1);
    Ok(())
}

/// Stack effect: ( S -- S )
pub fn fflush(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("fflush")?;
    check::file("fflush", &s)?.borrow_mut().flush();
    Ok(())
}

/// Stack effect: ( S -- S B )
pub fn feof(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("feof")?;
    let eof = check::file("feof", &s)?.borrow().is_eof();
    interp.push(Payload::Bool(eof))
}

/// Stack effect: ( S -- S B )
pub fn ferror(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("ferror")?;
    let error = check::file("ferror", &s)?.borrow().is_error();
    interp.push(Payload::Bool(error))
}

/// Next byte of S as a character, or the integer -1 at end of file.
///
/// Stack effect: ( S -- S C )
pub fn fgetch(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("fgetch")?;
    let byte = check::file("fgetch", &s)?.borrow_mut().read_byte();
    interp.push(match byte {
        Some(b) => Payload::Char(char::from(b)),
        None => Payload::Int(-1),
    })
}

/// The next line of S, newline included.
///
/// Stack effect: ( S -- S L )
pub fn fgets(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("fgets")?;
    let line = check::file("fgets", &s)?.borrow_mut().read_line();
    interp.push(Payload::string(&String::from_utf8_lossy(&line)))
}

/// Up to I bytes of S as a list of integers.
///
/// Stack effect: ( S I -- S L )
pub fn fread(interp: &mut Interp) -> Result<()> {
    let [s, count] = interp.args::<2>("fread")?;
    let count = check::integer("fread", &count)?;
    let stream = check::file("fread", &s)?;
    let bytes = stream
        .borrow_mut()
        .read_bytes(usize::try_from(count).unwrap_or(0));
    let items = bytes.into_iter().map(|b| Payload::Int(i64::from(b))).collect();
    let list = interp.list_from(items, None)?;
    interp.reshape(2, vec![s, Payload::List(list)])
}

/// Write the integers of L to S as bytes.
///
/// Stack effect: ( S L -- S )
pub fn fwrite(interp: &mut Interp) -> Result<()> {
    let [s, l] = interp.args::<2>("fwrite")?;
    let list = check::list("fwrite", &l)?;
    let bytes = interp
        .items(list)
        .iter()
        .map(|item| match item {
            Payload::Int(n) => Ok(*n as u8),
            _ => Err(check::type_error("fwrite", "numeric list")),
        })
        .collect::<Result<Vec<u8>>>()?;
    check::file("fwrite", &s)?.borrow_mut().write(&bytes);
    interp.drop_n(1);
    Ok(())
}

/// Stack effect: ( P -- B )
pub fn fremove(interp: &mut Interp) -> Result<()> {
    let [path] = interp.args::<1>("fremove")?;
    let path = check::string("fremove", &path)?;
    let removed = std::fs::remove_file(&*path).is_ok();
    interp.replace(1, Payload::Bool(removed))
}

/// Stack effect: ( P1 P2 -- B )
pub fn frename(interp: &mut Interp) -> Result<()> {
    let [from, to] = interp.args::<2>("frename")?;
    let to = check::string("frename", &to)?;
    let from = check::string2("frename", &from)?;
    let renamed = std::fs::rename(&*from, &*to).is_ok();
    interp.replace(2, Payload::Bool(renamed))
}

/// Write X to S followed by a space.
///
/// Stack effect: ( S X -- S )
pub fn fput(interp: &mut Interp) -> Result<()> {
    let [s, x] = interp.args::<2>("fput")?;
    let stream = check::file("fput", &s)?;
    let mut text = display::factor(interp, &x);
    text.push(' ');
    stream.borrow_mut().write(text.as_bytes());
    interp.drop_n(1);
    Ok(())
}

/// Write the byte C to S.
///
/// Stack effect: ( S C -- S )
pub fn fputch(interp: &mut Interp) -> Result<()> {
    let [s, c] = interp.args::<2>("fputch")?;
    let c = check::integer("fputch", &c)?;
    check::file("fputch", &s)?.borrow_mut().write(&[c as u8]);
    interp.drop_n(1);
    Ok(())
}

/// Write the characters of a string to S, without quotes.
///
/// Stack effect: ( S "abc.." -- S )
pub fn fputchars(interp: &mut Interp) -> Result<()> {
    let [s, text] = interp.args::<2>("fputchars")?;
    let text = check::string("fputchars", &text)?;
    check::file("fputchars", &s)?.borrow_mut().write(text.as_bytes());
    interp.drop_n(1);
    Ok(())
}

/// Reposition S to P relative to W (0 start, 1 current, 2 end). B is
/// true when the seek failed.
///
/// Stack effect: ( S P W -- S B )
pub fn fseek(interp: &mut Interp) -> Result<()> {
    let [s, pos, code] = interp.args::<3>("fseek")?;
    let code = check::integer("fseek", &code)?;
    let pos = check::integer2("fseek", &pos)?;
    let stream = check::file("fseek", &s)?;
    let failed = match whence(code, pos) {
        Some(to) => stream.borrow_mut().seek(to),
        None => true,
    };
    interp.reshape(3, vec![s, Payload::Bool(failed)])
}

/// Stack effect: ( S -- S I )
pub fn ftell(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("ftell")?;
    let pos = check::file("ftell", &s)?.borrow_mut().tell();
    interp.push(Payload::Int(pos))
}

#[cfg(test)]
mod tests {
    use crate::display;
    use crate::testing::{eval, eval_err, interp, run, top};
    use joy_core::Payload;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn with_contents(text: &str) -> (NamedTempFile, String) {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", text).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        (file, path)
    }

    #[test]
    fn test_standard_streams() {
        assert_eq!(eval("stdout stdout = stdout stderr ="), "false true");
        assert_eq!(eval("stdout fflush file"), "true");
    }

    #[test]
    fn test_write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let path = path.to_str().unwrap();
        let mut joy = interp();
        run(
            &mut joy,
            &format!("\"{path}\" \"w\" fopen 42 fput \"hi\" fputchars 10 fputch fclose"),
        )
        .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "42 hi\n");
    }

    #[test]
    fn test_fgetch_and_fgets() {
        let (_file, path) = with_contents("xy\nz");
        let mut joy = interp();
        run(&mut joy, &format!("\"{path}\" \"r\" fopen fgetch swap fgets swap pop")).unwrap();
        let items = joy.stack_items();
        assert!(matches!(&items[0], Payload::Str(s) if &**s == "y\n"));
        assert!(matches!(items[1], Payload::Char('x')));

        let mut joy = interp();
        run(&mut joy, &format!("\"{path}\" \"r\" fopen fgets pop fgets pop feof")).unwrap();
        assert!(matches!(top(&joy), Payload::Bool(true)));
    }

    #[test]
    fn test_fgetch_at_end_of_file() {
        let (_file, path) = with_contents("");
        let mut joy = interp();
        run(&mut joy, &format!("\"{path}\" \"r\" fopen fgetch")).unwrap();
        assert!(matches!(top(&joy), Payload::Int(-1)));
    }

    #[test]
    fn test_failed_open_is_null_file() {
        assert_eq!(eval("\"/nonexistent/dir/x\" \"r\" fopen null"), "true");
        assert_eq!(eval("\"/nonexistent/dir/x\" \"r\" fopen fclose"), "");
        assert_eq!(
            eval_err("\"/nonexistent/dir/x\" \"r\" fopen feof"),
            "run time error: file needed for feof"
        );
    }

    #[test]
    fn test_fwrite_and_fread() {
        let (_file, path) = with_contents("");
        let mut joy = interp();
        run(&mut joy, &format!("\"{path}\" \"w\" fopen [104 105] fwrite fclose")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi");

        run(&mut joy, &format!("\"{path}\" \"r\" fopen 5 fread")).unwrap();
        assert_eq!(display::factor(&joy, &top(&joy)), "[104 105]");
        assert_eq!(
            eval_err("stdout [1 'a] fwrite"),
            "run time error: numeric list needed for fwrite"
        );
    }

    #[test]
    fn test_fread_with_a_huge_count_returns_what_is_there() {
        let (_file, path) = with_contents("xyz");
        let mut joy = interp();
        run(
            &mut joy,
            &format!("\"{path}\" \"r\" fopen 9223372036854775807 fread"),
        )
        .unwrap();
        assert_eq!(display::factor(&joy, &top(&joy)), "[120 121 122]");
    }

    #[test]
    fn test_fseek_and_ftell() {
        let (_file, path) = with_contents("abcdef");
        let mut joy = interp();
        run(
            &mut joy,
            &format!("\"{path}\" \"r\" fopen 4 0 fseek pop ftell swap fgetch"),
        )
        .unwrap();
        let items = joy.stack_items();
        assert!(matches!(items[0], Payload::Char('e')));
        assert!(matches!(items[2], Payload::Int(4)));

        let mut joy = interp();
        run(&mut joy, &format!("\"{path}\" \"r\" fopen 0 9 fseek")).unwrap();
        assert!(matches!(top(&joy), Payload::Bool(true)));
    }

    #[test]
    fn test_rename_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a.txt");
        let to = dir.path().join("b.txt");
        std::fs::write(&from, "x").unwrap();
        let (from, to) = (from.to_str().unwrap(), to.to_str().unwrap());
        assert_eq!(eval(&format!("\"{from}\" \"{to}\" frename")), "true");
        assert_eq!(eval(&format!("\"{to}\" fremove \"{to}\" fremove")), "false true");
    }

    #[test]
    fn test_fputch_needs_integer() {
        assert_eq!(
            eval_err("stdout 'a fputch"),
            "run time error: integer needed for fputch"
        );
    }
}
