//! File builtins, console output and the reader seam, driven through
//! whole programs.

mod common;

use common::{TokenReader, interp, interp_with_output, run, stack};
use joy_runtime::{Payload, RuntimeError};
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

#[test]
fn test_write_then_read_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let path = path.display();
    let mut joy = interp();
    run(
        &mut joy,
        &format!("\"{path}\" \"w\" fopen \"abc\" fputchars 100 fputch 7 fput fclose"),
    )
    .unwrap();
    assert_eq!(std::fs::read_to_string(dir.path().join("out.txt")).unwrap(), "abcd7 ");

    run(&mut joy, &format!("\"{path}\" \"r\" fopen fgetch swap 10 fread swap fclose")).unwrap();
    assert_eq!(stack(&joy), "[98 99 100 55 32] 'a");
}

#[test]
fn test_missing_file_gives_the_null_stream() {
    let mut joy = interp();
    run(&mut joy, "\"/no/such/dir/file\" \"r\" fopen").unwrap();
    assert_eq!(stack(&joy), "file:NULL");
    run(&mut joy, "fclose").unwrap();
    assert!(joy.stack_items().is_empty());
}

#[test]
fn test_remove_and_rename_report_success() {
    let dir = tempdir().unwrap();
    let from = dir.path().join("a");
    let to = dir.path().join("b");
    std::fs::write(&from, "x").unwrap();
    let mut joy = interp();
    run(
        &mut joy,
        &format!(
            "\"{}\" \"{}\" frename \"{}\" fremove \"{}\" fremove",
            from.display(),
            to.display(),
            to.display(),
            to.display()
        ),
    )
    .unwrap();
    assert_eq!(stack(&joy), "false true true");
}

#[test]
fn test_put_family_writes_to_the_output_sink() {
    let (mut joy, buf) = interp_with_output();
    run(&mut joy, "[1 'a \"s\" {1 2}] put 10 putch \"done\" putchars").unwrap();
    assert_eq!(buf.text(), "[1 'a \"s\" {1 2}] \ndone");
}

#[test]
fn test_get_reads_from_the_attached_reader() {
    let mut joy = interp();
    joy.set_reader(Box::new(TokenReader::new("[dup *] 6")));
    run(&mut joy, "get get swap i").unwrap();
    assert_eq!(stack(&joy), "36");
    let err = run(&mut joy, "get").unwrap_err();
    assert!(matches!(err, RuntimeError::Quit(0)));
}

#[test]
fn test_include_splices_file_input() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[1 2 3] [size]").unwrap();
    let mut joy = interp();
    joy.set_reader(Box::new(TokenReader::new("'z")));
    run(
        &mut joy,
        &format!("\"{}\" include get get i get", file.path().display()),
    )
    .unwrap();
    assert_eq!(stack(&joy), "'z 3");
}

#[test]
fn test_fget_reads_one_factor_per_line() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[1 [2]]").unwrap();
    writeln!(file, "42").unwrap();
    let mut joy = interp();
    joy.set_reader(Box::new(TokenReader::new("")));
    run(
        &mut joy,
        &format!("\"{}\" \"r\" fopen fget swap fget swap fget", file.path().display()),
    )
    .unwrap();
    let items = joy.stack_items();
    assert!(matches!(items[0], Payload::File(Some(_))));
    assert_eq!(stack(&joy).split_once(' ').unwrap().1, "42 [1 [2]]");
}

#[test]
fn test_include_of_a_missing_file_is_an_io_error() {
    let mut joy = interp();
    joy.set_reader(Box::new(TokenReader::new("")));
    let err = run(&mut joy, "\"/no/such/file.joy\" include").unwrap_err();
    assert!(matches!(err, RuntimeError::Io(_)));
}
