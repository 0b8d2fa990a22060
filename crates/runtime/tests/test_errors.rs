//! Error reporting and recovery at the top level.

mod common;

use common::{interp, interp_with, run, stack};
use joy_runtime::{Config, RuntimeError};
use std::sync::atomic::Ordering;

fn message(src: &str) -> String {
    let mut joy = interp();
    run(&mut joy, src).unwrap_err().to_string()
}

#[test]
fn test_checked_errors_name_the_operator() {
    assert_eq!(message("pop"), "run time error: one parameter needed for pop");
    assert_eq!(message("1 swap"), "run time error: two parameters needed for swap");
    assert_eq!(message("[] first"), "run time error: non-empty list needed for first");
    assert_eq!(message("1 0 /"), "run time error: non-zero divisor needed for /");
    assert_eq!(
        message("1 [2] [3] ifte"),
        "run time error: quotation as third parameter needed for ifte"
    );
}

#[test]
fn test_undefined_words() {
    let mut joy = interp();
    let err = run(&mut joy, "1 nosuchword").unwrap_err();
    assert!(matches!(err, RuntimeError::UndefinedWord { ref name } if name == "nosuchword"));

    let mut joy = interp_with(Config::new().with_undef_error(false));
    run(&mut joy, "1 nosuchword 2").unwrap();
    assert_eq!(stack(&joy), "2 1");
}

#[test]
fn test_recover_after_a_failure_inside_a_combinator() {
    let mut joy = interp();
    assert!(run(&mut joy, "1 [2 [0 /] i] nullary").is_err());
    assert_eq!(stack(&joy), "0 2 1");
    joy.recover();
    run(&mut joy, "+ +").unwrap();
    assert_eq!(stack(&joy), "3");
}

#[test]
fn test_abort_flag_stops_the_running_program() {
    let mut joy = interp();
    joy.abort_handle().store(true, Ordering::SeqCst);
    let err = run(&mut joy, "1 2 +").unwrap_err();
    assert!(matches!(err, RuntimeError::Aborted));
    run(&mut joy, "1 2 +").unwrap();
    assert_eq!(stack(&joy), "3");
}

#[test]
fn test_quit_and_abort_words() {
    let mut joy = interp();
    assert!(matches!(run(&mut joy, "1 quit 2"), Err(RuntimeError::Quit(0))));
    assert_eq!(stack(&joy), "1");
    assert!(matches!(run(&mut joy, "abort"), Err(RuntimeError::Aborted)));
}

#[test]
fn test_reader_builtins_without_a_reader() {
    assert_eq!(message("get"), "run time error: attached reader needed for get");
    assert_eq!(message("stdin fget"), "run time error: attached reader needed for fget");
}
