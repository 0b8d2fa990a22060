//! Process environment: shell commands, environment variables and the
//! command line.

use crate::check;
use crate::interp::Interp;
use joy_core::{Payload, Result};
use std::io::Write;
use std::process::Command;
use tracing::{debug, warn};

/// Run a command through `sh -c`. Its exit status is not reported.
///
/// Stack effect: ( "command" -- )
pub fn system(interp: &mut Interp) -> Result<()> {
    let [command] = interp.args::<1>("system")?;
    let command = check::string("system", &command)?;
    interp.drop_n(1);
    interp.output.flush()?;
    match Command::new("sh").arg("-c").arg(&*command).status() {
        Ok(status) => debug!(command = &*command, %status, "system"),
        Err(e) => warn!(command = &*command, "system failed: {}", e),
    }
    Ok(())
}

/// The value of an environment variable, or `""` when it is unset.
///
/// Stack effect: ( "variable" -- "value" )
pub fn getenv(interp: &mut Interp) -> Result<()> {
    let [name] = interp.args::<1>("getenv")?;
    let name = check::string("getenv", &name)?;
    let value = std::env::var_os(&*name)
        .map(|v| v.to_string_lossy().into_owned())
        .unwrap_or_default();
    interp.replace(1, Payload::string(&value))
}

/// The command line as a list of strings, program name first.
///
/// Stack effect: ( -- A )
pub fn argv(interp: &mut Interp) -> Result<()> {
    let items = interp.args.iter().map(|a| Payload::string(a)).collect();
    let list = interp.list_from(items, None)?;
    interp.push(Payload::List(list))
}

/// Stack effect: ( -- I )
pub fn argc(interp: &mut Interp) -> Result<()> {
    let count = interp.args.len() as i64;
    interp.push(Payload::Int(count))
}

#[cfg(test)]
mod tests {
    use crate::testing::{eval, eval_err, interp_with_output, run};
    use crate::Interp;
    use joy_core::Config;
    use serial_test::serial;
    use std::io;

    #[test]
    #[serial]
    fn test_getenv() {
        // SAFETY: serialized with every other test touching the environment
        unsafe { std::env::set_var("JOY_TEST_GETENV", "forty-two") };
        assert_eq!(eval("\"JOY_TEST_GETENV\" getenv"), "\"forty-two\"");
        unsafe { std::env::remove_var("JOY_TEST_GETENV") };
        assert_eq!(eval("\"JOY_TEST_GETENV\" getenv"), "\"\"");
        assert_eq!(
            eval_err("5 getenv"),
            "run time error: string needed for getenv"
        );
    }

    #[test]
    fn test_argv_and_argc() {
        let mut config = Config::new();
        config.args = vec!["joy".to_string(), "prog.joy".to_string()];
        let mut joy = Interp::new(config).unwrap().with_output(Box::new(io::sink()));
        run(&mut joy, "argv argc").unwrap();
        assert_eq!(crate::testing::stack(&joy), "2 [\"joy\" \"prog.joy\"]");
        assert_eq!(eval("argv argc"), "0 []");
    }

    #[test]
    #[cfg(unix)]
    fn test_system_runs_a_shell_command() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let (mut joy, _buf) = interp_with_output();
        run(&mut joy, &format!("\"touch {}\" system", marker.display())).unwrap();
        assert!(marker.exists());
        assert!(joy.stack_items().is_empty());
    }
}
