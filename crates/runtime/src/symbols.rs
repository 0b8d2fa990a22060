//! Symbol table builtins

use crate::check;
use crate::interp::Interp;
use joy_core::symbol::{truncate_name, valid_identifier};
use joy_core::{Payload, Result, RuntimeError};

/// Stack effect: ( -- I )
pub fn symtabmax(interp: &mut Interp) -> Result<()> {
    let max = interp.symbols.capacity();
    interp.push(Payload::Int(max as i64))
}

/// Stack effect: ( -- I )
pub fn symtabindex(interp: &mut Interp) -> Result<()> {
    let len = interp.symbols.len();
    interp.push(Payload::Int(len as i64))
}

/// Names of all undefined user words, in table order.
///
/// Stack effect: ( -- [..] )
pub fn undefs(interp: &mut Interp) -> Result<()> {
    let names: Vec<Payload> = interp
        .symbols
        .undefined()
        .into_iter()
        .map(Payload::string)
        .collect();
    let list = interp.list_from(names, None)?;
    interp.push(Payload::List(list))
}

/// The name of a word, or of the type of a literal.
///
/// Stack effect: ( sym -- "sym" )
pub fn name(interp: &mut Interp) -> Result<()> {
    let [sym] = interp.args::<1>("name")?;
    let text = match &sym {
        Payload::User(id) => interp.symbols.name(*id).to_string(),
        Payload::Builtin(op) => interp.builtin(*op).name.to_string(),
        other => other.type_name().to_string(),
    };
    interp.replace(1, Payload::string(&text))
}

/// The word named by a string.
///
/// Stack effect: ( "sym" -- sym )
pub fn intern(interp: &mut Interp) -> Result<()> {
    let [s] = interp.args::<1>("intern")?;
    let s = check::string("intern", &s)?;
    let ident = truncate_name(&s);
    if !valid_identifier(ident) {
        return Err(RuntimeError::InvalidName {
            name: ident.to_string(),
        });
    }
    let word = interp.lookup(ident)?;
    interp.replace(1, word)
}

/// The body of a user word; empty for an undefined one.
///
/// Stack effect: ( U -- [P] )
pub fn body(interp: &mut Interp) -> Result<()> {
    let [u] = interp.args::<1>("body")?;
    let Payload::User(id) = u else {
        return Err(check::type_error("body", "user defined symbol"));
    };
    let body = interp.symbols.entry(id).body();
    interp.replace(1, Payload::List(body))
}

#[cfg(test)]
mod tests {
    use crate::testing::{define, eval, eval_err, interp, run, stack};

    #[test]
    fn test_name() {
        assert_eq!(eval("[dup] first name"), "\"dup\"");
        assert_eq!(eval("[foo] first name"), "\"foo\"");
        assert_eq!(eval("3 name"), "\" integer type\"");
    }

    #[test]
    fn test_intern_resolves() {
        assert_eq!(eval("\"dup\" intern"), "dup");
        assert_eq!(eval("\"dup\" intern [dup] first ="), "true");
        assert_eq!(eval("\"newword\" intern user"), "true");
    }

    #[test]
    fn test_intern_rejects_bad_names() {
        assert_eq!(
            eval_err("\"1abc\" intern"),
            "run time error: valid name needed for 1abc"
        );
        assert_eq!(
            eval_err("\"a.b\" intern"),
            "run time error: valid name needed for a.b"
        );
    }

    #[test]
    fn test_body() {
        let mut joy = interp();
        define(&mut joy, "square", "dup *");
        run(&mut joy, "[square] first body").unwrap();
        assert_eq!(stack(&joy), "[dup *]");
        assert_eq!(
            eval_err("[dup] first body"),
            "run time error: user defined symbol needed for body"
        );
    }

    #[test]
    fn test_undefs_in_table_order() {
        let mut joy = interp();
        run(&mut joy, "[zeta alpha _hidden] pop undefs").unwrap();
        assert_eq!(stack(&joy), "[\"zeta\" \"alpha\"]");
    }

    #[test]
    fn test_symbol_table_size() {
        let mut joy = interp();
        let natives = joy.symbols().len() as i64;
        run(&mut joy, "__symtabindex __symtabmax").unwrap();
        run(&mut joy, "[fresh] pop __symtabindex").unwrap();
        let items = joy.stack_items();
        assert!(matches!(items[0], joy_core::Payload::Int(n) if n == natives + 1));
        assert!(matches!(items[1], joy_core::Payload::Int(1000)));
        assert!(matches!(items[2], joy_core::Payload::Int(n) if n == natives));
    }
}
