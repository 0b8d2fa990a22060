//! Term execution engine
//!
//! `exeterm` runs a term (a list of nodes) against the operand stack. Each
//! call owns one slot on the continuation stack holding a cursor into the
//! term it is executing; the cursor advances in place as nodes are consumed.
//!
//! ```text
//!   conts: [ ..outer cursors.. | cursor ] ──► [dup] ──► [*] ──► ∅
//!                                  ▲
//!                        advanced before dispatch
//! ```
//!
//! A user word in tail position (the last node of the cursor's term)
//! replaces the cursor with the word's body instead of recursing, so long
//! chains of tail calls run in constant native stack. Anywhere else the
//! body runs in a nested `exeterm`. Combinators are builtins that call
//! back into `exeterm` for their quotations, so native depth follows the
//! nesting of quotations, not the length of data.

use crate::builtins;
use crate::interp::Interp;
use crate::signal;
use joy_core::{NodeRef, Payload, Result, RuntimeError};
use tracing::trace;

impl Interp {
    /// Execute `term` to completion.
    ///
    /// The continuation stack is restored to its entry depth on every exit,
    /// including errors.
    pub fn exeterm(&mut self, term: NodeRef) -> Result<()> {
        if term.is_none() {
            return Ok(());
        }
        let depth = self.conts.len();
        self.conts.push(term);
        let result = self.run_cursor(depth);
        self.conts.truncate(depth);
        result
    }

    fn run_cursor(&mut self, slot: usize) -> Result<()> {
        while let Some(id) = self.conts[slot] {
            if signal::take(&self.abort) {
                return Err(RuntimeError::Aborted);
            }
            let node = self.arena.get(id);
            let (payload, next) = (node.payload.clone(), node.next);
            self.conts[slot] = next;
            if self.flags.trace_gc > 5 {
                trace!(node = id.index(), tag = payload.tag(), "exeterm step");
            }
            match payload {
                Payload::User(sym) => {
                    let body = self.symbols.entry(sym).body();
                    if body.is_none() {
                        if self.flags.undef_error != 0 {
                            return Err(RuntimeError::UndefinedWord {
                                name: self.symbols.name(sym).to_string(),
                            });
                        }
                        continue;
                    }
                    if next.is_none() {
                        self.conts[slot] = body;
                    } else {
                        self.exeterm(body)?;
                    }
                }
                Payload::Builtin(op) => {
                    let builtin = self.builtin(op);
                    (builtin.run)(self)?;
                }
                Payload::Anon(anon) => {
                    let aux = builtins::anon(anon).ok_or_else(|| {
                        RuntimeError::Internal(format!("unknown anonymous procedure {}", anon.0))
                    })?;
                    (aux.run)(self)?;
                }
                Payload::Illegal => {
                    return Err(RuntimeError::Internal(format!(
                        "attempting to execute bad node {}",
                        id.index()
                    )));
                }
                literal => self.push(literal)?,
            }
        }
        Ok(())
    }

    /// Run `term` and read the truth value it left on top of the stack.
    pub(crate) fn test(&mut self, term: NodeRef) -> Result<bool> {
        self.exeterm(term)?;
        Ok(match self.stk {
            Some(id) => self.arena.get(id).payload.truthy(),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{interp, run, top};
    use joy_core::{Payload, RuntimeError};

    #[test]
    fn test_literals_pushed_in_order() {
        let mut joy = interp();
        run(&mut joy, "1 'a \"s\" 2.5 {1 2} [3]").unwrap();
        let items = joy.stack_items();
        assert_eq!(items.len(), 6);
        assert!(matches!(items[5], Payload::Int(1)));
        assert!(matches!(items[0], Payload::List(Some(_))));
    }

    #[test]
    fn test_undefined_word_is_error() {
        let mut joy = interp();
        let err = run(&mut joy, "1 nosuchword").unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedWord { ref name } if name == "nosuchword"));
    }

    #[test]
    fn test_undefined_word_ignored_when_flag_clear() {
        let mut joy = interp();
        joy.flags.undef_error = 0;
        run(&mut joy, "1 nosuchword 2").unwrap();
        assert_eq!(joy.stack_items().len(), 2);
    }

    #[test]
    fn test_tail_calls_do_not_grow_continuations() {
        let mut joy = interp();
        crate::testing::define(&mut joy, "w1", "1 w2");
        crate::testing::define(&mut joy, "w2", "2 w3");
        crate::testing::define(&mut joy, "w3", "conts size");
        run(&mut joy, "w1").unwrap();
        assert!(matches!(top(&joy), Payload::Int(1)));
        assert!(joy.conts.is_empty());
    }

    #[test]
    fn test_continuations_restored_after_error() {
        let mut joy = interp();
        assert!(run(&mut joy, "[1 0 /] i").is_err());
        assert!(joy.conts.is_empty());
    }

    #[test]
    fn test_abort_flag_stops_execution() {
        let mut joy = interp();
        let handle = joy.abort_handle();
        handle.store(true, std::sync::atomic::Ordering::SeqCst);
        let err = run(&mut joy, "1 2 +").unwrap_err();
        assert!(matches!(err, RuntimeError::Aborted));
        // The request is consumed; the next run proceeds.
        run(&mut joy, "1 2 +").unwrap();
        assert!(matches!(top(&joy), Payload::Int(3)));
    }
}
