//! Interpreter context
//!
//! One `Interp` owns everything a running Joy program touches: the node
//! arena, the symbol table, the operand stack, the dump of saved stacks,
//! the continuation stack used by the engine, the run-time flags and the
//! output sink.
//!
//! # Rooting discipline
//!
//! Any allocation may trigger a collection. The collector's roots are the
//! operand stack, every dump slot, every continuation cursor, every user
//! word body and module field, plus the payload and `next` of the node
//! being allocated. Code that keeps a `NodeRef` in a local across an
//! allocation must first park it somewhere on that list, normally with a
//! [`Frame`] register.

use crate::builtins::{self, Builtin};
use crate::reader::FactorReader;
use crate::signal;
use joy_core::stream::Stream;
use joy_core::{
    Arena, Config, FileRef, Node, NodeId, NodeRef, OpCode, Payload, Result, RuntimeError,
    SymbolTable,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, Write};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::{debug, info, warn};

/// Run-time flags readable and settable by programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub undef_error: i64,
    pub autoput: i64,
    pub echo: i64,
    pub trace_gc: i64,
}

pub struct Interp {
    pub(crate) arena: Arena,
    pub(crate) symbols: SymbolTable,
    pub(crate) stk: NodeRef,
    pub(crate) dump: Vec<NodeRef>,
    pub(crate) conts: Vec<NodeRef>,
    pub flags: Flags,
    pub(crate) args: Vec<String>,
    pub(crate) output: Box<dyn Write>,
    pub(crate) reader: Option<Box<dyn FactorReader>>,
    pub(crate) std_streams: [FileRef; 3],
    pub(crate) rng: StdRng,
    pub(crate) start_clock: i64,
    pub(crate) abort: Arc<AtomicBool>,
}

impl Interp {
    /// Build an interpreter with the builtin catalog entered in the symbol
    /// table.
    pub fn new(config: Config) -> Result<Self> {
        let mut symbols = SymbolTable::new();
        for (index, builtin) in builtins::CATALOG.iter().enumerate() {
            symbols.enter_native(builtin.name, OpCode(index as u16))?;
        }
        let abort = Arc::new(AtomicBool::new(false));
        if config.install_sigint {
            if let Err(e) = signal::install(&abort) {
                warn!("could not install SIGINT handler: {}", e);
            }
        }
        debug!(
            memory_max = config.memory_max,
            natives = symbols.len(),
            "interpreter created"
        );
        Ok(Interp {
            arena: Arena::new(config.memory_max),
            symbols,
            stk: None,
            dump: Vec::new(),
            conts: Vec::new(),
            flags: Flags {
                undef_error: i64::from(config.undef_error),
                autoput: config.autoput,
                echo: config.echo,
                trace_gc: config.trace_gc,
            },
            args: config.args,
            output: Box::new(io::stdout()),
            reader: None,
            std_streams: [Stream::stdin(), Stream::stdout(), Stream::stderr()],
            rng: StdRng::from_entropy(),
            start_clock: crate::time_ops::cpu_clock(),
            abort,
        })
    }

    /// Redirect `put`, `putch` and `putchars`.
    pub fn with_output(mut self, sink: Box<dyn Write>) -> Self {
        self.output = sink;
        self
    }

    /// Attach the reader used by `get`, `fget` and `include`.
    pub fn set_reader(&mut self, reader: Box<dyn FactorReader>) {
        self.reader = Some(reader);
    }

    /// Flag polled by the engine before every step. Setting it makes the
    /// running program fail with `Aborted`; SIGINT sets it when the handler
    /// is installed.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The operand stack, top first.
    pub fn stack(&self) -> NodeRef {
        self.stk
    }

    pub fn set_stack(&mut self, stk: NodeRef) {
        self.stk = stk;
    }

    /// Borrow a live node.
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    /// Payloads of a list, in order.
    pub fn items(&self, list: NodeRef) -> Vec<Payload> {
        self.arena
            .iter(list)
            .map(|(_, node)| node.payload.clone())
            .collect()
    }

    /// Payloads on the operand stack, top first.
    pub fn stack_items(&self) -> Vec<Payload> {
        self.items(self.stk)
    }

    pub fn builtin(&self, op: OpCode) -> &'static Builtin {
        &builtins::CATALOG[op.0 as usize]
    }

    /// Resolve a word the way the reader does: natives become builtin
    /// payloads, anything else a (possibly undefined) user word.
    pub fn lookup(&mut self, name: &str) -> Result<Payload> {
        let id = self.symbols.lookup_or_enter(name)?;
        Ok(match self.symbols.entry(id).kind {
            joy_core::EntryKind::Native(op) => Payload::Builtin(op),
            _ => Payload::User(id),
        })
    }

    /// Clear the dump and continuations after a failed top-level run.
    /// The operand stack is left as the failing operator found it.
    pub fn recover(&mut self) {
        self.dump.clear();
        self.conts.clear();
    }

    // ---- allocation -------------------------------------------------------

    /// Allocate a node, collecting once if the arena is full.
    pub fn alloc(&mut self, payload: Payload, next: NodeRef) -> Result<NodeId> {
        match self.arena.try_insert(Node::new(payload, next)) {
            Ok(id) => Ok(id),
            Err(node) => {
                self.collect_with([node.payload.child(), node.next]);
                self.arena
                    .try_insert(node)
                    .map_err(|_| RuntimeError::OutOfMemory {
                        capacity: self.arena.capacity(),
                    })
            }
        }
    }

    /// Push a value onto the operand stack.
    pub fn push(&mut self, payload: Payload) -> Result<()> {
        let id = self.alloc(payload, self.stk)?;
        self.stk = Some(id);
        Ok(())
    }

    /// Build a list from `items` in order, ending in `tail`.
    pub fn list_from(&mut self, items: Vec<Payload>, tail: NodeRef) -> Result<NodeRef> {
        let mark = self.dump.len();
        self.dump.extend(items.iter().map(Payload::child));
        self.dump.push(tail);
        let result = self.prepend_all(items, tail);
        self.dump.truncate(mark);
        result
    }

    fn prepend_all(&mut self, items: Vec<Payload>, tail: NodeRef) -> Result<NodeRef> {
        let mut head = tail;
        for payload in items.into_iter().rev() {
            head = Some(self.alloc(payload, head)?);
        }
        Ok(head)
    }

    /// Full collection. Returns the number of reclaimed nodes.
    pub fn collect(&mut self) -> usize {
        self.collect_with([None, None])
    }

    fn collect_with(&mut self, in_flight: [NodeRef; 2]) -> usize {
        let Interp {
            arena,
            symbols,
            stk,
            dump,
            conts,
            ..
        } = self;
        let before = arena.live();
        let roots = std::iter::once(*stk)
            .chain(dump.iter().copied())
            .chain(conts.iter().copied())
            .chain(symbols.bodies())
            .chain(symbols.module_roots())
            .chain(in_flight);
        let reclaimed = arena.collect(roots);
        if self.flags.trace_gc > 1 {
            debug!(before, reclaimed, live = self.arena.live(), "gc");
        }
        if self.flags.trace_gc > 2 {
            let stats = self.arena.stats();
            info!(
                collections = stats.collections,
                allocations = stats.allocations,
                reclaimed_total = stats.reclaimed,
                peak = stats.peak_live,
                "gc summary"
            );
        }
        reclaimed
    }

    // ---- stack access -----------------------------------------------------

    /// Fail unless the stack holds at least `n` items.
    pub(crate) fn need(&self, op: &'static str, n: usize) -> Result<()> {
        if self.arena.iter(self.stk).take(n).count() < n {
            return Err(RuntimeError::Arity {
                op,
                needed: arity_name(n),
            });
        }
        Ok(())
    }

    /// Copy the top `N` items without popping them, deepest first, so the
    /// array reads like a stack effect: `let [x, y] = ...` for `X Y -> ..`.
    pub(crate) fn args<const N: usize>(&self, op: &'static str) -> Result<[Payload; N]> {
        let mut items: [Payload; N] = std::array::from_fn(|_| Payload::Illegal);
        let mut cursor = self.stk;
        for slot in (0..N).rev() {
            let id = cursor.ok_or(RuntimeError::Arity {
                op,
                needed: arity_name(N),
            })?;
            let node = self.arena.get(id);
            items[slot] = node.payload.clone();
            cursor = node.next;
        }
        Ok(items)
    }

    /// The stack beneath its top `n` items.
    pub(crate) fn below(&self, n: usize) -> NodeRef {
        skip(&self.arena, self.stk, n)
    }

    /// Pop `n` items. Callers check arity first.
    pub(crate) fn drop_n(&mut self, n: usize) {
        self.stk = self.below(n);
    }

    /// Replace the top `n` items with one value.
    pub(crate) fn replace(&mut self, n: usize, payload: Payload) -> Result<()> {
        let base = self.below(n);
        let id = self.alloc(payload, base)?;
        self.stk = Some(id);
        Ok(())
    }

    /// Replace the top `n` items with `items`, given deepest first.
    pub(crate) fn reshape(&mut self, n: usize, mut items: Vec<Payload>) -> Result<()> {
        items.reverse();
        let base = self.below(n);
        self.stk = self.list_from(items, base)?;
        Ok(())
    }

    /// The value a quotation left on top of the stack.
    pub(crate) fn result(&self, op: &'static str) -> Result<Payload> {
        match self.stk {
            Some(id) => Ok(self.arena.get(id).payload.clone()),
            None => Err(RuntimeError::Arity {
                op,
                needed: "value to push",
            }),
        }
    }

    /// Make the stack `payload` on top of `base`.
    pub(crate) fn push_on(&mut self, base: NodeRef, payload: Payload) -> Result<()> {
        let id = self.alloc(payload, base)?;
        self.stk = Some(id);
        Ok(())
    }

    // ---- frames -----------------------------------------------------------

    /// Save the current stack on the dump. The returned guard releases the
    /// snapshot and every register held through it when dropped.
    pub fn frame(&mut self) -> Frame<'_> {
        let base = self.dump.len();
        self.dump.push(self.stk);
        Frame { interp: self, base }
    }

    /// Run `body` inside a fresh frame.
    pub fn with_frame<T>(&mut self, body: impl FnOnce(&mut Frame<'_>) -> Result<T>) -> Result<T> {
        let mut frame = self.frame();
        body(&mut frame)
    }
}

/// Walk `n` links from `list`.
pub(crate) fn skip(arena: &Arena, list: NodeRef, n: usize) -> NodeRef {
    let mut cursor = list;
    for _ in 0..n {
        match cursor {
            Some(id) => cursor = arena.get(id).next,
            None => break,
        }
    }
    cursor
}

pub(crate) fn arity_name(n: usize) -> &'static str {
    match n {
        1 => "one parameter",
        2 => "two parameters",
        3 => "three parameters",
        4 => "four parameters",
        _ => "five parameters",
    }
}

/// A dump slot owned by a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(usize);

/// Scoped stack snapshot.
///
/// Dereferences to the interpreter so combinators can run terms through it.
/// Dropping the frame truncates the dump back to where it was, so error
/// paths release their snapshots too.
pub struct Frame<'a> {
    interp: &'a mut Interp,
    base: usize,
}

impl Frame<'_> {
    /// SAVEDn: the snapshot from its `n`th item down (1-based).
    pub fn saved(&self, n: usize) -> NodeRef {
        skip(&self.interp.arena, self.interp.dump[self.base], n - 1)
    }

    /// Payload of the snapshot's `n`th item.
    pub fn saved_item(&self, n: usize) -> Payload {
        match self.saved(n) {
            Some(id) => self.interp.arena.get(id).payload.clone(),
            None => Payload::Illegal,
        }
    }

    /// List held by the snapshot's `n`th item; empty if it is not a list.
    pub fn saved_list(&self, n: usize) -> NodeRef {
        self.saved_item(n).child()
    }

    /// Reset the operand stack to SAVEDn.
    pub fn restore(&mut self, n: usize) {
        self.interp.stk = self.saved(n);
    }

    /// Root `list` until the frame ends.
    pub fn hold(&mut self, list: NodeRef) -> Reg {
        self.interp.dump.push(list);
        Reg(self.interp.dump.len() - 1)
    }

    pub fn get(&self, reg: Reg) -> NodeRef {
        self.interp.dump[reg.0]
    }

    pub fn set(&mut self, reg: Reg, list: NodeRef) {
        self.interp.dump[reg.0] = list;
    }

    /// Prepend `payload` to the list held in `reg`.
    pub fn accumulate(&mut self, reg: Reg, payload: Payload) -> Result<()> {
        let head = self.get(reg);
        let id = self.interp.alloc(payload, head)?;
        self.set(reg, Some(id));
        Ok(())
    }

    /// Payloads of an accumulator, oldest first.
    pub fn accumulated(&self, reg: Reg) -> Vec<Payload> {
        let mut items = self.interp.items(self.get(reg));
        items.reverse();
        items
    }
}

impl Deref for Frame<'_> {
    type Target = Interp;

    fn deref(&self) -> &Interp {
        self.interp
    }
}

impl DerefMut for Frame<'_> {
    fn deref_mut(&mut self) -> &mut Interp {
        self.interp
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        self.interp.dump.truncate(self.base);
    }
}
