//! Joy Runtime: the evaluation engine for the Joy language
//!
//! Key design principles:
//! - Interp: one value owning the arena, symbol table, operand stack, dump
//!   and continuations; several interpreters can coexist in one process
//! - exeterm: runs a term node by node, dispatching builtins through the
//!   catalog and calling user words with tail-call replacement
//! - Frame: a combinator's saved stack and working registers on the dump,
//!   so every intermediate list stays reachable across collections
//!
//! # Modules
//!
//! - `interp`: Interpreter state, allocation, stack access, frames
//! - `exec`: The term execution engine
//! - `builtins`: The native word catalog
//! - `reader`: Seam for the external term reader
//! - `display`: Textual rendering of factors and terms
//! - `logging`: Subscriber setup for embedding hosts
//!
//! The remaining modules hold builtin procedures grouped by concern.

pub mod aggregate;
pub mod arithmetic;
pub mod builtins;
mod check;
pub mod compare;
pub mod cond;
pub mod diagnostics;
pub mod display;
mod exec;
pub mod file;
pub mod float_ops;
pub mod interp;
pub mod io;
pub mod list_ops;
pub mod logging;
pub mod os;
pub mod quotations;
pub mod reader;
pub mod recursion;
pub mod signal;
pub mod stack;
pub mod string_ops;
pub mod symbols;
pub mod time_ops;
pub mod types;

#[cfg(test)]
mod testing;

pub use builtins::{Builtin, CATALOG};
pub use interp::{Flags, Frame, Interp, Reg};
pub use reader::FactorReader;

// Core data model, re-exported so hosts need only this crate
pub use joy_core::{
    Arena, ArenaStats, Config, ConfigError, FileRef, Node, NodeId, NodeRef, OpCode, Payload,
    Result, RuntimeError, Stream, SymbolTable,
};
