//! Joy Core: node model, arena, symbol table and streams for the Joy
//! evaluation engine
//!
//! This crate holds the data the interpreter operates on. It knows nothing
//! about executing terms; that lives in `joy-runtime`.
//!
//! Key design principles:
//! - Node: one tagged payload plus a `next` handle; every value and every
//!   program is a list of nodes
//! - Arena: fixed-capacity slot storage addressed by index handles, with
//!   mark-and-sweep reclamation driven by the runtime's roots
//! - SymbolTable: hashed name lookup with entries in table order
//!
//! # Modules
//!
//! - `value`: Node and Payload types, set helpers
//! - `arena`: Node storage and collection
//! - `symbol`: Symbol table and identifier rules
//! - `stream`: File values
//! - `error`: Runtime and configuration errors
//! - `config`: Interpreter startup settings

pub mod arena;
pub mod config;
pub mod error;
pub mod stream;
pub mod symbol;
pub mod value;

pub use arena::{Arena, ArenaStats, MEMORYMAX};
pub use config::Config;
pub use error::{ConfigError, Result, RuntimeError};
pub use stream::{FileRef, Stream};
pub use symbol::{Entry, EntryKind, SymbolId, SymbolTable};
pub use value::{AnonId, MAXINT, Node, NodeId, NodeRef, OpCode, Payload, SETSIZE};
