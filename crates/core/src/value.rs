//! Node and payload representation
//!
//! Every Joy value and every program term is a singly-linked list of nodes.
//! A node carries one tagged payload plus a `next` handle into the shared
//! arena, so the operand stack, quotations and user definitions are all the
//! same shape:
//!
//! ```text
//!   stk ──► [Int 3] ──► [List ●] ──► [Bool true] ──► ∅
//!                            │
//!                            └──► [Builtin dup] ──► [Builtin *] ──► ∅
//! ```
//!
//! Nodes are immutable once published. Suffixes are shared freely (a `dup`
//! of a quotation shares the whole body) and extension always prepends, so
//! `next` chains never form cycles.

use crate::stream::FileRef;
use crate::symbol::SymbolId;
use std::rc::Rc;

/// Number of members addressable by a set value (bits of the backing word).
pub const SETSIZE: u32 = u64::BITS;

/// Largest integer value, pushed by `maxint`.
pub const MAXINT: i64 = i64::MAX;

/// Handle to a live arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Position of this node's slot inside the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A possibly empty list: `None` is the empty list.
pub type NodeRef = Option<NodeId>;

/// Index into the runtime's builtin catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpCode(pub u16);

/// Index into the runtime's table of anonymous native procedures.
///
/// These only ever appear inside closures built by the tree and generative
/// recursion combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnonId(pub u16);

/// Tagged node payload.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Never produced by a well-formed term; executing it is an internal error.
    Illegal,
    User(SymbolId),
    Anon(AnonId),
    Bool(bool),
    Char(char),
    Int(i64),
    Set(u64),
    Str(Rc<str>),
    List(NodeRef),
    Float(f64),
    /// `None` is the null stream left behind by a failed `fopen`.
    File(Option<FileRef>),
    Builtin(OpCode),
}

/// An arena cell.
#[derive(Debug, Clone)]
pub struct Node {
    pub payload: Payload,
    pub next: NodeRef,
}

impl Node {
    pub fn new(payload: Payload, next: NodeRef) -> Self {
        Node { payload, next }
    }
}

impl Payload {
    pub fn string(s: &str) -> Self {
        Payload::Str(Rc::from(s))
    }

    /// The nested list this payload keeps alive, if it is a list.
    pub fn list(&self) -> Option<NodeRef> {
        match self {
            Payload::List(l) => Some(*l),
            _ => None,
        }
    }

    /// Nested arena reference for collection purposes.
    pub fn child(&self) -> NodeRef {
        match self {
            Payload::List(l) => *l,
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Payload::List(_))
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Payload::List(_) | Payload::Str(_) | Payload::Set(_))
    }

    /// Integer view of the small scalar kinds (logical, character, integer).
    pub fn numeric(&self) -> Option<i64> {
        match self {
            Payload::Bool(b) => Some(i64::from(*b)),
            Payload::Char(c) => Some(i64::from(u32::from(*c))),
            Payload::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Float view of integers and floats.
    pub fn floatable(&self) -> Option<f64> {
        match self {
            Payload::Int(n) => Some(*n as f64),
            Payload::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Truth value used by every conditional combinator.
    ///
    /// Mirrors reading the raw payload word: anything non-zero or non-null
    /// counts as true.
    pub fn truthy(&self) -> bool {
        match self {
            Payload::Bool(b) => *b,
            Payload::Char(c) => *c != '\0',
            Payload::Int(n) => *n != 0,
            Payload::Set(s) => *s != 0,
            Payload::Float(f) => *f != 0.0,
            Payload::List(l) => l.is_some(),
            Payload::File(f) => f.is_some(),
            Payload::Illegal => false,
            Payload::Str(_) | Payload::User(_) | Payload::Anon(_) | Payload::Builtin(_) => true,
        }
    }

    /// Numeric type tag, ordered as in the builtin catalog.
    pub fn tag(&self) -> u8 {
        match self {
            Payload::Illegal => 0,
            Payload::User(_) => 2,
            Payload::Anon(_) => 3,
            Payload::Bool(_) => 4,
            Payload::Char(_) => 5,
            Payload::Int(_) => 6,
            Payload::Set(_) => 7,
            Payload::Str(_) => 8,
            Payload::List(_) => 9,
            Payload::Float(_) => 10,
            Payload::File(_) => 11,
            Payload::Builtin(_) => 12,
        }
    }

    /// Same tag, ignoring contents. Builtins only match the same operator.
    pub fn same_type(&self, other: &Payload) -> bool {
        match (self, other) {
            (Payload::Builtin(a), Payload::Builtin(b)) => a == b,
            _ => self.tag() == other.tag(),
        }
    }

    /// Name reported by `name` for literal payloads.
    pub fn type_name(&self) -> &'static str {
        match self {
            Payload::Illegal => "__ILLEGAL",
            Payload::User(_) => "__USR",
            Payload::Anon(_) => "__ANON_FUNCT",
            Payload::Bool(_) => " truth value type",
            Payload::Char(_) => " character type",
            Payload::Int(_) => " integer type",
            Payload::Set(_) => " set type",
            Payload::Str(_) => " string type",
            Payload::List(_) => " list type",
            Payload::Float(_) => " float type",
            Payload::File(_) => " file type",
            Payload::Builtin(_) => "__BUILTIN",
        }
    }
}

/// Iterate the member indices of a set in ascending order.
pub fn set_members(set: u64) -> impl Iterator<Item = u32> {
    (0..SETSIZE).filter(move |i| set & (1u64 << i) != 0)
}

/// Lowest member of a non-empty set.
pub fn set_first(set: u64) -> Option<u32> {
    if set == 0 {
        None
    } else {
        Some(set.trailing_zeros())
    }
}
