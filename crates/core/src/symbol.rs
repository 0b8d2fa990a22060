//! Symbol Table
//!
//! Entries are stored in table order; their position is the reverse handle
//! ([`SymbolId`]) carried by user-word nodes. Lookup goes through a small
//! fixed set of hash buckets, each a chain of entries linked newest first,
//! so a later entry for a name shadows an earlier one.
//!
//! ```text
//!   buckets[h] ──► entry 42 "square" ──► entry 7 "swap" ──► ∅
//! ```
//!
//! Natives are entered once, before any user word, by the runtime's builtin
//! catalog. Everything after them is user territory.

use crate::error::{Result, RuntimeError};
use crate::value::{NodeRef, OpCode};
use tracing::debug;

/// Number of hash buckets.
pub const HASHSIZE: usize = 9;

/// Maximum number of entries.
pub const SYMTABMAX: usize = 1000;

/// Identifier buffer size; names keep at most `ALEN - 1` bytes.
pub const ALEN: usize = 22;

/// Position of an entry in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a name is bound to.
#[derive(Debug, Clone)]
pub enum EntryKind {
    Native(OpCode),
    /// A user word. An empty body means the word is undefined.
    User { body: NodeRef },
    /// A module namespace. Scoping itself is managed by the reader.
    Module { fields: Vec<SymbolId> },
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    /// Next entry in the same bucket
    next: Option<SymbolId>,
}

impl Entry {
    pub fn is_module(&self) -> bool {
        matches!(self.kind, EntryKind::Module { .. })
    }

    pub fn body(&self) -> NodeRef {
        match self.kind {
            EntryKind::User { body } => body,
            _ => None,
        }
    }
}

/// Byte sum of the name, modulo [`HASHSIZE`].
pub fn hash(name: &str) -> usize {
    name.bytes().map(usize::from).sum::<usize>() % HASHSIZE
}

/// Whether `name` has identifier syntax.
///
/// The first character is `-` or anything outside `(#)[]{}.;'"` and the
/// digits; the rest are alphanumeric or one of `=_-`.
pub fn valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first != '-' && "(#)[]{}.;'\"0123456789".contains(first) {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || "=_-".contains(c))
}

/// Clip a name to the identifier buffer, respecting char boundaries.
pub fn truncate_name(name: &str) -> &str {
    if name.len() < ALEN {
        return name;
    }
    let mut end = ALEN - 1;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

pub struct SymbolTable {
    entries: Vec<Entry>,
    buckets: [Option<SymbolId>; HASHSIZE],
    capacity: usize,
    first_user: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: Vec::new(),
            buckets: [None; HASHSIZE],
            capacity: SYMTABMAX,
            first_user: 0,
        }
    }

    /// Number of entries, natives included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of the first non-native entry.
    pub fn first_user(&self) -> usize {
        self.first_user
    }

    fn push(&mut self, name: &str, kind: EntryKind) -> Result<SymbolId> {
        if self.entries.len() >= self.capacity {
            return Err(RuntimeError::SymbolTableFull {
                capacity: self.capacity,
            });
        }
        let id = SymbolId(self.entries.len() as u32);
        let bucket = hash(name);
        self.entries.push(Entry {
            name: name.to_string(),
            kind,
            next: self.buckets[bucket],
        });
        self.buckets[bucket] = Some(id);
        Ok(id)
    }

    /// Enter a native operator. Natives must all be entered before the
    /// first user entry.
    pub fn enter_native(&mut self, name: &str, op: OpCode) -> Result<SymbolId> {
        debug_assert_eq!(self.first_user, self.entries.len());
        let id = self.push(name, EntryKind::Native(op))?;
        self.first_user = self.entries.len();
        Ok(id)
    }

    pub fn entry(&self, id: SymbolId) -> &Entry {
        &self.entries[id.index()]
    }

    pub fn name(&self, id: SymbolId) -> &str {
        &self.entries[id.index()].name
    }

    /// Walk the bucket chain for `name`.
    pub fn resolve(&self, name: &str) -> Option<SymbolId> {
        let mut cursor = self.buckets[hash(name)];
        while let Some(id) = cursor {
            let entry = &self.entries[id.index()];
            if entry.name == name {
                return Some(id);
            }
            cursor = entry.next;
        }
        None
    }

    /// Resolve `name`, entering an undefined user word on a miss.
    pub fn lookup_or_enter(&mut self, name: &str) -> Result<SymbolId> {
        match self.resolve(name) {
            Some(id) => Ok(id),
            None => self.push(name, EntryKind::User { body: None }),
        }
    }

    /// Bind `name` to `body`.
    ///
    /// An existing user entry is updated in place. A name currently bound to
    /// a native or a module gets a fresh user entry that shadows it.
    pub fn define(&mut self, name: &str, body: NodeRef) -> Result<SymbolId> {
        let id = match self.resolve(name) {
            Some(id) if matches!(self.entries[id.index()].kind, EntryKind::User { .. }) => {
                self.entries[id.index()].kind = EntryKind::User { body };
                id
            }
            _ => self.push(name, EntryKind::User { body })?,
        };
        debug!(name, index = id.0, "defined user word");
        Ok(id)
    }

    /// Register a module namespace with the given member entries.
    pub fn define_module(&mut self, name: &str, fields: Vec<SymbolId>) -> Result<SymbolId> {
        let id = self.push(name, EntryKind::Module { fields })?;
        debug!(name, index = id.0, "defined module");
        Ok(id)
    }

    /// Bodies of all user entries, for the collector.
    pub fn bodies(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.entries[self.first_user..].iter().map(Entry::body)
    }

    /// Module fields, for the collector. Fields are entries, so this yields
    /// their bodies.
    pub fn module_roots(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.entries
            .iter()
            .filter_map(|e| match &e.kind {
                EntryKind::Module { fields } => Some(fields),
                _ => None,
            })
            .flatten()
            .map(|id| self.entries[id.index()].body())
    }

    /// Names of undefined user words in table order, skipping names that
    /// start with an underscore.
    pub fn undefined(&self) -> Vec<&str> {
        self.entries[self.first_user..]
            .iter()
            .filter(|e| {
                matches!(e.kind, EntryKind::User { body: None })
                    && !e.name.is_empty()
                    && !e.name.starts_with('_')
            })
            .map(|e| e.name.as_str())
            .collect()
    }
}
