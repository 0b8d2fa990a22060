//! Reader seam
//!
//! Tokenizing and parsing Joy text lives outside the evaluation core. The
//! builtins that consume program text at run time (`get`, `fget`,
//! `include`) call through this trait; an interpreter without a reader
//! attached fails them with `Unsupported`.

use crate::interp::Interp;
use joy_core::{FileRef, Payload, Result, RuntimeError};

pub trait FactorReader {
    /// Read one factor from the current input. Lists must be allocated
    /// through `interp` (e.g. with [`Interp::list_from`]). `None` at end of
    /// input.
    fn read_factor(&mut self, interp: &mut Interp) -> Result<Option<Payload>>;

    /// Read one factor from `stream`.
    fn read_factor_from(&mut self, interp: &mut Interp, stream: &FileRef)
    -> Result<Option<Payload>>;

    /// Switch input to the file at `path` until it is exhausted.
    fn include(&mut self, interp: &mut Interp, path: &str) -> Result<()>;
}

impl Interp {
    /// Lend the attached reader to `body`.
    pub(crate) fn with_reader<T>(
        &mut self,
        op: &'static str,
        body: impl FnOnce(&mut dyn FactorReader, &mut Interp) -> Result<T>,
    ) -> Result<T> {
        let mut reader = self.reader.take().ok_or(RuntimeError::Unsupported {
            op,
            reason: "attached reader",
        })?;
        let result = body(reader.as_mut(), self);
        self.reader = Some(reader);
        result
    }
}
