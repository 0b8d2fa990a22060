//! File streams
//!
//! Joy file values wrap one of the three standard streams or a file on
//! disk. A stream tracks C-style end-of-file and error indicators so that
//! `feof` and `ferror` can report on earlier operations without the
//! operations themselves failing.

use std::cell::RefCell;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::rc::Rc;

/// Shared handle held by file payloads.
pub type FileRef = Rc<RefCell<Stream>>;

/// Buffer size for `read_bytes`.
const READ_CHUNK: usize = 8192;

#[derive(Debug)]
enum Backing {
    Stdin,
    Stdout,
    Stderr,
    Disk(File),
    Closed,
}

/// An open stream plus its sticky status flags.
pub struct Stream {
    backing: Backing,
    eof: bool,
    error: bool,
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("backing", &self.backing)
            .field("eof", &self.eof)
            .field("error", &self.error)
            .finish()
    }
}

/// Origin for `seek`, numbered as in C (`SEEK_SET`, `SEEK_CUR`, `SEEK_END`).
pub fn whence(code: i64, offset: i64) -> Option<SeekFrom> {
    match code {
        0 => u64::try_from(offset).ok().map(SeekFrom::Start),
        1 => Some(SeekFrom::Current(offset)),
        2 => Some(SeekFrom::End(offset)),
        _ => None,
    }
}

impl Stream {
    fn with(backing: Backing) -> FileRef {
        Rc::new(RefCell::new(Stream {
            backing,
            eof: false,
            error: false,
        }))
    }

    pub fn stdin() -> FileRef {
        Stream::with(Backing::Stdin)
    }

    pub fn stdout() -> FileRef {
        Stream::with(Backing::Stdout)
    }

    pub fn stderr() -> FileRef {
        Stream::with(Backing::Stderr)
    }

    /// Open `path` with a C `fopen` mode string (`r`, `w`, `a`, optionally
    /// followed by `+` and/or `b`).
    pub fn open(path: &str, mode: &str) -> io::Result<FileRef> {
        let mut options = OpenOptions::new();
        let plus = mode.contains('+');
        match mode.chars().next() {
            Some('r') => options.read(true).write(plus),
            Some('w') => options.write(true).create(true).truncate(true).read(plus),
            Some('a') => options.append(true).create(true).read(plus),
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("bad open mode {:?}", mode),
                ));
            }
        };
        let file = options.open(path)?;
        Ok(Stream::with(Backing::Disk(file)))
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    fn read_raw(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.backing {
            Backing::Stdin => io::stdin().lock().read(buf),
            Backing::Disk(file) => file.read(buf),
            Backing::Stdout | Backing::Stderr | Backing::Closed => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stream is not readable",
            )),
        }
    }

    /// Next byte, or `None` at end of file or on error.
    pub fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.read_raw(&mut byte) {
            Ok(0) => {
                self.eof = true;
                None
            }
            Ok(_) => Some(byte[0]),
            Err(_) => {
                self.error = true;
                None
            }
        }
    }

    /// Read through the next newline, which is kept.
    pub fn read_line(&mut self) -> Vec<u8> {
        let mut line = Vec::new();
        while let Some(byte) = self.read_byte() {
            line.push(byte);
            if byte == b'\n' {
                break;
            }
        }
        line
    }

    /// Read up to `count` bytes. The result only grows with data that
    /// actually arrives.
    pub fn read_bytes(&mut self, count: usize) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];
        while buf.len() < count {
            let want = (count - buf.len()).min(READ_CHUNK);
            match self.read_raw(&mut chunk[..want]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                Err(_) => {
                    self.error = true;
                    break;
                }
            }
        }
        buf
    }

    /// Write all of `bytes`; failures only raise the error indicator.
    pub fn write(&mut self, bytes: &[u8]) {
        let result = match &mut self.backing {
            Backing::Stdout => io::stdout().write_all(bytes),
            Backing::Stderr => io::stderr().write_all(bytes),
            Backing::Disk(file) => file.write_all(bytes),
            Backing::Stdin | Backing::Closed => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stream is not writable",
            )),
        };
        if result.is_err() {
            self.error = true;
        }
    }

    pub fn flush(&mut self) {
        let result = match &mut self.backing {
            Backing::Stdout => io::stdout().flush(),
            Backing::Stderr => io::stderr().flush(),
            Backing::Disk(file) => file.flush(),
            Backing::Stdin | Backing::Closed => Ok(()),
        };
        if result.is_err() {
            self.error = true;
        }
    }

    /// Flush and release the underlying file. Every later operation on
    /// this stream fails; copies of the file value see the same state.
    pub fn close(&mut self) {
        self.flush();
        self.backing = Backing::Closed;
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.backing, Backing::Closed)
    }

    /// Reposition the stream. Returns `true` on failure.
    pub fn seek(&mut self, to: SeekFrom) -> bool {
        match &mut self.backing {
            Backing::Disk(file) => match file.seek(to) {
                Ok(_) => {
                    self.eof = false;
                    false
                }
                Err(_) => true,
            },
            _ => true,
        }
    }

    /// Current offset, or -1 where the stream cannot report one.
    pub fn tell(&mut self) -> i64 {
        match &mut self.backing {
            Backing::Disk(file) => file
                .stream_position()
                .ok()
                .and_then(|pos| i64::try_from(pos).ok())
                .unwrap_or(-1),
            _ => -1,
        }
    }
}

/// Identity order used when comparing two file values.
pub fn address(file: &Option<FileRef>) -> usize {
    file.as_ref().map_or(0, |f| Rc::as_ptr(f) as *const () as usize)
}
