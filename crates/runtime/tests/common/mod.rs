//! Shared helpers for the integration tests
//!
//! `TokenReader` is a small whitespace reader for literals, words, lists
//! and sets. It is enough to drive the engine and the reader-backed
//! builtins; strings may not contain spaces and there is no `DEFINE`.

#![allow(dead_code)]

use joy_runtime::{Config, FactorReader, FileRef, Interp, NodeRef, Payload, Result, RuntimeError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

pub fn interp() -> Interp {
    interp_with(Config::new())
}

pub fn interp_with(config: Config) -> Interp {
    Interp::new(config)
        .expect("interpreter")
        .with_output(Box::new(io::sink()))
}

/// Output sink the test can read back.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn interp_with_output() -> (Interp, SharedBuf) {
    let buf = SharedBuf::default();
    let interp = Interp::new(Config::new())
        .expect("interpreter")
        .with_output(Box::new(buf.clone()));
    (interp, buf)
}

fn tokenize(src: &str) -> VecDeque<String> {
    let mut tokens = VecDeque::new();
    for word in src.split_whitespace() {
        let mut current = String::new();
        for c in word.chars() {
            let quoted = current == "'"
                || (current.starts_with('"') && (current.len() == 1 || !current.ends_with('"')));
            if "[]{}".contains(c) && !quoted {
                if !current.is_empty() {
                    tokens.push_back(std::mem::take(&mut current));
                }
                tokens.push_back(c.to_string());
            } else {
                current.push(c);
            }
        }
        if !current.is_empty() {
            tokens.push_back(current);
        }
    }
    tokens
}

fn literal(tok: &str) -> Option<Payload> {
    if let Some(s) = tok.strip_prefix('"') {
        return Some(Payload::string(s.strip_suffix('"').unwrap_or(s)));
    }
    if let Some(c) = tok.strip_prefix('\'') {
        return c.chars().next().map(Payload::Char);
    }
    let digits = tok.strip_prefix('-').unwrap_or(tok);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if tok.contains(['.', 'e', 'E']) {
        tok.parse().ok().map(Payload::Float)
    } else {
        tok.parse().ok().map(Payload::Int)
    }
}

/// Read the members of a list or set up to `close`. Finished members wait
/// on the operand stack so a collection cannot reclaim them.
fn members(interp: &mut Interp, tokens: &mut VecDeque<String>, close: &str) -> Result<Vec<Payload>> {
    let base = interp.stack();
    let mut count = 0;
    while let Some(tok) = tokens.front() {
        if tok == close {
            tokens.pop_front();
            break;
        }
        if let Some(p) = factor(interp, tokens)? {
            interp.push(p)?;
            count += 1;
        }
    }
    let mut items: Vec<Payload> = interp.stack_items().into_iter().take(count).collect();
    items.reverse();
    interp.set_stack(base);
    Ok(items)
}

fn factor(interp: &mut Interp, tokens: &mut VecDeque<String>) -> Result<Option<Payload>> {
    let Some(tok) = tokens.pop_front() else {
        return Ok(None);
    };
    let payload = match tok.as_str() {
        "[" => {
            let items = members(interp, tokens, "]")?;
            Payload::List(interp.list_from(items, None)?)
        }
        "{" => {
            let bits = members(interp, tokens, "}")?
                .iter()
                .filter_map(Payload::numeric)
                .fold(0u64, |set, n| set | (1u64 << n));
            Payload::Set(bits)
        }
        "]" | "}" => {
            return Err(RuntimeError::Internal(format!("unbalanced {}", tok)));
        }
        _ => match literal(&tok) {
            Some(p) => p,
            None => interp.lookup(&tok)?,
        },
    };
    Ok(Some(payload))
}

/// Read all of `src` into a term.
pub fn parse(interp: &mut Interp, src: &str) -> NodeRef {
    let mut tokens = tokenize(src);
    tokens.push_back("]".to_string());
    let items = members(interp, &mut tokens, "]").expect("parse");
    interp.list_from(items, None).expect("parse")
}

pub fn run(interp: &mut Interp, src: &str) -> Result<()> {
    let term = parse(interp, src);
    interp.exeterm(term)
}

pub fn define(interp: &mut Interp, name: &str, body: &str) {
    let term = parse(interp, body);
    interp.symbols_mut().define(name, term).expect("define");
}

/// The operand stack rendered top first.
pub fn stack(interp: &Interp) -> String {
    joy_runtime::display::term(interp, interp.stack())
}

pub fn eval(src: &str) -> String {
    let mut joy = interp();
    run(&mut joy, src).expect("run");
    stack(&joy)
}

/// Reader over a token queue. `include` splices a file's tokens in front
/// of what is left.
pub struct TokenReader {
    tokens: VecDeque<String>,
}

impl TokenReader {
    pub fn new(src: &str) -> Self {
        TokenReader {
            tokens: tokenize(src),
        }
    }
}

impl FactorReader for TokenReader {
    fn read_factor(&mut self, interp: &mut Interp) -> Result<Option<Payload>> {
        factor(interp, &mut self.tokens)
    }

    /// One line per factor.
    fn read_factor_from(&mut self, interp: &mut Interp, stream: &FileRef) -> Result<Option<Payload>> {
        let line = stream.borrow_mut().read_line();
        let mut tokens = tokenize(&String::from_utf8_lossy(&line));
        factor(interp, &mut tokens)
    }

    fn include(&mut self, _interp: &mut Interp, path: &str) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        let mut included = tokenize(&text);
        included.append(&mut self.tokens);
        self.tokens = included;
        Ok(())
    }
}
