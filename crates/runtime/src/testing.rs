//! Unit-test helpers: a minimal term reader and stack rendering.

use crate::display;
use crate::interp::Interp;
use joy_core::{Config, NodeRef, Payload, Result};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

pub fn interp() -> Interp {
    Interp::new(Config::new())
        .unwrap()
        .with_output(Box::new(io::sink()))
}

/// Output sink that tests can read back.
#[derive(Clone, Default)]
pub struct SharedBuf(pub Rc<RefCell<Vec<u8>>>);

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
        .unwrap()
        .with_output(Box::new(buf.clone()));
    (interp, buf)
}

fn tokenize(src: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if "[]{}".contains(c) {
            tokens.push(c.to_string());
            chars.next();
        } else if c == '"' {
            let mut tok = String::from('"');
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                tok.push(c);
            }
            tokens.push(tok);
        } else {
            let mut tok = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || "[]{}".contains(c) {
                    break;
                }
                tok.push(c);
                chars.next();
            }
            tokens.push(tok);
        }
    }
    tokens
}

fn literal(tok: &str) -> Option<Payload> {
    if let Some(s) = tok.strip_prefix('"') {
        return Some(Payload::string(s));
    }
    if let Some(c) = tok.strip_prefix('\'') {
        return c.chars().next().map(Payload::Char);
    }
    match tok {
        "true" => return Some(Payload::Bool(true)),
        "false" => return Some(Payload::Bool(false)),
        _ => {}
    }
    let numeric = tok
        .strip_prefix('-')
        .unwrap_or(tok)
        .starts_with(|c: char| c.is_ascii_digit());
    if !numeric {
        return None;
    }
    if tok.contains(['.', 'e', 'E']) {
        tok.parse().ok().map(Payload::Float)
    } else {
        tok.parse().ok().map(Payload::Int)
    }
}

fn parse_items(interp: &mut Interp, tokens: &[String], pos: &mut usize, close: &str) -> Vec<Payload> {
    let mut items = Vec::new();
    while *pos < tokens.len() {
        let tok = tokens[*pos].as_str();
        *pos += 1;
        if tok == close {
            break;
        }
        let payload = match tok {
            "[" => {
                let inner = parse_items(interp, tokens, pos, "]");
                let list = interp.list_from(inner, None).unwrap();
                // Keep finished sublists alive while the rest is read.
                interp.dump.push(list);
                Payload::List(list)
            }
            "{" => {
                let members = parse_items(interp, tokens, pos, "}");
                let bits = members
                    .iter()
                    .filter_map(Payload::numeric)
                    .fold(0u64, |set, n| set | (1u64 << n));
                Payload::Set(bits)
            }
            _ => match literal(tok) {
                Some(p) => p,
                None => interp.lookup(tok).unwrap(),
            },
        };
        items.push(payload);
    }
    items
}

/// Read `src` into a term.
pub fn parse(interp: &mut Interp, src: &str) -> NodeRef {
    let tokens = tokenize(src);
    let mark = interp.dump.len();
    let mut pos = 0;
    let items = parse_items(interp, &tokens, &mut pos, "");
    let term = interp.list_from(items, None).unwrap();
    interp.dump.truncate(mark);
    term
}

pub fn run(interp: &mut Interp, src: &str) -> Result<()> {
    let term = parse(interp, src);
    interp.exeterm(term)
}

pub fn define(interp: &mut Interp, name: &str, body: &str) {
    let term = parse(interp, body);
    interp.symbols.define(name, term).unwrap();
}

pub fn top(interp: &Interp) -> Payload {
    interp.stack_items().into_iter().next().unwrap_or(Payload::Illegal)
}

/// The operand stack rendered top first.
pub fn stack(interp: &Interp) -> String {
    display::term(interp, interp.stack())
}

/// Run `src` on a fresh interpreter and render the resulting stack.
pub fn eval(src: &str) -> String {
    let mut joy = interp();
    run(&mut joy, src).unwrap();
    stack(&joy)
}

/// Run `src` on a fresh interpreter and render the error.
pub fn eval_err(src: &str) -> String {
    let mut joy = interp();
    run(&mut joy, src).unwrap_err().to_string()
}
