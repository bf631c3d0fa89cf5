/*!
Tokenizing JSON text into a flat token buffer.

The binder never parses text itself. It walks tokens produced by some tokenizer
through the [`Tokenize`] trait. This module contains a small reference tokenizer,
[`Parser`], that's used by the crate-level `parse_*` functions.

The parser proceeds linearly through the input, a byte at a time, writing tokens
into a caller-supplied buffer. It doesn't allocate and it isn't recursive. Instead
of maintaining a stack, each container that's still open keeps a link to its own
enclosing container in the `end` of its token, which is overwritten when it closes.

It's deliberately minimal: it checks the structure of the document and the shape
of string escapes, but doesn't validate numbers, atoms, or UTF8.
*/

use std::{error, fmt};

use crate::token::{Kind, Token};

/**
Something that can turn JSON text into a flat preorder token buffer.

Implementations fill a prefix of `tokens` and return how many were written.
*/
pub trait Tokenize {
    fn tokenize(&mut self, src: &[u8], tokens: &mut [Token]) -> Result<usize, Error>;
}

/**
An error tokenizing or binding a document.

Tokenizer errors abort a binding call before any output is touched.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /**
    The token buffer was too small for the document.
    */
    TokensExhausted,
    /**
    An invalid character was found in the document.
    */
    InvalidChar,
    /**
    The document is truncated and more bytes were expected.
    */
    Incomplete,
    /**
    The key requested by an array binding isn't in the document.
    */
    KeyNotFound,
}

impl Error {
    /**
    The negative integer code for this error.
    */
    #[inline]
    pub fn code(&self) -> i32 {
        match self {
            Error::TokensExhausted => -1,
            Error::InvalidChar => -2,
            Error::Incomplete => -3,
            Error::KeyNotFound => -4,
        }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TokensExhausted => "not enough tokens were provided".fmt(f),
            Error::InvalidChar => "invalid character inside JSON".fmt(f),
            Error::Incomplete => "the input is not a full JSON document, more bytes expected".fmt(f),
            Error::KeyNotFound => "the requested key was not found".fmt(f),
        }
    }
}

/**
The reference tokenizer.

By default the parser is permissive: any run of printable bytes that isn't a
string or container is accepted as a primitive. A [`Parser::strict`] parser
rejects primitives that can't be JSON numbers or atoms, primitive or container
keys, and primitives cut off by the end of the input.
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    strict: bool,
}

impl Parser {
    #[inline]
    pub fn new() -> Self {
        Parser { strict: false }
    }

    #[inline]
    pub fn strict() -> Self {
        Parser { strict: true }
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl Tokenize for Parser {
    fn tokenize(&mut self, src: &[u8], tokens: &mut [Token]) -> Result<usize, Error> {
        let mut scan = Scan {
            src,
            pos: 0,
            next: 0,
            parent: None,
            container: None,
            strict: self.strict,
        };

        scan.run(tokens)?;
        scan.end()
    }
}

/**
The `end` of an open container token, linking back to its enclosing container.

Real ends are offsets into the source, so they can never get this large.
*/
#[inline]
fn open_end(enclosing: Option<usize>) -> usize {
    usize::MAX - enclosing.map_or(0, |i| i + 1)
}

#[inline]
fn enclosing(open_end: usize) -> Option<usize> {
    (usize::MAX - open_end).checked_sub(1)
}

/**
The state of the reference tokenizer.
*/
#[derive(Debug)]
struct Scan<'src> {
    src: &'src [u8],
    /**
    The current offset in the input.
    */
    pos: usize,
    /**
    The index of the next token to write.
    */
    next: usize,
    /**
    The token that new tokens are children of.

    Between a `:` and its value this is the key, rather than the enclosing object.
    */
    parent: Option<usize>,
    /**
    The innermost container that hasn't been closed yet.
    */
    container: Option<usize>,
    strict: bool,
}

impl<'src> Scan<'src> {
    fn run(&mut self, tokens: &mut [Token]) -> Result<(), Error> {
        while let Some(&curr) = self.src.get(self.pos) {
            match curr {
                b'{' | b'[' => {
                    let kind = if curr == b'{' {
                        Kind::Object
                    } else {
                        Kind::Array
                    };

                    if self.strict && self.parent_kind(tokens) == Some(Kind::Object) {
                        // containers can't be object keys
                        return Err(Error::InvalidChar);
                    }

                    let end = open_end(self.container);
                    let i = self.push(tokens, Token::new(kind, self.pos, end, 0))?;

                    self.container = Some(i);
                    self.parent = Some(i);
                }
                b'}' | b']' => {
                    let kind = if curr == b'}' {
                        Kind::Object
                    } else {
                        Kind::Array
                    };

                    let token = match self.container.and_then(|i| tokens.get_mut(i)) {
                        Some(token) if token.kind == kind => token,
                        _ => return Err(Error::InvalidChar),
                    };

                    self.container = enclosing(token.end);
                    self.parent = self.container;

                    token.end = self.pos + 1;
                }
                b'"' => self.string(tokens)?,
                b'\t' | b'\r' | b'\n' | b' ' => (),
                b':' => {
                    self.parent = self.next.checked_sub(1);
                }
                b',' => {
                    // a `,` after an object value moves back up from the key to the object
                    self.parent = self.container;
                }
                _ => {
                    if self.strict {
                        match curr {
                            b'-' | b'0'..=b'9' | b't' | b'f' | b'n' => {
                                // primitives can't be object keys
                                if self.parent_kind(tokens) == Some(Kind::Object) {
                                    return Err(Error::InvalidChar);
                                }
                            }
                            _ => return Err(Error::InvalidChar),
                        }
                    }

                    self.primitive(tokens)?;
                }
            }

            self.pos += 1;
        }

        Ok(())
    }

    fn end(&self) -> Result<usize, Error> {
        // any container that's still open means the input was truncated
        if self.container.is_some() {
            return Err(Error::Incomplete);
        }

        Ok(self.next)
    }

    /**
    Write a new token and count it as a child of the current parent.
    */
    fn push(&mut self, tokens: &mut [Token], token: Token) -> Result<usize, Error> {
        let i = self.next;
        let slot = tokens.get_mut(i).ok_or(Error::TokensExhausted)?;
        *slot = token;
        self.next += 1;

        // only containers count children, a key's value doesn't make it bigger
        if let Some(parent) = self.parent.and_then(|parent| tokens.get_mut(parent)) {
            if parent.kind.is_container() {
                parent.size += 1;
            }
        }

        Ok(i)
    }

    #[inline]
    fn parent_kind(&self, tokens: &[Token]) -> Option<Kind> {
        self.parent
            .and_then(|parent| tokens.get(parent))
            .map(|parent| parent.kind)
    }

    /**
    Read a string starting at the opening quote, leaving the position on the closing quote.
    */
    fn string(&mut self, tokens: &mut [Token]) -> Result<(), Error> {
        let start = self.pos;
        let mut pos = start + 1;

        while let Some(&curr) = self.src.get(pos) {
            match curr {
                b'"' => {
                    self.push(tokens, Token::new(Kind::String, start + 1, pos, 0))?;
                    self.pos = pos;

                    return Ok(());
                }
                b'\\' if pos + 1 < self.src.len() => {
                    pos += 1;

                    match self.src[pos] {
                        b'"' | b'/' | b'\\' | b'b' | b'f' | b'r' | b'n' | b't' => (),
                        b'u' => {
                            let mut digits = 0;
                            while digits < 4 {
                                match self.src.get(pos + 1) {
                                    Some(c) if c.is_ascii_hexdigit() => {
                                        pos += 1;
                                        digits += 1;
                                    }
                                    Some(_) => return Err(Error::InvalidChar),
                                    None => break,
                                }
                            }
                        }
                        _ => return Err(Error::InvalidChar),
                    }
                }
                _ => (),
            }

            pos += 1;
        }

        Err(Error::Incomplete)
    }

    /**
    Read a primitive, leaving the position on its last byte.
    */
    fn primitive(&mut self, tokens: &mut [Token]) -> Result<(), Error> {
        let start = self.pos;
        let mut pos = start;

        while let Some(&curr) = self.src.get(pos) {
            match curr {
                b'\t' | b'\r' | b'\n' | b' ' | b',' | b']' | b'}' => break,
                b':' if !self.strict => break,
                curr if curr < 32 || curr >= 127 => return Err(Error::InvalidChar),
                _ => pos += 1,
            }
        }

        if pos == self.src.len() && self.strict {
            return Err(Error::Incomplete);
        }

        self.push(tokens, Token::new(Kind::Primitive, start, pos, 0))?;
        self.pos = pos - 1;

        Ok(())
    }
}
