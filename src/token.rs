/*!
The flat token model the binder walks.

A tokenized document is a single contiguous buffer of [`Token`]s in preorder:
every container is immediately followed by the flattened subtrees of its children.
For objects, children alternate between a key and its value.

Nothing here allocates. Cursors are plain offsets into the token buffer and every
access goes through a checked `get`, so a malformed buffer can produce nonsense
results but never an out-of-bounds read.
*/

use std::{fmt, str};

use crate::scan::{Error, Parser, Tokenize};

/**
The kind of a token.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Undefined,
    Object,
    Array,
    String,
    Primitive,
}

impl Default for Kind {
    #[inline]
    fn default() -> Self {
        Kind::Undefined
    }
}

impl Kind {
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, Kind::Object | Kind::Array)
    }
}

/**
A single value in a tokenized document.

The span `start..end` is a byte range into the source text. Strings span their
contents without the surrounding quotes. Containers span from their opening to
their closing bracket, inclusive.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Token {
    pub kind: Kind,
    pub start: usize,
    pub end: usize,
    /**
    The number of children.

    For objects this is the number of key/value pairs, for arrays the number of
    elements. It's always zero for scalars.
    */
    pub size: usize,
}

impl Token {
    #[inline]
    pub const fn new(kind: Kind, start: usize, end: usize, size: usize) -> Self {
        Token {
            kind,
            start,
            end,
            size,
        }
    }

    /**
    The length of the token's span in bytes.
    */
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /**
    The raw bytes of this token within its source.

    A span that doesn't fit within `src` produces an empty slice.
    */
    #[inline]
    pub fn as_bytes<'src>(&self, src: &'src [u8]) -> &'src [u8] {
        src.get(self.start..self.end).unwrap_or(&[])
    }

    /**
    The raw text of this token within its source, if it's valid UTF8.

    String tokens are not unescaped.
    */
    #[inline]
    pub fn as_str<'src>(&self, src: &'src [u8]) -> Option<&'src str> {
        str::from_utf8(self.as_bytes(src)).ok()
    }

    /**
    Whether the token's text is exactly equal to `text`.
    */
    #[inline]
    pub fn text_eq(&self, src: &[u8], text: &[u8]) -> bool {
        self.as_bytes(src) == text
    }
}

/**
The number of flat slots occupied by the subtree rooted at `tokens[0]`.

Scalars occupy a single slot. Containers occupy one slot for themselves plus the
slots of all their descendants. An empty buffer, or an `Undefined` root, occupies
nothing.

The walk is iterative: it keeps a count of subtrees still owed rather than
recursing, so deeply nested input can't exhaust the stack. If the buffer ends,
or an `Undefined` token is reached, before the subtree is complete then the
slots seen so far are returned.
*/
pub fn subtree_size(tokens: &[Token]) -> usize {
    let mut pending = 1usize;
    let mut consumed = 0usize;

    while pending > 0 {
        let token = match tokens.get(consumed) {
            Some(token) => token,
            None => break,
        };

        pending -= 1;
        pending = match token.kind {
            Kind::String | Kind::Primitive => pending,
            Kind::Array => pending.saturating_add(token.size),
            Kind::Object => pending.saturating_add(token.size.saturating_mul(2)),
            Kind::Undefined => break,
        };

        consumed += 1;
    }

    consumed
}

/**
A tokenized JSON document that's borrowed from a source buffer and a token buffer.

The document doesn't own anything. It's cheap to copy and can be bound any number
of times.
*/
#[derive(Clone, Copy)]
pub struct Document<'src, 'tok> {
    pub(crate) src: &'src [u8],
    pub(crate) tokens: &'tok [Token],
}

impl<'src, 'tok> fmt::Debug for Document<'src, 'tok> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        struct Tokens<'brw, 'src, 'tok>(&'brw Document<'src, 'tok>);

        impl<'brw, 'src, 'tok> fmt::Debug for Tokens<'brw, 'src, 'tok> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let mut list = f.debug_list();

                for (i, token) in self.0.tokens.iter().enumerate() {
                    match token.kind {
                        Kind::Object | Kind::Array => {
                            list.entry(&(token.kind, token.size, i));
                        }
                        _ => {
                            list.entry(&(token.kind, token.as_str(self.0.src), i));
                        }
                    }
                }

                list.finish()
            }
        }

        f.debug_struct("Document")
            .field("src", &str::from_utf8(self.src))
            .field("tokens", &Tokens(self))
            .finish()
    }
}

impl<'src, 'tok> Document<'src, 'tok> {
    /**
    Tokenize `src` into `tokens` using the permissive reference [`Parser`].

    The document borrows the filled prefix of `tokens`.
    */
    #[inline]
    pub fn tokenize(src: &'src [u8], tokens: &'tok mut [Token]) -> Result<Self, Error> {
        Self::tokenize_with(&mut Parser::new(), src, tokens)
    }

    /**
    Tokenize `src` into `tokens` using any tokenizer.

    Tokenizer failures are returned unchanged.
    */
    pub fn tokenize_with(
        tokenizer: &mut impl Tokenize,
        src: &'src [u8],
        tokens: &'tok mut [Token],
    ) -> Result<Self, Error> {
        let count = match tokenizer.tokenize(src, tokens) {
            Ok(count) => count,
            Err(err) => {
                diag!("tokenize failed: {}", err);
                return Err(err);
            }
        };

        diag!("tokenize: token_count: {}", count);

        let tokens: &'tok [Token] = tokens;
        Ok(Document {
            src,
            tokens: tokens.get(..count).unwrap_or(tokens),
        })
    }

    /**
    Build a document from a source and a token buffer that was already filled.
    */
    #[inline]
    pub fn from_parts(src: &'src [u8], tokens: &'tok [Token]) -> Self {
        Document { src, tokens }
    }

    #[inline]
    pub fn src(&self) -> &'src [u8] {
        self.src
    }

    #[inline]
    pub fn tokens(&self) -> &'tok [Token] {
        self.tokens
    }
}
