/*!
Materializing a single token into a typed output.

Strings are copied, truncated to fit, and terminated with a `0` byte. Primitives
are decoded as `true`, `false`, or a base-10 signed integer and narrowed into an
integer of the requested width. Containers are never copied, only measured, so
callers can step over them.
*/

use crate::token::{subtree_size, Kind, Token};

/**
Where a materialized value is written.
*/
#[derive(Debug)]
pub enum Out<'a> {
    /**
    Don't write anything, just report the size of the value.
    */
    Discard,
    /**
    A raw byte buffer.

    Strings are copied into the buffer followed by a `0` byte, silently truncating
    to fit. Primitives are written as native-endian integers if the buffer is
    exactly 1, 2, 4, or 8 bytes long. Otherwise they aren't written.
    */
    Bytes(&'a mut [u8]),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
}

impl<'a> Default for Out<'a> {
    #[inline]
    fn default() -> Self {
        Out::Discard
    }
}

impl<'a> Out<'a> {
    /**
    The number of bytes available in the output.
    */
    #[inline]
    pub fn size(&self) -> usize {
        match self {
            Out::Discard => 0,
            Out::Bytes(buf) => buf.len(),
            Out::I8(_) => 1,
            Out::I16(_) => 2,
            Out::I32(_) => 4,
            Out::I64(_) => 8,
        }
    }

    /**
    Borrow the output for a shorter lifetime.
    */
    #[inline]
    pub fn reborrow(&mut self) -> Out<'_> {
        match self {
            Out::Discard => Out::Discard,
            Out::Bytes(buf) => Out::Bytes(&mut **buf),
            Out::I8(v) => Out::I8(&mut **v),
            Out::I16(v) => Out::I16(&mut **v),
            Out::I32(v) => Out::I32(&mut **v),
            Out::I64(v) => Out::I64(&mut **v),
        }
    }
}

/**
Write the value at the start of `tokens` into `out`.

Returns the number of flat slots the value occupies: `1` for scalars, the full
subtree size for containers, and `0` for an empty buffer or an undefined token.
*/
pub fn materialize(src: &[u8], tokens: &[Token], out: Out) -> usize {
    let token = match tokens.first() {
        Some(token) => token,
        None => return 0,
    };

    match token.kind {
        Kind::String => {
            copy_str(token.as_bytes(src), out);
            1
        }
        Kind::Primitive => {
            write_int(decode_primitive(token.as_bytes(src)), out);
            1
        }
        Kind::Object | Kind::Array => subtree_size(tokens),
        Kind::Undefined => 0,
    }
}

/**
Copy as much of `s` as fits into the output, followed by a `0` byte.

Only byte buffers receive strings.
*/
fn copy_str(s: &[u8], out: Out) {
    if let Out::Bytes(buf) = out {
        let copy = match buf.len().min(s.len() + 1).checked_sub(1) {
            Some(copy) => copy,
            None => return,
        };

        buf[..copy].copy_from_slice(&s[..copy]);
        buf[copy] = 0;
    }
}

fn write_int(n: i64, out: Out) {
    match out {
        Out::Discard => (),
        Out::Bytes(buf) => match buf.len() {
            1 => buf.copy_from_slice(&(n as i8).to_ne_bytes()),
            2 => buf.copy_from_slice(&(n as i16).to_ne_bytes()),
            4 => buf.copy_from_slice(&(n as i32).to_ne_bytes()),
            8 => buf.copy_from_slice(&n.to_ne_bytes()),
            _ => (),
        },
        Out::I8(v) => *v = n as i8,
        Out::I16(v) => *v = n as i16,
        Out::I32(v) => *v = n as i32,
        Out::I64(v) => *v = n,
    }
}

/**
Decode a primitive's text as an integer.

`true` is `1` and `false` is `0`. Anything else is parsed as a base-10 integer.
*/
pub(crate) fn decode_primitive(s: &[u8]) -> i64 {
    if s.starts_with(b"true") {
        1
    } else if s.starts_with(b"false") {
        0
    } else {
        parse_long(s)
    }
}

/**
Parse a leading base-10 integer.

Leading whitespace and a single sign are allowed. Parsing stops at the first
byte that isn't a digit, so `1.5` is `1` and `null` is `0`. Values that don't fit
saturate at the bounds of `i64`.
*/
pub(crate) fn parse_long(s: &[u8]) -> i64 {
    let mut bytes = s
        .iter()
        .copied()
        .skip_while(u8::is_ascii_whitespace)
        .peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    // accumulate towards the sign so `i64::MIN` is reachable
    bytes
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |n, digit| {
            let digit = (digit - b'0') as i64;

            if negative {
                n.saturating_mul(10).saturating_sub(digit)
            } else {
                n.saturating_mul(10).saturating_add(digit)
            }
        })
}
