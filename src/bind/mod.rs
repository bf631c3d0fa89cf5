/*!
Binding selected values from a tokenized document into caller-owned outputs.

The binder walks the key/value pairs of a top-level object exactly once. It never
parses text and never allocates. What happens to each pair is decided by a
[`Strategy`]: it accepts or rejects each key and then consumes the value of any key
it accepted, reporting how many flat token slots it used.

The walk is a small state machine:

- `Start`: expect an object and remember how many pairs it has. An empty object
  leaves the walk in `Start`.
- `Key`: ask the strategy whether it wants the current key. Go to `Value` if it
  does, otherwise `Skip`.
- `Skip`: step over the whole value subtree.
- `Value`: hand the value to the strategy. If it consumed nothing then step over
  the value subtree instead.
- `Stop`: the strategy has nowhere left to bind values to.

Structural problems, like a root that isn't an object or a key that isn't a
string, are only reported as diagnostics. The flat token buffer always knows
how big every subtree is, so the walk can always step forward deterministically.
Callers that need strict validation should check the state of their outputs.
*/

mod array;
mod fields;
mod table;
mod value;

use std::ops::ControlFlow;

use crate::{
    scan::Error,
    token::{subtree_size, Document, Kind, Token},
};

pub use self::{fields::*, table::*, value::*};

/**
Decides which keys get bound and how their values are consumed.
*/
pub trait Strategy<'tok> {
    /**
    Whether the value following `key` should be handed to [`Strategy::consume_value`].
    */
    fn accept_key(&mut self, src: &[u8], key: &'tok Token) -> bool;

    /**
    Consume the value of the most recently accepted key.

    `value` is the remainder of the token buffer, starting at the value token.
    Return the number of slots consumed, or `0` to have the walk skip the value.
    */
    fn consume_value(&mut self, src: &[u8], value: &'tok [Token]) -> usize;

    /**
    Whether the strategy has nothing left to bind.

    Once this returns `true` the walk stops without visiting any more keys.
    */
    #[inline]
    fn is_done(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Key,
    Value,
    Skip,
    Stop,
}

/**
Walk the key/value pairs of the object at the start of `tokens`, returning the
number of values the strategy bound.

If the token buffer contains more than one root then each is walked in turn.
*/
pub fn walk<'tok, S>(src: &[u8], tokens: &'tok [Token], strategy: &mut S) -> usize
where
    S: Strategy<'tok> + ?Sized,
{
    let mut state = State::Start;
    let mut cursor = 0usize;
    let mut pairs = 0usize;
    let mut bound = 0usize;

    while let Some(rest) = tokens.get(cursor..) {
        let token = match rest.first() {
            Some(token) => token,
            None => break,
        };

        let advance = match state {
            State::Start => {
                if token.kind != Kind::Object {
                    diag!(
                        "invalid object ({:?}): root element must be an object",
                        token.kind
                    );
                }

                if token.size == 0 {
                    diag!("empty object");
                } else {
                    state = State::Key;
                    pairs = token.size;
                }

                1
            }
            State::Key => {
                pairs = pairs.saturating_sub(1);

                if token.kind != Kind::String {
                    diag!(
                        "invalid object ({:?}): object keys must be strings",
                        token.kind
                    );
                }

                if strategy.accept_key(src, token) {
                    diag!("bind key: {:?}", token.as_str(src));
                    state = State::Value;
                } else {
                    diag!("skip key: {:?}", token.as_str(src));
                    state = State::Skip;
                }

                1
            }
            State::Skip => {
                state = after_value(pairs);

                subtree_size(rest)
            }
            State::Value => {
                let consumed = strategy.consume_value(src, rest);

                state = if strategy.is_done() {
                    State::Stop
                } else {
                    after_value(pairs)
                };

                if consumed > 0 {
                    bound += 1;
                    consumed
                } else {
                    subtree_size(rest)
                }
            }
            State::Stop => break,
        };

        // an undefined token has no size, but we still need to step past it
        let advance = advance.max(1);
        test_assert!(
            advance <= rest.len(),
            "the walk stepped past the end of the tokens"
        );

        cursor = cursor.saturating_add(advance);
    }

    bound
}

#[inline]
fn after_value(pairs: usize) -> State {
    if pairs == 0 {
        State::Start
    } else {
        State::Key
    }
}

/**
Tokenize `src` and bind its top-level values, in document order, into `fields`.

If a `filter` is given then only keys it contains are bound.
*/
pub fn parse<'tok>(
    src: &[u8],
    tokens: &'tok mut [Token],
    filter: Option<&[&str]>,
    fields: &mut [Field<'tok>],
) -> Result<usize, Error> {
    Ok(Document::tokenize(src, tokens)?.bind(filter, fields))
}

/**
Tokenize `src` and bind its top-level values, in document order, into each of `fields`.
*/
pub fn parse_each<'tok>(
    src: &[u8],
    tokens: &'tok mut [Token],
    filter: Option<&[&str]>,
    fields: &mut [&mut Field<'tok>],
) -> Result<usize, Error> {
    Ok(Document::tokenize(src, tokens)?.bind_each(filter, fields))
}

/**
Tokenize `src` and bind the top-level values named by `slots`.
*/
pub fn parse_object(src: &[u8], tokens: &mut [Token], slots: &mut [Slot]) -> Result<usize, Error> {
    Ok(Document::tokenize(src, tokens)?.bind_object(slots))
}

/**
Tokenize `src` and bind the top-level values named by `slots`, which must
appear in the document in the same order as they're given.
*/
pub fn parse_object_each(
    src: &[u8],
    tokens: &mut [Token],
    slots: &mut [&mut Slot],
) -> Result<usize, Error> {
    Ok(Document::tokenize(src, tokens)?.bind_object_each(slots))
}

/**
Tokenize `src` and visit each element of the top-level array called `name`.
*/
pub fn parse_array(
    src: &[u8],
    tokens: &mut [Token],
    name: &str,
    each: impl FnMut(usize, Kind, &[u8]) -> ControlFlow<()>,
) -> Result<usize, Error> {
    Document::tokenize(src, tokens)?.bind_array(name, each)
}
