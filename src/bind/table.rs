/*!
Binding top-level values by name into typed descriptors.

A [`Slot`] names a key, the kind of value it expects, and where to write that
value. A key binds to the first slot with exactly the same name. If the value's
kind doesn't match the slot's then the slot is marked invalid and its output
isn't touched.
*/

use std::{borrow::BorrowMut, fmt};

use crate::token::{Document, Kind, Token};

use super::{materialize, walk, Out, Strategy};

/**
The state of a [`Slot`] after binding.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /**
    No key matched the slot.
    */
    Empty,
    /**
    A key matched and its value was written.
    */
    Valid,
    /**
    A key matched but its value was the wrong kind.
    */
    Invalid,
}

impl Default for Status {
    #[inline]
    fn default() -> Self {
        Status::Empty
    }
}

/**
A callback invoked after a value is successfully bound to a slot.

It receives the slot's key, the bound value and its descendants, and the source.
*/
pub type OnBind<'a> = &'a mut dyn FnMut(&str, &[Token], &[u8]);

/**
A named output for a single top-level value.
*/
pub struct Slot<'a> {
    pub key: &'a str,
    pub kind: Kind,
    pub out: Out<'a>,
    pub status: Status,
    pub on_bind: Option<OnBind<'a>>,
}

impl<'a> fmt::Debug for Slot<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Slot")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("out", &self.out)
            .field("status", &self.status)
            .field("on_bind", &self.on_bind.is_some())
            .finish()
    }
}

impl<'a> Slot<'a> {
    /**
    A slot for the key `key` that expects a value of the given kind.

    The value is measured but not written anywhere until an output is given.
    */
    #[inline]
    pub fn new(key: &'a str, kind: Kind) -> Self {
        Slot {
            key,
            kind,
            out: Out::Discard,
            status: Status::Empty,
            on_bind: None,
        }
    }

    /**
    Write the bound value into `out`.
    */
    #[inline]
    pub fn with_out(mut self, out: Out<'a>) -> Self {
        self.out = out;
        self
    }

    /**
    Call `on_bind` after the value is bound.
    */
    #[inline]
    pub fn with_on_bind(mut self, on_bind: OnBind<'a>) -> Self {
        self.on_bind = Some(on_bind);
        self
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.status == Status::Valid
    }
}

/**
Resolves keys against a table of slots.

When `ordered`, slots are consumed left-to-right: a key only matches slots after
the last one matched.
*/
struct Table<'s, S> {
    slots: &'s mut [S],
    ordered: bool,
    from: usize,
    current: Option<usize>,
    outstanding: usize,
}

impl<'s, 'a, 'tok, S> Strategy<'tok> for Table<'s, S>
where
    S: BorrowMut<Slot<'a>>,
{
    fn accept_key(&mut self, src: &[u8], key: &'tok Token) -> bool {
        let from = if self.ordered { self.from } else { 0 };

        self.current = self
            .slots
            .get_mut(from..)
            .and_then(|slots| {
                slots
                    .iter_mut()
                    .position(|slot| key.text_eq(src, slot.borrow_mut().key.as_bytes()))
            })
            .map(|i| from + i);

        match self.current {
            Some(i) => {
                if self.ordered {
                    self.from = i + 1;
                }

                true
            }
            None => false,
        }
    }

    fn consume_value(&mut self, src: &[u8], value: &'tok [Token]) -> usize {
        let slot = match self.current.take().and_then(|i| self.slots.get_mut(i)) {
            Some(slot) => slot.borrow_mut(),
            None => return 0,
        };

        let kind = value.first().map(|token| token.kind).unwrap_or_default();

        // an undefined value has nothing to bind, whatever the slot expects
        if slot.kind != kind || kind == Kind::Undefined {
            diag!(
                "invalid value for `{}`: expected {:?}, found {:?}",
                slot.key,
                slot.kind,
                kind
            );

            slot.status = Status::Invalid;
            return 0;
        }

        let consumed = materialize(src, value, slot.out.reborrow());

        slot.status = Status::Valid;
        self.outstanding = self.outstanding.saturating_sub(1);

        let key = slot.key;
        diag!("bound `{}`, {} slots outstanding", key, self.outstanding);

        if let Some(on_bind) = slot.on_bind.as_mut() {
            on_bind(key, value.get(..consumed).unwrap_or(value), src);
        }

        consumed
    }
}

impl<'src, 'tok> Document<'src, 'tok> {
    /**
    Bind top-level values into the slots with matching keys.

    Each key binds to the first slot with exactly the same name, so the order of
    slots matters if any share a key. Every slot's status is reset before binding.
    Returns the number of slots that became valid.
    */
    #[inline]
    pub fn bind_object(&self, slots: &mut [Slot<'_>]) -> usize {
        bind_table(self, slots, false)
    }

    /**
    Bind top-level values into each of `slots`, consuming them left-to-right.

    A key only matches slots after the last one matched, so slots are expected to
    appear in the same order as their keys do in the document. Slots passed over
    without a match stay empty.
    */
    #[inline]
    pub fn bind_object_each(&self, slots: &mut [&mut Slot<'_>]) -> usize {
        bind_table(self, slots, true)
    }
}

fn bind_table<'a, S>(doc: &Document, slots: &mut [S], ordered: bool) -> usize
where
    S: BorrowMut<Slot<'a>>,
{
    for slot in slots.iter_mut() {
        slot.borrow_mut().status = Status::Empty;
    }

    let outstanding = slots.len();

    walk(
        doc.src,
        doc.tokens,
        &mut Table {
            slots,
            ordered,
            from: 0,
            current: None,
            outstanding,
        },
    )
}
