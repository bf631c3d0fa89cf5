/*!
Binding top-level values in document order.

Each accepted key fills the next unfilled [`Field`], recording the key, the
value's kind, and the value's whole subtree. Values aren't type-checked or copied.
*/

use std::borrow::BorrowMut;

use crate::token::{subtree_size, Document, Kind, Token};

use super::{walk, Strategy};

/**
A key/value pair bound from a document.
*/
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Field<'tok> {
    /**
    The kind of the bound value.
    */
    pub kind: Kind,
    /**
    The key token, if the field was bound.
    */
    pub key: Option<&'tok Token>,
    /**
    The value token followed by all of its descendants.
    */
    pub value: &'tok [Token],
}

impl<'tok> Field<'tok> {
    /**
    Whether a value was bound to this field.
    */
    #[inline]
    pub fn is_bound(&self) -> bool {
        !self.value.is_empty()
    }

    /**
    The value token itself.
    */
    #[inline]
    pub fn value_token(&self) -> Option<&'tok Token> {
        self.value.first()
    }

    /**
    The number of flat slots the value occupies.
    */
    #[inline]
    pub fn count(&self) -> usize {
        self.value.len()
    }

    #[inline]
    pub fn key_str<'src>(&self, src: &'src [u8]) -> Option<&'src str> {
        self.key.and_then(|key| key.as_str(src))
    }

    #[inline]
    pub fn value_bytes<'src>(&self, src: &'src [u8]) -> Option<&'src [u8]> {
        self.value_token().map(|value| value.as_bytes(src))
    }
}

/**
Fills fields in order, optionally only for keys in a filter.
*/
struct Fields<'f, 'k, F> {
    filter: Option<&'k [&'k str]>,
    fields: &'f mut [F],
    index: usize,
}

impl<'f, 'k, 'tok, F> Strategy<'tok> for Fields<'f, 'k, F>
where
    F: BorrowMut<Field<'tok>>,
{
    fn accept_key(&mut self, src: &[u8], key: &'tok Token) -> bool {
        let field = match self.fields.get_mut(self.index) {
            Some(field) => field.borrow_mut(),
            None => return false,
        };

        if let Some(filter) = self.filter {
            if !filter.iter().any(|name| key.text_eq(src, name.as_bytes())) {
                return false;
            }
        }

        field.key = Some(key);
        true
    }

    fn consume_value(&mut self, _: &[u8], value: &'tok [Token]) -> usize {
        let field = match self.fields.get_mut(self.index) {
            Some(field) => field.borrow_mut(),
            None => return 0,
        };

        let count = subtree_size(value);

        field.kind = value.first().map(|token| token.kind).unwrap_or_default();
        field.value = value.get(..count).unwrap_or(value);

        self.index += 1;
        count
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.index >= self.fields.len()
    }
}

impl<'src, 'tok> Document<'src, 'tok> {
    /**
    Bind top-level values, in document order, into `fields`.

    If a `filter` is given then only keys it contains are bound. Keys are compared
    byte-for-byte against the raw key text. Any fields that aren't filled are left
    empty. Returns the number of fields filled.
    */
    #[inline]
    pub fn bind(&self, filter: Option<&[&str]>, fields: &mut [Field<'tok>]) -> usize {
        bind_fields(self, filter, fields)
    }

    /**
    Bind top-level values, in document order, into each of `fields`.

    This is the same as [`Document::bind`], but the fields can live anywhere.
    */
    #[inline]
    pub fn bind_each(&self, filter: Option<&[&str]>, fields: &mut [&mut Field<'tok>]) -> usize {
        bind_fields(self, filter, fields)
    }
}

fn bind_fields<'tok, F>(doc: &Document<'_, 'tok>, filter: Option<&[&str]>, fields: &mut [F]) -> usize
where
    F: BorrowMut<Field<'tok>>,
{
    for field in fields.iter_mut() {
        *field.borrow_mut() = Field::default();
    }

    walk(
        doc.src,
        doc.tokens,
        &mut Fields {
            filter,
            fields,
            index: 0,
        },
    )
}
