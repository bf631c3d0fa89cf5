/*!
# `squirrel-bind`

## 🐿📌

A binder for tokenized JSON documents. This library picks a handful of top-level
values out of a JSON object and writes them into caller-owned outputs, without
allocating and without parsing text more than once.

A document is first tokenized into a flat buffer of [`Token`]s in preorder, where
each container is followed by the tokens of its children. The binder then walks
the pairs of the top-level object a single time, stepping over anything it isn't
interested in using the sizes recorded in the tokens.

There are a few ways to bind values:

- [`Document::bind`]: fill a list of [`Field`]s in document order, optionally only
  for keys in an allow-list.
- [`Document::bind_object`]: write values into named, typed [`Slot`]s.
- [`Document::bind_each`] and [`Document::bind_object_each`]: the same, but with
  outputs that can live anywhere.
- [`Document::bind_array`]: call a function for every element of a named array.

The crate-level `parse_*` functions tokenize with the reference [`Parser`] first.
Any other tokenizer can be plugged in through [`Tokenize`].

## Errors

Only tokenizer failures abort a call. A root that isn't an object or a key that
isn't a string are reported as diagnostics (through the `log` crate when the
`log` feature is enabled) and the walk carries on. Keys that don't match leave
their outputs empty, and values of the wrong kind mark their slot
[`Status::Invalid`] without writing anything. Callers that need to know whether
a document was complete should check both the returned count and their outputs.
*/

#[macro_use]
mod macros;

pub mod bind;
pub mod scan;
pub mod token;

pub use self::{
    bind::{
        materialize, parse, parse_array, parse_each, parse_object, parse_object_each, walk, Field,
        OnBind, Out, Slot, Status, Strategy,
    },
    scan::{Error, Parser, Tokenize},
    token::{subtree_size, Document, Kind, Token},
};
