use std::ops::ControlFlow;

use squirrel_bind::{subtree_size, Document, Field, Kind, Out, Parser, Slot, Token, Tokenize};

pub fn bind(input: &[u8]) {
    // Make sure we don't panic when tokenizing or binding documents
    let mut tokens = vec![Token::default(); input.len() + 1];
    let _ = Parser::strict().tokenize(input, &mut tokens);

    let mut tokens = vec![Token::default(); input.len() + 1];
    let doc = match Document::tokenize(input, &mut tokens) {
        Ok(doc) => doc,
        Err(_) => return,
    };

    let mut fields = vec![Field::default(); 16];
    let bound = doc.bind(None, &mut fields);

    let mut n = 0i64;
    let mut s = [0u8; 8];
    let mut slots = [
        Slot::new("a", Kind::Primitive).with_out(Out::I64(&mut n)),
        Slot::new("b", Kind::String).with_out(Out::Bytes(&mut s)),
        Slot::new("c", Kind::Array),
    ];
    doc.bind_object(&mut slots);

    if let Some(name) = fields.first().and_then(|field| field.key_str(input)) {
        let _ = doc.bind_array(name, |_, _, _| ControlFlow::Continue(()));
    }

    if serde_json::from_slice::<serde_json::Value>(input).is_ok() {
        // If serde_json can read the document then the token buffer must be a single whole tree
        assert_eq!(doc.tokens().len(), subtree_size(doc.tokens()));

        let root = doc.tokens()[0];
        if root.kind == Kind::Object {
            assert_eq!(root.size.min(fields.len()), bound);
        }
    }
}
