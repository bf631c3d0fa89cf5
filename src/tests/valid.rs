use super::*;

use crate::{tests::some, Field, Parser, Tokenize};

use serde_json::json;

#[test]
fn read_generated() {
    // debug builds are slow, so just run a handful of cases
    let iterations = {
        #[cfg(debug)]
        {
            100
        }

        #[cfg(not(debug))]
        {
            2000
        }
    };

    for _ in 0..iterations {
        // Check the token buffer against some randomly generated JSON data
        // this makes sure the shape of the flattened tree always agrees with
        // a real JSON parser, and that the root's subtree covers every token
        let input = some::json_object();

        let expected: serde_json::Value = match serde_json::from_str(&input) {
            Ok(v) => v,
            Err(e) => {
                panic!("parsing `{}`: {}", input, e);
            }
        };

        let tokens = tokenize_ok(input.as_bytes());

        assert_eq!(tokens.len(), subtree_size(&tokens), "{}", input);
        assert_eq!(expected, to_value(input.as_bytes(), &tokens), "{}", input);
    }
}

#[test]
fn bind_generated() {
    for _ in 0..200 {
        let (input, keys) = some::json_object_with_keys();
        let expected: serde_json::Value = serde_json::from_str(&input).unwrap();

        let tokens = tokenize_ok(input.as_bytes());
        let doc = Document::from_parts(input.as_bytes(), &tokens);

        let mut fields = vec![Field::default(); keys.len()];
        assert_eq!(keys.len(), doc.bind(None, &mut fields));

        for (key, field) in keys.iter().zip(&fields) {
            assert_eq!(Some(key.as_str()), field.key_str(doc.src()));
            assert_eq!(subtree_size(field.value), field.count());
            assert_eq!(expected[key], to_value(doc.src(), field.value));
        }

        // binding the same document again produces the same fields
        let mut again = vec![Field::default(); keys.len()];
        assert_eq!(keys.len(), doc.bind(None, &mut again));
        assert_eq!(fields, again);
    }
}

#[test]
fn read_empty_map() {
    let tokens = tokenize_ok(b"{}");

    assert_eq!(vec![Token::new(Kind::Object, 0, 2, 0)], tokens);
}

#[test]
fn read_empty() {
    let tokens = tokenize_ok(b"");

    assert!(tokens.is_empty());
}

#[test]
fn read_spans() {
    let input = b"{\"a\": [1, \"two\"], \"b\": true}";
    let tokens = tokenize_ok(input);

    assert_eq!(
        vec![
            Token::new(Kind::Object, 0, 28, 2),
            Token::new(Kind::String, 2, 3, 0),
            Token::new(Kind::Array, 6, 16, 2),
            Token::new(Kind::Primitive, 7, 8, 0),
            Token::new(Kind::String, 11, 14, 0),
            Token::new(Kind::String, 19, 20, 0),
            Token::new(Kind::Primitive, 23, 27, 0),
        ],
        tokens
    );

    assert_eq!(b"two", tokens[4].as_bytes(input));
    assert_eq!(Some("true"), tokens[6].as_str(input));
}

#[test]
fn read_escapes() {
    let input = r#"{"a\"b":"壁\\\/\b\f\n\r\t"}"#.as_bytes();
    let tokens = tokenize_ok(input);

    assert_eq!(3, tokens.len());
    assert_eq!(br#"a\"b"#, tokens[1].as_bytes(input));
    assert_eq!(json!({"a\"b": "壁\\/\u{8}\u{c}\n\r\t"}), to_value(input, &tokens));
}

#[test]
fn read_map_with_trailing_num() {
    let input = b"{\"a\":123}";
    let tokens = tokenize_ok(input);

    assert_eq!(json!({ "a": 123 }), to_value(input, &tokens));
}

#[test]
fn read_arr_of_empty_maps() {
    let input = b"{\"a\":[{},{},{}]}";
    let tokens = tokenize_ok(input);

    assert_eq!(6, tokens.len());
    assert_eq!(json!({ "a": [{}, {}, {}] }), to_value(input, &tokens));
}

#[test]
fn read_strict() {
    let input = b"{\"a\":[34785,78234.2,-1e5,true,false,null]}";

    let mut tokens = [Token::default(); 16];
    let count = Parser::strict().tokenize(input, &mut tokens).unwrap();

    assert_eq!(9, count);
    assert_eq!(
        json!({ "a": [34785u64, 78234.2f64, -1e5f64, true, false, null] }),
        to_value(input, &tokens[..count])
    );
}

#[test]
fn read_permissive_primitives() {
    // without strict mode any printable run of bytes is a primitive
    let input = b"{\"a\":nool,\"b\":+1}";
    let tokens = tokenize_ok(input);

    assert_eq!(5, tokens.len());
    assert_eq!(b"nool", tokens[2].as_bytes(input));
    assert_eq!(b"+1", tokens[4].as_bytes(input));
}

#[test]
fn read_exact_token_buffer() {
    let input = b"{\"a\":{\"x\":1,\"y\":2},\"b\":3}";

    let mut tokens = [Token::default(); 9];
    let doc = Document::tokenize(input, &mut tokens).unwrap();

    assert_eq!(9, doc.tokens().len());
    assert_eq!(5, subtree_size(&doc.tokens()[2..]));
}

#[test]
fn read_large_flat_object() {
    let pairs = 40_000;

    let mut input = String::from("{");
    for i in 0..pairs {
        if i > 0 {
            input.push(',');
        }
        input.push_str("\"k\":1");
    }
    input.push('}');

    let tokens = tokenize_ok(input.as_bytes());

    assert_eq!(1 + pairs * 2, tokens.len());
    assert_eq!(pairs, tokens[0].size);
    assert_eq!(input.len(), tokens[0].end);
    assert_eq!(tokens.len(), subtree_size(&tokens));
}

#[test]
fn read_large_array_of_objects() {
    let elems = 20_000;

    let mut input = String::from("[");
    for i in 0..elems {
        if i > 0 {
            input.push(',');
        }
        input.push_str("{\"a\":[1],\"b\":{}}");
    }
    input.push(']');

    let tokens = tokenize_ok(input.as_bytes());

    assert_eq!(1 + elems * 6, tokens.len());
    assert_eq!(elems, tokens[0].size);
    assert_eq!(tokens.len(), subtree_size(&tokens));

    // every element closes back out to the root array
    let last = tokens.len() - 6;
    assert_eq!(Kind::Object, tokens[last].kind);
    assert_eq!(2, tokens[last].size);
    assert_eq!(input.len() - 1, tokens[last].end);
}

#[test]
fn subtree_size_scalars() {
    let input = b"{\"a\":\"b\"}";
    let tokens = tokenize_ok(input);

    assert_eq!(1, subtree_size(&tokens[1..]));
    assert_eq!(1, subtree_size(&tokens[2..]));
    assert_eq!(0, subtree_size(&[]));
}

#[test]
fn subtree_size_nested() {
    let input = b"{\"a\":[[1,[2,3]],{\"b\":{}}],\"c\":4}";
    let tokens = tokenize_ok(input);

    assert_eq!(tokens.len(), subtree_size(&tokens));

    // `[[1,[2,3]],{"b":{}}]`
    assert_eq!(9, subtree_size(&tokens[2..]));
    // `[1,[2,3]]`
    assert_eq!(5, subtree_size(&tokens[3..]));
    // `{"b":{}}`
    assert_eq!(3, subtree_size(&tokens[8..]));
}

#[test]
fn read_cases() {
    for input in [
        include_bytes!("../../cases/600b_event.json") as &[u8],
        include_bytes!("../../cases/device_config.json") as &[u8],
    ] {
        let expected: serde_json::Value = serde_json::from_slice(input).unwrap();
        let tokens = tokenize_ok(input);

        assert_eq!(tokens.len(), subtree_size(&tokens));
        assert_eq!(expected, to_value(input, &tokens));
    }
}
