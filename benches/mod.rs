#![cfg(unstable)]
#![feature(test)]
extern crate test;

use squirrel_bind::{subtree_size, Document, Field, Kind, Out, Parser, Slot, Token, Tokenize};

use std::{ops::ControlFlow, str};

#[bench]
fn tokenize_600b_event(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_event.json");
    let mut tokens = [Token::default(); 64];

    b.bytes = input.len() as u64;
    b.iter(|| Parser::new().tokenize(input, &mut tokens).unwrap())
}

#[bench]
fn tokenize_600b_event_strict(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_event.json");
    let mut tokens = [Token::default(); 64];

    b.bytes = input.len() as u64;
    b.iter(|| Parser::strict().tokenize(input, &mut tokens).unwrap())
}

#[bench]
fn subtree_size_600b_event(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_event.json");
    let mut tokens = [Token::default(); 64];
    let doc = Document::tokenize(input, &mut tokens).unwrap();

    b.bytes = input.len() as u64;
    b.iter(|| subtree_size(doc.tokens()))
}

#[bench]
fn bind_600b_event_all(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_event.json");
    let mut tokens = [Token::default(); 64];
    let doc = Document::tokenize(input, &mut tokens).unwrap();

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut fields = [Field::default(); 32];
        let bound = doc.bind(None, &mut fields);

        test::black_box(fields);
        bound
    })
}

#[bench]
fn bind_600b_event_sparse(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_event.json");
    let mut tokens = [Token::default(); 64];
    let doc = Document::tokenize(input, &mut tokens).unwrap();

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut status = 0i32;
        let mut method = [0u8; 16];

        let bound = doc.bind_object(&mut [
            Slot::new("StatusCode", Kind::Primitive).with_out(Out::I32(&mut status)),
            Slot::new("RequestMethod", Kind::String).with_out(Out::Bytes(&mut method)),
        ]);

        test::black_box((status, method));
        bound
    })
}

#[bench]
fn parse_600b_event_sparse(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut tokens = [Token::default(); 64];
        let mut status = 0i32;

        let bound = squirrel_bind::parse_object(
            input,
            &mut tokens,
            &mut [Slot::new("StatusCode", Kind::Primitive).with_out(Out::I32(&mut status))],
        )
        .unwrap();

        test::black_box(status);
        bound
    })
}

#[bench]
fn read_600b_event_value_serde_json_sparse(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let v: serde_json::Value = serde_json::from_slice(input).unwrap();

        v["StatusCode"].as_i64().unwrap()
    })
}

#[bench]
fn read_600b_event_value_json(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let v: json::JsonValue = json::parse(str::from_utf8(input).unwrap()).unwrap();
        v
    })
}

#[bench]
fn read_600b_event_value_simd_json(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut input = input.to_vec();
        let v = simd_json::to_borrowed_value(&mut input).unwrap();
        test::black_box(v);
    })
}

#[bench]
fn bind_device_config_typed(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/device_config.json");
    let mut tokens = [Token::default(); 64];
    let doc = Document::tokenize(input, &mut tokens).unwrap();

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut id = 0i32;
        let mut enabled = 0i8;
        let mut offset = 0i16;
        let mut name = [0u8; 32];

        let bound = doc.bind_object(&mut [
            Slot::new("id", Kind::Primitive).with_out(Out::I32(&mut id)),
            Slot::new("enabled", Kind::Primitive).with_out(Out::I8(&mut enabled)),
            Slot::new("offset", Kind::Primitive).with_out(Out::I16(&mut offset)),
            Slot::new("name", Kind::String).with_out(Out::Bytes(&mut name)),
        ]);

        test::black_box((id, enabled, offset, name));
        bound
    })
}

#[bench]
fn bind_device_config_array(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/device_config.json");
    let mut tokens = [Token::default(); 64];
    let doc = Document::tokenize(input, &mut tokens).unwrap();

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut sum = 0usize;

        doc.bind_array("thresholds", |_, _, value| {
            sum += value.len();
            ControlFlow::Continue(())
        })
        .unwrap();

        sum
    })
}

#[bench]
fn read_device_config_value_serde_json(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/device_config.json");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let v: serde_json::Value = serde_json::from_slice(input).unwrap();
        v
    })
}

#[bench]
fn read_device_config_validate_utf8(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/device_config.json");

    b.bytes = input.len() as u64;
    b.iter(|| str::from_utf8(input).unwrap())
}
