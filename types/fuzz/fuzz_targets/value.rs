#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sigma_codec::Config;
use sigma_types::{SType, Value};

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    Raw(Vec<u8>),
    Shallow { max_depth: u8, bytes: Vec<u8> },
    Longs(Vec<i64>),
    Bools(Vec<bool>),
    Pairs(Vec<(i8, i32)>),
}

fn roundtrip(value: &Value, cfg: &Config) {
    let bytes = value.to_bytes();
    let decoded = Value::from_bytes_cfg(&bytes, cfg).expect("failed to decode an encoded value");
    assert_eq!(&decoded, value);
    assert_eq!(decoded.to_bytes(), bytes);
}

fn fuzz(input: FuzzInput) {
    let cfg = Config::default();
    match input {
        FuzzInput::Raw(bytes) => {
            if let Ok(value) = Value::from_bytes(&bytes) {
                roundtrip(&value, &cfg);
            }
        }
        FuzzInput::Shallow { max_depth, bytes } => {
            let cfg = cfg.with_max_depth(max_depth as usize);
            if let Ok(value) = Value::from_bytes_cfg(&bytes, &cfg) {
                roundtrip(&value, &cfg);
            }
        }
        FuzzInput::Longs(items) => {
            let items = items.into_iter().map(Value::Long).collect();
            if let Ok(value) = Value::coll(SType::LONG, items) {
                roundtrip(&value, &cfg);
            }
        }
        FuzzInput::Bools(items) => {
            let items = items.into_iter().map(Value::Boolean).collect();
            if let Ok(value) = Value::coll(SType::BOOLEAN, items) {
                roundtrip(&value, &cfg);
            }
        }
        FuzzInput::Pairs(items) => {
            let items = items
                .into_iter()
                .map(|(a, b)| Value::pair(Value::Byte(a), Value::Int(b)))
                .collect::<Result<Vec<_>, _>>()
                .expect("shallow pairs are always accepted");
            if let Ok(value) = Value::coll(SType::pair(SType::BYTE, SType::INT), items) {
                roundtrip(&value, &cfg);
            }
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
