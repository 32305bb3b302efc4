#![no_main]

use arbitrary::Arbitrary;
use jsonfrag::{FragmentParser, ParserOptions, UpdateKind};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

#[derive(Debug, Arbitrary)]
enum Payload {
    /// Any text at all: the parser must not panic and must stay balanced.
    Text(String),
    /// A serialized document: it must also complete exactly once.
    Document(ArbitraryValue),
}

#[derive(Debug, Arbitrary)]
struct Input {
    split_seed: u64,
    split_partial_strings: bool,
    payload: Payload,
}

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(m.into_iter().map(|(k, v)| (k, v.0)).collect::<Map<_, _>>())
            }
        };
        Ok(ArbitraryValue(value))
    }
}

fuzz_target!(|input: Input| run(input));

fn run(input: Input) {
    let (text, document) = match input.payload {
        Payload::Text(text) => (text, None),
        Payload::Document(value) => match serde_json::to_string(&value.0) {
            Ok(text) => (text, Some(value.0)),
            Err(_) => return,
        },
    };

    let mut parser = FragmentParser::with_options(
        "fuzz",
        ParserOptions {
            split_partial_strings: input.split_partial_strings,
        },
    );
    let mut open = 0usize;
    let mut completions = 0usize;
    for chunk in split_into_safe_chunks(&text, input.split_seed) {
        for update in parser.add_fragment(chunk) {
            match update.kind {
                UpdateKind::StartObject | UpdateKind::StartArray => open += 1,
                UpdateKind::EndObject | UpdateKind::EndArray => open -= 1,
                UpdateKind::DocumentComplete => completions += 1,
                _ => {}
            }
        }
        assert_eq!(open, parser.depth());
    }
    assert_eq!(parser.current_json(), text);

    // Bare numbers and literals stay pending until a delimiter arrives.
    if document.is_some_and(|v| v.is_object() || v.is_array()) {
        assert_eq!(completions, 1);
        assert_eq!(
            parser.parse_complete::<Value>().ok(),
            serde_json::from_str::<Value>(&text).ok()
        );
    }
}

/// Split a UTF-8 `&str` into boundary-safe chunks using a deterministic random
/// value to generate splits.
fn split_into_safe_chunks(serialized: &str, split_seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = serialized.len();
    let mut seed = split_seed;

    while start < len {
        let remaining = len - start;
        let mut size = usize::try_from(seed % remaining as u64).unwrap_or(0) + 1;
        while start + size < len && !serialized.is_char_boundary(start + size) {
            size += 1;
        }
        chunks.push(&serialized[start..start + size]);
        start += size;
        seed = seed.rotate_left(7) ^ 0x9e37_79b9_7f4a_7c15;
    }

    chunks
}
