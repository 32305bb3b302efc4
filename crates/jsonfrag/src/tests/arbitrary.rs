use quickcheck::{Arbitrary, Gen};

use crate::{Map, Value};

/// Numbers with a short, exact decimal form, so rendering and re-parsing them
/// is lossless.
fn exact_number(g: &mut Gen) -> f64 {
    f64::from(i16::arbitrary(g)) / 8.0
}

fn scalar(g: &mut Gen) -> Value {
    match usize::arbitrary(g) % 4 {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::Number(exact_number(g)),
        _ => Value::String(String::arbitrary(g)),
    }
}

fn value_at_depth(g: &mut Gen, depth: usize) -> Value {
    if depth == 0 {
        return scalar(g);
    }
    match usize::arbitrary(g) % 6 {
        0..=3 => scalar(g),
        4 => {
            let len = usize::arbitrary(g) % 4;
            Value::Array((0..len).map(|_| value_at_depth(g, depth - 1)).collect())
        }
        _ => {
            let len = usize::arbitrary(g) % 4;
            let mut map = Map::new();
            for _ in 0..len {
                map.insert(String::arbitrary(g), value_at_depth(g, depth - 1));
            }
            Value::Object(map)
        }
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        value_at_depth(g, depth)
    }
}

/// A document whose top level is an object or an array, as tool-call
/// arguments always are.
#[derive(Debug, Clone)]
pub(crate) struct Document(pub(crate) Value);

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = 1 + usize::arbitrary(g) % 3;
        let len = usize::arbitrary(g) % 5;
        if bool::arbitrary(g) {
            let mut map = Map::new();
            for _ in 0..len {
                map.insert(String::arbitrary(g), value_at_depth(g, depth - 1));
            }
            Document(Value::Object(map))
        } else {
            Document(Value::Array(
                (0..len).map(|_| value_at_depth(g, depth - 1)).collect(),
            ))
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match &self.0 {
            Value::Array(items) => Box::new(
                items
                    .shrink()
                    .map(|items| Document(Value::Array(items))),
            ),
            Value::Object(map) => {
                let entries: Vec<(String, Value)> =
                    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                Box::new((0..entries.len()).map(move |skip| {
                    let mut map = Map::new();
                    for (i, (k, v)) in entries.iter().enumerate() {
                        if i != skip {
                            map.insert(k.clone(), v.clone());
                        }
                    }
                    Document(Value::Object(map))
                }))
            }
            _ => quickcheck::empty_shrinker(),
        }
    }
}

#[test]
fn documents_render_as_valid_json() {
    let mut g = Gen::new(16);
    for _ in 0..200 {
        let Document(value) = Document::arbitrary(&mut g);
        let text = value.to_string();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, value, "{text}");
    }
}
