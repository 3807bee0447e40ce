use std::{iter, slice};

use indexmap::map;
use log::trace;

use crate::{
    options::SerializeOptions,
    utf8,
    value::{Value, write_json_number},
};

/// Renders `value` as JSON text.
///
/// Compact output separates elements with `", "` and keys from values with
/// `": "`. Pretty output puts every element on its own line, indented by
/// `indent` spaces per level, and separates keys from values with `" : "`.
/// Empty arrays and objects are always written as `[]` and `{}`.
///
/// Numbers that cannot be represented in JSON (NaN and the infinities) are
/// written as `null`.
pub fn serialize(value: &Value, pretty: bool, indent: usize) -> String {
    serialize_with_options(value, SerializeOptions { pretty, indent })
}

pub fn serialize_with_options(value: &Value, options: SerializeOptions) -> String {
    trace!(
        "serializing {} (pretty: {}, indent: {})",
        value.json_type(),
        options.pretty,
        options.indent
    );

    let mut serializer = Serializer {
        out: String::new(),
        options,
        stack: Vec::new(),
    };
    serializer.run(value);

    serializer.out
}

pub fn to_string_compact(value: &Value) -> String {
    serialize_with_options(value, SerializeOptions::compact())
}

/// Pretty output with the default indent of two spaces.
pub fn to_string_pretty(value: &Value) -> String {
    serialize_with_options(value, SerializeOptions::pretty(SerializeOptions::DEFAULT_INDENT))
}

enum Elements<'a> {
    Array(slice::Iter<'a, Value>),
    Object(map::Iter<'a, String, Value>),
}

// One open, non-empty container
struct Frame<'a> {
    elements: Elements<'a>,
    started: bool,
}

struct Serializer<'a> {
    out: String,
    options: SerializeOptions,
    // Nesting is tracked here instead of on the call stack. A frame's index
    // is its nesting level.
    stack: Vec<Frame<'a>>,
}

impl<'a> Serializer<'a> {
    fn run(&mut self, root: &'a Value) {
        self.value(root);

        while let Some(frame) = self.stack.last_mut() {
            let started = std::mem::replace(&mut frame.started, true);
            let next = match &mut frame.elements {
                Elements::Array(items) => items.next().map(|item| (None, item)),
                Elements::Object(members) => members.next().map(|(key, value)| (Some(key), value)),
            };

            let Some((key, value)) = next else {
                self.close();
                continue;
            };

            if started {
                self.out.push(',');
                if !self.options.pretty {
                    self.out.push(' ');
                }
            }
            self.newline(self.stack.len());

            if let Some(key) = key {
                utf8::escape_into(&mut self.out, key);
                self.out.push_str(if self.options.pretty { " : " } else { ": " });
            }
            self.value(value);
        }
    }

    fn value(&mut self, value: &'a Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Boolean(value) => self.out.push_str(if *value { "true" } else { "false" }),
            Value::Number(value) => write_json_number(&mut self.out, *value),
            Value::String(value) => utf8::escape_into(&mut self.out, value),
            Value::Array(array) if array.is_empty() => self.out.push_str("[]"),
            Value::Array(array) => self.open('[', Elements::Array(array.iter())),
            Value::Object(object) if object.is_empty() => self.out.push_str("{}"),
            Value::Object(object) => self.open('{', Elements::Object(object.iter())),
        }
    }

    fn open(&mut self, bracket: char, elements: Elements<'a>) {
        self.out.push(bracket);
        self.stack.push(Frame {
            elements,
            started: false,
        });
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        // Frames are never empty, so there is always a line to end
        self.newline(self.stack.len());
        self.out.push(match frame.elements {
            Elements::Array(_) => ']',
            Elements::Object(_) => '}',
        });
    }

    fn newline(&mut self, level: usize) {
        if self.options.pretty {
            self.out.push('\n');
            self.out.extend(iter::repeat_n(' ', level * self.options.indent));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Array, Object};

    fn sample() -> Value {
        let mut scores = Array::new();
        scores.push_back(95);
        scores.push_back(87.5);
        scores.push_back(92);

        let mut address = Object::new();
        address.set("city", "Springfield");

        let mut object = Object::new();
        object.set("name", "John Doe");
        object.set("age", 30);
        object.set("is_active", true);
        object.set("nickname", Value::null());
        object.set("scores", scores);
        object.set("address", address);
        object.set("tags", Array::new());
        Value::Object(object)
    }

    #[test]
    fn test_scalars() {
        let cases = vec![
            (Value::null(), "null"),
            (Value::boolean(true), "true"),
            (Value::boolean(false), "false"),
            (Value::number(42.0), "42"),
            (Value::number(-0.0), "0"),
            (Value::number(87.5), "87.5"),
            (Value::number(1e21), "1000000000000000000000"),
            (Value::number(f64::NAN), "null"),
            (Value::string("plain"), r#""plain""#),
            (Value::string("quote \" and \\"), r#""quote \" and \\""#),
            (Value::string("\u{1}\t"), r#""\u0001\t""#),
            (Value::string("é😄"), "\"é😄\""),
        ];

        for (value, expected) in cases {
            assert_eq!(expected, serialize(&value, false, 2));
            // Pretty printing only affects containers
            assert_eq!(expected, serialize(&value, true, 2));
        }
    }

    #[test]
    fn test_compact() {
        assert_eq!(
            r#"{"name": "John Doe", "age": 30, "is_active": true, "nickname": null, "scores": [95, 87.5, 92], "address": {"city": "Springfield"}, "tags": []}"#,
            to_string_compact(&sample())
        );
    }

    #[test]
    fn test_pretty() {
        let expected = [
            "{",
            r#"  "name" : "John Doe","#,
            r#"  "age" : 30,"#,
            r#"  "is_active" : true,"#,
            r#"  "nickname" : null,"#,
            r#"  "scores" : ["#,
            "    95,",
            "    87.5,",
            "    92",
            "  ],",
            r#"  "address" : {"#,
            r#"    "city" : "Springfield""#,
            "  },",
            r#"  "tags" : []"#,
            "}",
        ]
        .join("\n");

        assert_eq!(expected, to_string_pretty(&sample()));
    }

    #[test]
    fn test_pretty_indent_widths() {
        let value = Value::from(vec![Value::from(vec![Value::null()])]);
        let cases = vec![
            (0, "[\n[\nnull\n]\n]"),
            (1, "[\n [\n  null\n ]\n]"),
            (4, "[\n    [\n        null\n    ]\n]"),
        ];

        for (indent, expected) in cases {
            assert_eq!(expected, serialize(&value, true, indent));
        }
    }

    #[test]
    fn test_empty_containers() {
        let cases = vec![(Value::array(), "[]"), (Value::object(), "{}")];
        for (value, expected) in cases {
            assert_eq!(expected, serialize(&value, false, 2));
            assert_eq!(expected, serialize(&value, true, 2));
        }

        let nested = Value::from(vec![Value::array(), Value::object()]);
        assert_eq!("[[], {}]", to_string_compact(&nested));
        assert_eq!("[\n  [],\n  {}\n]", to_string_pretty(&nested));
    }

    #[test]
    fn test_escaped_keys() {
        let object: Object = [("line\nbreak", 1), ("quote\"", 2)].into_iter().collect();
        assert_eq!(
            r#"{"line\nbreak": 1, "quote\"": 2}"#,
            to_string_compact(&Value::Object(object))
        );
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        const DEPTH: usize = 10_000;

        // Building and dropping the tree still recurse, so give them room
        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024 * 1024)
            .spawn(|| {
                let mut value = Value::array();
                for _ in 0..DEPTH {
                    let mut parent = Array::new();
                    parent.push_back(value);
                    value = Value::Array(parent);
                }

                let compact = to_string_compact(&value);
                let pretty = to_string_pretty(&value);
                (compact, pretty)
            })
            .unwrap();
        let (compact, pretty) = handle.join().unwrap();

        let expected = format!("{}[]{}", "[".repeat(DEPTH), "]".repeat(DEPTH));
        assert_eq!(expected, compact);
        assert!(pretty.ends_with("\n  ]\n]"));
        assert_eq!(DEPTH * 2 + 1, pretty.lines().count());
    }
}
