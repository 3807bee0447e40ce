//! A JSON codec: a typed value tree, a parser that builds it from UTF-8 text
//! and a serializer that renders it back.
//!
//! ```
//! use json_codec::{Object, Value};
//!
//! let mut user = Object::new();
//! user.set("name", "Jane");
//! user.set("age", 32);
//!
//! let text = json_codec::serialize(&Value::Object(user), false, 2);
//! assert_eq!(r#"{"name": "Jane", "age": 32}"#, text);
//!
//! let parsed = json_codec::parse(&text).unwrap();
//! assert_eq!(Ok(32.0), parsed.object_value().unwrap().try_get("age").unwrap().number_value());
//! ```
//!
//! Containers share their storage between clones and copy it on the first
//! write, so a value tree can never contain a cycle.

pub mod error;
mod options;
mod parser;
mod scanner;
mod serializer;
mod token;
pub mod utf8;
mod value;

pub use error::{Error, ErrorKind, EscapeError, Result, ValueError};
pub use options::{ParseOptions, SerializeOptions};
pub use parser::{ParseError, ParseErrorReason, parse, parse_with_options};
pub use serializer::{serialize, serialize_with_options, to_string_compact, to_string_pretty};
pub use token::TokenKind;
pub use value::{Array, JsonString, JsonType, NUMBER_TOLERANCE, Object, Value};
