use json_codec::{ErrorKind, Value, parse, utf8};
use test_case::test_case;

#[test_case(b"" ; "empty")]
#[test_case(b"ascii text" ; "ascii")]
#[test_case(b"\x7F" ; "last one byte")]
#[test_case(b"\xDF\xBF" ; "last two byte")]
#[test_case(b"\xE0\xA0\x80" ; "first three byte")]
#[test_case(b"\xEF\xBF\xBF" ; "last three byte")]
#[test_case(b"\xF0\x90\x80\x80" ; "first four byte")]
#[test_case(b"\xF4\x8F\xBF\xBF" ; "last code point")]
fn test_accepts(bytes: &[u8]) {
    assert!(utf8::validate(bytes));
    assert!(Value::string_from_bytes(bytes).is_ok());

    let mut document = b"\"".to_vec();
    document.extend_from_slice(bytes);
    document.push(b'"');
    let value = parse(&document).unwrap();
    assert_eq!(Ok(bytes), value.string_value().map(str::as_bytes));
}

#[test_case(b"\xC2" ; "truncated two byte")]
#[test_case(b"\xE0\xA0" ; "truncated three byte")]
#[test_case(b"\xF0\x90\x80" ; "truncated four byte")]
#[test_case(b"\xC0\x80" ; "overlong nul")]
#[test_case(b"\xE0\x80\xAF" ; "overlong slash")]
#[test_case(b"\xED\xA0\x80" ; "high surrogate")]
#[test_case(b"\xED\xBF\xBF" ; "low surrogate")]
#[test_case(b"\xF4\x90\x80\x80" ; "above last code point")]
#[test_case(b"\x80" ; "lone continuation")]
#[test_case(b"\xFF" ; "invalid leading byte")]
fn test_rejects(bytes: &[u8]) {
    assert!(!utf8::validate(bytes));
    assert!(Value::string_from_bytes(bytes).is_err());

    let mut document = b"\"".to_vec();
    document.extend_from_slice(bytes);
    document.push(b'"');
    assert_eq!(Some(ErrorKind::ParseError), parse(&document).err().map(|x| x.kind()));
}
