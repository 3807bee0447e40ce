use json_codec::{Array, Object, Value};
use log::info;

const BOOK: &str = r#"{
    "title": "Book",
    "author": "Author Name",
    "year": 2023,
    "tags": ["fiction", "adventure"]
}"#;

fn main() -> json_codec::Result<()> {
    env_logger::init();

    println!("1. Building values:");
    let mut scores = Array::new();
    for score in [1, 2, 3] {
        scores.push_back(score);
    }

    let mut user = Object::new();
    user.set("name", "John Doe");
    user.set("age", 30);
    user.set("is_active", true);
    user.set("null_value", Value::null());
    user.set("scores", scores);
    let user = Value::Object(user);
    println!("{}\n", json_codec::to_string_pretty(&user));

    println!("2. Parsing:");
    let book = json_codec::parse(BOOK)?;
    println!("{}", json_codec::to_string_pretty(&book));

    let book = book.object_value()?;
    let title = book.try_get("title")?.string_value()?;
    let year = book.try_get("year")?.integer_value()?;
    let tags = book.try_get("tags")?.array_value()?;
    info!("book has {} members", book.size());
    println!("{title} ({year}), {} tags\n", tags.size());

    println!("3. Compact output:");
    let mut message = Object::new();
    message.set("message", "Hello from Rust!");
    message.set("version", 1.0);
    println!("{}\n", json_codec::serialize(&Value::Object(message), false, 0));

    println!("4. Error handling:");
    match json_codec::parse(r#"{"invalid": json}"#) {
        Ok(value) => println!("unexpectedly parsed {value}"),
        Err(err) => println!("{}: {err} ('{}')", err.kind(), err.lexeme),
    }

    Ok(())
}
