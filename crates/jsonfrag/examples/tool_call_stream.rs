//! Streams the arguments of a `write_file` tool call the way an LLM provider
//! delivers them: a few characters at a time, cut at arbitrary points.
//!
//! While the fragments arrive the example
//!
//! - reads `path` as soon as its closing quote is in, before the document is
//!   valid JSON, and
//! - echoes the `contents` string to `stdout` piece by piece, so a UI could
//!   render the file while it is still being generated.
//!
//! Once the document completes, the arguments are deserialized into a typed
//! struct.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonfrag --example tool_call_stream
//! ```

#![allow(clippy::needless_raw_string_hashes)]

use jsonfrag::{FragmentParser, UpdateKind};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WriteFile {
    path: String,
    contents: String,
    overwrite: bool,
}

fn main() {
    // In real life this would come from the network.
    let simulated_stream: [&str; 9] = [
        r#"{"pa"#,
        r#"th":"src/ma"#,
        r#"in.rs","cont"#,
        r#"ents":"fn main() {\n"#,
        r#"    println!(\"hel"#,
        r#"lo\");\n"#,
        r#"}\"#,
        r#"n","overwrite":tr"#,
        r#"ue}"#,
    ];

    let mut parser = FragmentParser::new("write_file");
    let mut announced = false;

    for fragment in simulated_stream {
        for update in parser.add_fragment(fragment) {
            match update.kind {
                UpdateKind::StartString if update.path == "root.contents" => {
                    println!("--- contents ---");
                }
                // Partial text is raw JSON: escapes arrive undecoded and may
                // be cut in half at a fragment boundary.
                UpdateKind::PartialString if update.path == "root.contents" => {
                    print!("{}", update.text.unwrap_or_default());
                }
                UpdateKind::CompleteString if update.path == "root.contents" => {
                    println!("\n--- end ---");
                }
                UpdateKind::DocumentComplete => println!("document complete"),
                _ => {}
            }
        }

        if !announced {
            if let Some(path) = parser.try_extract_property::<String>("path") {
                println!("writing {path}");
                announced = true;
            }
        }
    }

    match parser.parse_complete::<WriteFile>() {
        Ok(args) => println!(
            "{} bytes to {} (overwrite: {})",
            args.contents.len(),
            args.path,
            args.overwrite
        ),
        Err(err) => eprintln!("tool call arguments unusable: {err}"),
    }
}
