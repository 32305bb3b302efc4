#![allow(missing_docs, dead_code)]

/// Arguments of a `create_issue` tool call, as a provider would stream them.
/// Cuts land mid-key, mid-string, mid-escape, mid-number and mid-literal.
#[rustfmt::skip]
pub const STREAM: [&str; 12] = [
    r#"{"ti"#,                          // mid-key
    r#"tle":"Crash on "#,               // mid-string
    r#"start\"#,                        // mid-escape
    r#"nup","labels":["bug","#,         // array of strings
    r#""p1"],"priority":"#,             // dangling colon
    r#"2"#,                             // number, not yet terminated
    r#"5,"assignee":nu"#,               // number ends, literal starts
    r#"ll,"draft":fal"#,                // mid-literal
    r#"se,"meta":{"source":"cli","#,    // nested object
    r#""attempts":[1,2.5e1]"#,          // nested array with exponent
    r#"}"#,                             // closes meta
    r#"}"#,                             // closes the document
];

/// Typed view of the streamed arguments.
#[derive(Debug, PartialEq, serde::Deserialize)]
pub struct CreateIssue {
    pub title: String,
    pub labels: Vec<String>,
    pub priority: u32,
    pub assignee: Option<String>,
    pub draft: bool,
    pub meta: Meta,
}

#[derive(Debug, PartialEq, serde::Deserialize)]
pub struct Meta {
    pub source: String,
    pub attempts: Vec<f64>,
}
