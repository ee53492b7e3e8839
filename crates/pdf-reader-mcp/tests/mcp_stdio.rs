//! End-to-end tests driving the server binary over stdin/stdout.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("pdf-reader-mcp").unwrap()
}

/// Create a PDF with one text line per page and an /Info dictionary.
fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
    });

    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    for text in texts {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Quarterly Report"),
        "Author" => Object::string_literal("Jane Doe"),
        "CreationDate" => Object::string_literal("D:20240115103000Z"),
    });
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn write_pdf(texts: &[&str]) -> tempfile::NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    tmp.write_all(&pdf_with_pages(texts)).unwrap();
    tmp
}

fn tool_call(id: u64, name: &str, arguments: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments },
    })
    .to_string()
}

/// Feed `frames` to the server and collect its replies.
fn exchange(frames: &[String]) -> Vec<Value> {
    let input = frames.join("\n") + "\n";
    let output = cmd().write_stdin(input).output().unwrap();
    assert!(output.status.success(), "server exited with {:?}", output.status);
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn result_text(reply: &Value) -> &str {
    reply["result"]["content"][0]["text"].as_str().unwrap()
}

#[test]
fn help_lists_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--timeout-secs"))
        .stdout(predicate::str::contains("--max-file-size"))
        .stdout(predicate::str::contains("--log-level"));
}

#[test]
fn handshake_and_tool_listing() {
    let replies = exchange(&[
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#.to_string(),
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#.to_string(),
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#.to_string(),
    ]);
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["result"]["serverInfo"]["name"], "pdf-reader-mcp");

    let tools = replies[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 3);
    let search = tools.iter().find(|t| t["name"] == "search-pdf").unwrap();
    assert_eq!(search["inputSchema"]["required"], json!(["file", "query"]));
}

#[test]
fn metadata_of_generated_pdf() {
    let pdf = write_pdf(&["first", "second"]);
    let replies = exchange(&[tool_call(1, "pdf-metadata", json!({ "file": pdf.path() }))]);
    let text = result_text(&replies[0]);
    assert!(text.starts_with("PDF Metadata:"));
    assert!(text.contains("Pages: 2"));
    assert!(text.contains("Title: Quarterly Report"));
    assert!(text.contains("Author: Jane Doe"));
    assert!(text.contains("Subject: N/A"));
    assert!(text.contains("Creation Date: 2024-01-15T10:30:00+00:00"));
    assert!(text.contains("PDF Version: 1.5"));
}

#[test]
fn read_selected_page_without_metadata() {
    let pdf = write_pdf(&["Alpha page", "Beta page", "Gamma page"]);
    let replies = exchange(&[tool_call(
        1,
        "read-pdf",
        json!({ "file": pdf.path(), "pages": "2", "include_metadata": false }),
    )]);
    let text = result_text(&replies[0]);
    assert!(text.starts_with("Selected pages: 2 (of 3)"));
    assert!(text.contains("Beta page"));
    assert!(!text.contains("Alpha page"));
    assert!(!text.contains("PDF Metadata:"));
}

#[test]
fn search_counts_matching_lines() {
    let pdf = write_pdf(&["Hello World", "The quick brown fox", "Hello again"]);
    let replies = exchange(&[
        tool_call(1, "search-pdf", json!({ "file": pdf.path(), "query": "hello" })),
        tool_call(
            2,
            "search-pdf",
            json!({ "file": pdf.path(), "query": "hello", "case_sensitive": true }),
        ),
    ]);
    let text = result_text(&replies[0]);
    assert!(text.starts_with("Found 2 matches for \"hello\":"));
    assert!(text.contains("Hello World"));
    assert!(text.contains("Hello again"));

    assert_eq!(result_text(&replies[1]), "No matches found for \"hello\".");
}

#[test]
fn validation_and_io_errors_are_tool_results() {
    let replies = exchange(&[
        tool_call(1, "search-pdf", json!({ "file": "whatever.pdf" })),
        tool_call(2, "pdf-metadata", json!({ "file": "/definitely/not/here.pdf" })),
    ]);

    assert_eq!(replies[0]["result"]["isError"], true);
    assert!(result_text(&replies[0]).starts_with("ValidationError:"));
    assert!(result_text(&replies[0]).contains("query"));

    assert_eq!(replies[1]["result"]["isError"], true);
    assert!(result_text(&replies[1]).starts_with("IOError:"));
    assert!(result_text(&replies[1]).contains("/definitely/not/here.pdf"));
}

#[test]
fn non_pdf_file_is_parse_error() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(b"just some notes, not a PDF").unwrap();

    let replies = exchange(&[tool_call(1, "read-pdf", json!({ "file": tmp.path() }))]);
    assert_eq!(replies[0]["result"]["isError"], true);
    assert!(result_text(&replies[0]).starts_with("ParseError:"));
}

#[test]
fn oversized_file_is_refused() {
    let pdf = write_pdf(&["tiny"]);
    let input = tool_call(1, "pdf-metadata", json!({ "file": pdf.path() })) + "\n";
    cmd()
        .args(["--max-file-size", "16"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("limit is 16"));
}

#[test]
fn protocol_errors() {
    let replies = exchange(&[
        "{broken".to_string(),
        r#"{"jsonrpc":"2.0","id":9,"method":"prompts/list"}"#.to_string(),
    ]);
    assert_eq!(replies[0]["error"]["code"], -32700);
    assert!(replies[0]["id"].is_null());
    assert_eq!(replies[1]["error"]["code"], -32601);
    assert_eq!(replies[1]["id"], 9);
}

#[test]
fn logs_go_to_stderr_only() {
    cmd()
        .args(["--log-level", "info"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("pdf-reader-mcp starting"));
}

#[test]
fn non_utf8_frame_does_not_stop_the_server() {
    let mut input = vec![0xFF, 0xFE, b'\n'];
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
    input.push(b'\n');

    let output = cmd().write_stdin(input).output().unwrap();
    assert!(output.status.success());
    let replies: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["error"]["code"], -32700);
    assert_eq!(replies[1]["id"], 2);
}
