//! `docaudit inspect`: the attributes the properties see in one document.

use crate::support::{REPORT_TAG, exit_with_error, print_json};
use docaudit_kernel::fs_view::resolve;
use docaudit_kernel::patterns::{check_date, is_measurable};
use docaudit_kernel::{AuditPolicy, Document, FileSystemView, Link, OsFileSystem, ReadState};
use serde_json::{Value, json};

const INSPECT_KIND: &str = "docaudit.inspect.v1";

pub fn run(file: String, root: String, json_output: bool) {
    let fs = OsFileSystem::new(&root).unwrap_or_else(|err| exit_with_error(err));
    let path = resolve("", &file.replace('\\', "/"));
    let doc = Document::load(&fs, &path);
    match doc.state() {
        ReadState::Missing => exit_with_error(format!("document not found: {path}")),
        ReadState::Unreadable(reason) => exit_with_error(reason),
        ReadState::Present => {}
    }

    let policy = AuditPolicy::default();
    let payload = inspection(&fs, &policy, &doc);
    if json_output {
        print_json(&payload, "inspection");
    } else {
        print_text(&doc, &payload);
    }
}

fn link_entry(fs: &dyn FileSystemView, link: &Link) -> Value {
    let mut entry = json!(link);
    if let (Some(resolved), Some(object)) = (link.resolved(), entry.as_object_mut()) {
        object.insert("exists".to_string(), Value::Bool(fs.exists(resolved)));
    }
    entry
}

fn inspection(fs: &dyn FileSystemView, policy: &AuditPolicy, doc: &Document) -> Value {
    let header = doc.header_fields(&policy.header_fields, policy.header_probe_lines);
    let scenarios: Vec<Value> = doc
        .scenarios()
        .iter()
        .map(|scenario| {
            json!({
                "title": scenario.title,
                "line": scenario.line,
                "responseMeasure": scenario.response_measure,
                "measurable": is_measurable(&scenario.response_measure),
            })
        })
        .collect();
    let dates: Vec<Value> = doc
        .dates()
        .iter()
        .map(|field| {
            json!({
                "line": field.line,
                "raw": field.raw,
                "source": field.source,
                "issue": check_date(&field.raw, &policy.dates).err().map(|issue| issue.to_string()),
            })
        })
        .collect();
    json!({
        "schema": 1,
        "inspectKind": INSPECT_KIND,
        "path": doc.path(),
        "chars": doc.char_len(),
        "sections": doc.sections(),
        "headerFields": header,
        "links": doc.links().iter().map(|link| link_entry(fs, link)).collect::<Vec<_>>(),
        "images": doc.images().iter().map(|image| link_entry(fs, image)).collect::<Vec<_>>(),
        "relatedLinks": doc.related_links().len(),
        "scenarios": scenarios,
        "dates": dates,
        "placeholders": policy.placeholders.scan(doc.text()),
    })
}

fn print_text(doc: &Document, payload: &Value) {
    println!("{REPORT_TAG} {} ({} chars)", doc.path(), doc.char_len());
    println!("sections: {}", doc.sections().join(" | "));

    let missing_header: Vec<&str> = payload["headerFields"]["present"]
        .as_object()
        .map(|present| {
            present
                .iter()
                .filter(|(_, found)| !found.as_bool().unwrap_or(false))
                .map(|(field, _)| field.as_str())
                .collect()
        })
        .unwrap_or_default();
    if missing_header.is_empty() {
        println!("header: complete");
    } else {
        println!("header: missing {}", missing_header.join(", "));
    }

    for (label, key) in [("link", "links"), ("image", "images")] {
        for entry in payload[key].as_array().into_iter().flatten() {
            let state = match entry["exists"].as_bool() {
                Some(true) => "ok",
                Some(false) => "missing",
                None => entry["kind"].as_str().unwrap_or("external"),
            };
            println!(
                "{label} line {}: {} [{state}]",
                entry["line"], entry["target"].as_str().unwrap_or_default()
            );
        }
    }
    println!("related documentation links: {}", payload["relatedLinks"]);

    for scenario in payload["scenarios"].as_array().into_iter().flatten() {
        let measurable = scenario["measurable"].as_bool().unwrap_or(false);
        println!(
            "scenario line {}: {} [{}]",
            scenario["line"],
            scenario["title"].as_str().unwrap_or_default(),
            if measurable { "measurable" } else { "unmeasurable" }
        );
    }
    for date in payload["dates"].as_array().into_iter().flatten() {
        println!(
            "date line {}: {} [{}]",
            date["line"],
            date["raw"].as_str().unwrap_or_default(),
            date["issue"].as_str().unwrap_or("ok")
        );
    }
    for hit in payload["placeholders"].as_array().into_iter().flatten() {
        println!(
            "placeholder line {}: {}",
            hit["line"],
            hit["matched"].as_str().unwrap_or_default()
        );
    }
}
