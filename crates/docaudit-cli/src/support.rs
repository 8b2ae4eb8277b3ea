use serde_json::Value;
use std::fmt::Display;

pub const REPORT_TAG: &str = "[docaudit]";

/// Root-level and usage failures exit with 2; property failures use 1.
pub fn exit_with_error(err: impl Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(2);
}

pub fn print_json(payload: &Value, label: &str) {
    match serde_json::to_string_pretty(payload) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => exit_with_error(format!("failed to render {label} payload: {err}")),
    }
}
