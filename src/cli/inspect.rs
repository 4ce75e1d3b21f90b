//! Inspection commands: `tokenize` and `scan`.
//!
//! Both read one document and print JSON to stdout.

use anyhow::Result;
use serde::Serialize;

use super::common::{plural_count, read_input, to_json, write_output};
use crate::cli::args::InspectArgs;
use crate::filter::{MedialFilter, ScanEntry, tokenize};
use crate::log;
use crate::render::EmbedRenderer;

/// Execute tokenize command
pub fn run_tokenize(args: &InspectArgs) -> Result<()> {
    let text = read_input(args.path.as_deref())?;
    let fragments = tokenize(&text);
    write_output(None, &to_json(&fragments, args.pretty)?)
}

/// Scan report for one document.
#[derive(Debug, Serialize)]
struct ScanReport<'a> {
    fragments: usize,
    links: Vec<ScanEntry<'a>>,
}

/// Execute scan command
pub fn run_scan<R: EmbedRenderer>(args: &InspectArgs, filter: &MedialFilter<R>) -> Result<()> {
    let text = read_input(args.path.as_deref())?;
    let report = scan_report(&text, filter);

    log!("scan"; "found {}", plural_count(report.links.len(), "launch link"));
    write_output(None, &to_json(&report, args.pretty)?)
}

fn scan_report<'a, R: EmbedRenderer>(text: &'a str, filter: &MedialFilter<R>) -> ScanReport<'a> {
    let fragments = tokenize(text);
    ScanReport {
        fragments: fragments.len(),
        links: filter.scan(&fragments),
    }
}
