// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations. Each returns `Err(message)` for the caller
//! to print; none of them exit the process themselves.

use serde::Serialize;

use shimdb::{
    known_tags, snapshot, tag_from_name, verify, Database, LoadOptions, NodeValue, SdbHeader,
    TagId, TagNode, TagType, VerificationReport, MAX_TREE_DEPTH,
};

use super::display::*;

fn load(path: &str, options: &LoadOptions) -> Result<Database, String> {
    Database::open_with(path, options).map_err(|e| format!("{}: {}", path, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize: {}", e))
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct InspectOutput<'a> {
    file: &'a str,
    size: usize,
    checksum: u32,
    header: Option<SdbHeader>,
    string_table: Option<TagId>,
    tree: Vec<TagNode>,
}

pub fn run_inspect(path: &str, json: bool, depth: usize, strict: bool) -> Result<(), String> {
    let mut options = LoadOptions::new();
    if strict {
        options = options.with_header_check();
    }
    let db = load(path, &options)?;
    let tree = snapshot(&db, TagId::NULL, depth);

    if json {
        let output = InspectOutput {
            file: path,
            size: db.len(),
            checksum: db.checksum(),
            header: db.header(),
            string_table: db.string_table(),
            tree,
        };
        println!("{}", to_json(&output)?);
        return Ok(());
    }

    section_top("SHIM DATABASE");
    row(&format!("  File          {}", truncate(path, BOX_WIDTH - 16)));
    row(&format!("  Size          {}", format_size(db.len())));
    if let Some(header) = db.header() {
        row(&format!(
            "  Version       {}.{}",
            header.major_version, header.minor_version
        ));
        row(&format!(
            "  Magic         {}",
            status(
                header.has_valid_magic(),
                &String::from_utf8_lossy(&header.magic)
            )
        ));
    }
    row(&format!("  CRC32         {:08x}", db.checksum()));
    row(&format!(
        "  String table  {}",
        db.string_table()
            .map_or_else(|| paint(Role::Muted, &[], "none"), |id| id.to_string())
    ));
    section_bot();

    section_top("TAGS");
    if tree.is_empty() {
        row(&paint(Role::Muted, &[DIM], "  (no records)"));
    }
    for node in &tree {
        print_node(node, 0);
    }
    section_bot();
    Ok(())
}

fn print_node(node: &TagNode, level: usize) {
    let indent = "  ".repeat(level);
    let head = format!("{:>8}  {}{}", node.id.to_string(), indent, node.name);
    let value = node.value.as_ref().map(render_value).unwrap_or_default();
    let line = truncate(&format!("{}  {}", head, value), BOX_WIDTH - 12);
    let pad = (BOX_WIDTH - 12).saturating_sub(visible_len(&line));
    row(&format!("{}{} {}", line, " ".repeat(pad), type_badge(node.kind)));
    for child in &node.children {
        print_node(child, level + 1);
    }
}

fn render_value(value: &NodeValue) -> String {
    match value {
        NodeValue::Integer(n) => format!("{} (0x{:X})", n, n),
        NodeValue::Text(text) => format!("\"{}\"", text.trim_end_matches('\0')),
        NodeValue::StringRef {
            resolved: Some(text),
            ..
        } => format!("-> \"{}\"", text),
        NodeValue::StringRef {
            offset,
            resolved: None,
        } => format!("-> 0x{:X} (unresolved)", offset),
        NodeValue::Binary { len, preview } => format!("[{} bytes] {}", len, preview),
        NodeValue::List { content_len } => format!("({} bytes)", content_len),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// VERIFY
// ═══════════════════════════════════════════════════════════════════════════

pub fn run_verify(path: &str, json: bool) -> Result<(), String> {
    let db = load(path, &LoadOptions::new())?;
    let report = verify(&db);

    if json {
        println!("{}", to_json(&report)?);
    } else {
        print_report(path, &report);
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(format!("{} structural issue(s) found", report.issues.len()))
    }
}

fn print_report(path: &str, report: &VerificationReport) {
    section_top("VERIFY");
    row(&format!("  File       {}", truncate(path, BOX_WIDTH - 13)));
    row(&format!("  Records    {}", report.records));
    row(&format!("  Lists      {}", report.lists));
    row(&format!("  StringRefs {}", report.string_refs));
    row(&format!("  Max depth  {}", report.max_depth));
    row("");
    if report.is_clean() {
        row(&format!("  {}", status(true, "structure is consistent")));
    } else {
        row(&format!(
            "  {}",
            status(false, &format!("{} issue(s)", report.issues.len()))
        ));
        for issue in &report.issues {
            row(&format!("    {}", truncate(&issue.to_string(), BOX_WIDTH - 4)));
        }
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// FIND
// ═══════════════════════════════════════════════════════════════════════════

pub fn run_find(path: &str, tag_name: &str) -> Result<(), String> {
    let tag = tag_from_name(tag_name).ok_or_else(|| format!("Unknown tag: {}", tag_name))?;
    let db = load(path, &LoadOptions::new())?;

    let tree = snapshot(&db, TagId::NULL, MAX_TREE_DEPTH);
    let mut hits = Vec::new();
    collect_matches(&tree, tag, &mut hits);

    for node in &hits {
        let value = node.value.as_ref().map(render_value).unwrap_or_default();
        println!("{:>8}  {}  {}", node.id.to_string(), node.name, value);
    }
    if hits.is_empty() {
        eprintln!("No {} records", shimdb::tag_name(tag));
    }
    Ok(())
}

fn collect_matches<'a>(nodes: &'a [TagNode], tag: shimdb::Tag, out: &mut Vec<&'a TagNode>) {
    for node in nodes {
        if node.tag == tag {
            out.push(node);
        }
        collect_matches(&node.children, tag, out);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TAGS
// ═══════════════════════════════════════════════════════════════════════════

pub fn run_tags() -> Result<(), String> {
    for &(code, name) in known_tags() {
        println!("0x{:04X}  {}  {}", code, type_badge(TagType::of(code)), name);
    }
    Ok(())
}
