//! Documentation block extraction and record parsing.
//!
//! `parse_source` walks raw source text and collects `/*** … */` blocks;
//! `parse_block` turns one block into a typed record by dispatching on the
//! header tag of its first line. Malformed input never fails: unknown lines
//! are skipped, missing fields stay unset, and blocks reducing to an empty
//! title produce no record.

use crate::marker;
use crate::model::{Detail, DocKind, DocRecord, ParamDoc};

/// Scan source text for documentation blocks and parse each into a record.
///
/// Lines are stripped before any marker matching. The block-start and
/// block-end lines are not part of the block handed to [`parse_block`].
pub fn parse_source(input: &str) -> Vec<DocRecord> {
    let mut records = Vec::new();
    let mut in_block = false;
    let mut block: Vec<String> = Vec::new();

    for raw in input.lines() {
        let line = raw.trim();

        if line.starts_with(marker::BLOCK_START) {
            in_block = true;
            continue;
        }
        if line.starts_with(marker::BLOCK_END) {
            if let Some(record) = parse_block(&block) {
                records.push(record);
            }
            block.clear();
            in_block = false;
            continue;
        }
        if in_block {
            block.push(line.to_string());
        }
    }

    records
}

/// Parse one comment block (stripped lines, block-end excluded).
///
/// The first line either carries a header tag naming the record kind, or
/// opens a plain function block whose title follows the `*` marker.
pub fn parse_block(lines: &[String]) -> Option<DocRecord> {
    let first = lines.first()?;

    for (tag, kind) in marker::HEADER_KINDS {
        if first.starts_with(tag) {
            let title = marker::value(tag, first);
            return finish(parse_tagged(title, kind, lines));
        }
    }

    let title = first.get(1..).unwrap_or("").trim().to_string();
    if title.is_empty() {
        return None;
    }
    finish(parse_callable(title, DocKind::Function, &lines[1..]))
}

/// Records whose final title came up empty are discarded.
fn finish(record: DocRecord) -> Option<DocRecord> {
    if record.title.is_empty() {
        None
    } else {
        Some(record)
    }
}

fn parse_tagged(title: String, kind: DocKind, lines: &[String]) -> DocRecord {
    match kind {
        DocKind::Function | DocKind::Method | DocKind::Constructor => {
            parse_callable(title, kind, lines)
        }
        DocKind::Enum => parse_enum(title, lines),
        DocKind::Constant | DocKind::Field | DocKind::ClassField => {
            parse_value(title, kind, lines)
        }
        DocKind::GlobalVar => parse_plain(title, kind, lines),
    }
}

/// Outcome of matching the sub-tags every kind shares.
enum Common {
    Desc { text: String, consumed: usize },
    Namespace(String),
}

fn parse_common(lines: &[String], i: usize) -> Option<Common> {
    let line = &lines[i];
    if line.starts_with(marker::DESC) {
        let (text, consumed) = marker::value_multiline(marker::DESC, lines, i);
        return Some(Common::Desc { text, consumed });
    }
    if line.starts_with(marker::NAMESPACE) {
        return Some(Common::Namespace(marker::value(marker::NAMESPACE, line)));
    }
    None
}

fn apply_common(
    common: Common,
    description: &mut Option<String>,
    namespace: &mut Option<String>,
) -> usize {
    match common {
        Common::Desc { text, consumed } => {
            *description = Some(text);
            consumed
        }
        Common::Namespace(ns) => {
            *namespace = Some(ns);
            1
        }
    }
}

fn parse_callable(title: String, kind: DocKind, lines: &[String]) -> DocRecord {
    let mut description = None;
    let mut namespace = None;
    let mut params = Vec::new();
    let mut returns = None;

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if line.starts_with(marker::BLOCK_END) {
            break;
        }
        // \paramOpt shares the \param prefix; test it first.
        i += if let Some(common) = parse_common(lines, i) {
            apply_common(common, &mut description, &mut namespace)
        } else if line.starts_with(marker::PARAM_OPT) {
            let (label, consumed) = marker::value_multiline(marker::PARAM_OPT, lines, i);
            params.push(ParamDoc {
                label,
                optional: true,
            });
            consumed
        } else if line.starts_with(marker::PARAM) {
            let (label, consumed) = marker::value_multiline(marker::PARAM, lines, i);
            params.push(ParamDoc {
                label,
                optional: false,
            });
            consumed
        } else if line.starts_with(marker::RETURN) {
            let (text, consumed) = marker::value_multiline(marker::RETURN, lines, i);
            returns = Some(text);
            consumed
        } else {
            1
        };
    }

    let mut record = DocRecord {
        kind,
        title,
        description,
        namespace,
        detail: Detail::Callable { params, returns },
    };

    // Constructors have no name of their own; they are titled after the
    // namespace they construct.
    if kind == DocKind::Constructor {
        if let Some(ns) = record.namespace.clone() {
            record.title = ns;
        }
    }

    record
}

fn parse_enum(title: String, lines: &[String]) -> DocRecord {
    let mut description = None;
    let mut namespace = None;

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if line.starts_with(marker::BLOCK_END) {
            break;
        }
        i += match parse_common(lines, i) {
            Some(common) => apply_common(common, &mut description, &mut namespace),
            None => 1,
        };
    }

    let prefix = title
        .find('_')
        .map(|pos| format!("{}*", &title[..=pos]));

    DocRecord {
        kind: DocKind::Enum,
        title,
        description,
        namespace,
        detail: Detail::Enum { prefix },
    }
}

fn parse_value(title: String, kind: DocKind, lines: &[String]) -> DocRecord {
    let mut description = None;
    let mut namespace = None;
    let mut value_type = None;
    let mut default_value = None;

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if line.starts_with(marker::BLOCK_END) {
            break;
        }
        i += if let Some(common) = parse_common(lines, i) {
            apply_common(common, &mut description, &mut namespace)
        } else if line.starts_with(marker::TYPE) {
            value_type = Some(marker::value(marker::TYPE, line));
            1
        } else if kind.is_field() && line.starts_with(marker::DEFAULT) {
            default_value = Some(marker::value(marker::DEFAULT, line));
            1
        } else {
            1
        };
    }

    DocRecord {
        kind,
        title,
        description,
        namespace,
        detail: Detail::Value {
            value_type,
            default_value,
        },
    }
}

fn parse_plain(title: String, kind: DocKind, lines: &[String]) -> DocRecord {
    let mut description = None;
    let mut namespace = None;

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if line.starts_with(marker::BLOCK_END) {
            break;
        }
        i += match parse_common(lines, i) {
            Some(common) => apply_common(common, &mut description, &mut namespace),
            None => 1,
        };
    }

    DocRecord {
        kind,
        title,
        description,
        namespace,
        detail: Detail::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn source_scan_collects_blocks() {
        let input = r#"
#include "Math.h"

/***
* Math_Abs
* \desc Returns the absolute value.
* \ns Math
*/
VMValue Math_Abs(int argCount, VMValue* args) {
    return args[0];
}

/***
* \method Update
* \ns Entity
*/
"#;
        let records = parse_source(input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, DocKind::Function);
        assert_eq!(records[0].title, "Math_Abs");
        assert_eq!(records[1].kind, DocKind::Method);
        assert_eq!(records[1].title, "Update");
    }

    #[test]
    fn source_scan_ignores_plain_comments() {
        let input = "/* not a doc block */\nint x;\n// also not\n";
        assert!(parse_source(input).is_empty());
    }

    #[test]
    fn header_tags_dispatch_to_kinds() {
        let cases = [
            ("* \\method Update", DocKind::Method, "Update"),
            ("* \\constructor Entity", DocKind::Constructor, "Entity"),
            ("* \\field X", DocKind::Field, "X"),
            ("* \\classfield Count", DocKind::ClassField, "Count"),
            ("* \\enum TILE_COLLISION_NONE", DocKind::Enum, "TILE_COLLISION_NONE"),
            ("* \\constant Math_PI", DocKind::Constant, "Math_PI"),
            ("* \\global Scene_Frame", DocKind::GlobalVar, "Scene_Frame"),
        ];
        for (header, kind, title) in cases {
            let record = parse_block(&block(&[header, "* \\ns Entity"])).unwrap();
            assert_eq!(record.kind, kind, "header {:?}", header);
            assert_eq!(record.title, title, "header {:?}", header);
        }
    }

    #[test]
    fn unrecognized_header_becomes_function() {
        let record = parse_block(&block(&["* Math_Abs", "* \\ns Math"])).unwrap();
        assert_eq!(record.kind, DocKind::Function);
        assert_eq!(record.title, "Math_Abs");
        assert_eq!(record.namespace.as_deref(), Some("Math"));
    }

    #[test]
    fn empty_block_produces_nothing() {
        assert!(parse_block(&[]).is_none());
    }

    #[test]
    fn empty_fallback_title_is_discarded() {
        assert!(parse_block(&block(&["*", "* \\desc text"])).is_none());
        assert!(parse_block(&block(&["*   "])).is_none());
    }

    #[test]
    fn empty_tagged_title_is_discarded() {
        assert!(parse_block(&block(&["* \\field", "* \\type Number"])).is_none());
    }

    #[test]
    fn callable_collects_params_in_order() {
        let record = parse_block(&block(&[
            "* Math_Clamp",
            "* \\desc Clamps a value.",
            "* \\param n (Number): The value.",
            "* \\param minValue (Number): The lower bound.",
            "* \\paramOpt maxValue (Number): The upper bound.",
            "* \\return Returns a Number value.",
            "* \\ns Math",
        ]))
        .unwrap();

        match &record.detail {
            Detail::Callable { params, returns } => {
                assert_eq!(params.len(), 3);
                assert_eq!(params[0].label, "n (Number): The value.");
                assert!(!params[0].optional);
                assert!(!params[1].optional);
                assert_eq!(params[2].label, "maxValue (Number): The upper bound.");
                assert!(params[2].optional);
                assert_eq!(returns.as_deref(), Some("Returns a Number value."));
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn multiline_desc_lines_are_consumed_once() {
        // The continuation line must be spliced into the description, not
        // rescanned as a tag line.
        let record = parse_block(&block(&[
            "* Math_Abs",
            "* \\desc Spans \\",
            "* \\ns NotANamespace",
            "* \\ns Math",
        ]))
        .unwrap();
        assert_eq!(
            record.description.as_deref(),
            Some("Spans * \\ns NotANamespace")
        );
        assert_eq!(record.namespace.as_deref(), Some("Math"));
    }

    #[test]
    fn constructor_takes_namespace_as_title() {
        let record = parse_block(&block(&[
            "* \\constructor",
            "* \\desc Creates a new entity.",
            "* \\ns Entity",
        ]))
        .unwrap();
        assert_eq!(record.kind, DocKind::Constructor);
        assert_eq!(record.title, "Entity");
    }

    #[test]
    fn constructor_without_namespace_keeps_heading() {
        let record = parse_block(&block(&["* \\constructor Widget"])).unwrap();
        assert_eq!(record.title, "Widget");
    }

    #[test]
    fn enum_prefix_derivation() {
        let record = parse_block(&block(&["* \\enum TILE_COLLISION_NONE"])).unwrap();
        match &record.detail {
            Detail::Enum { prefix } => assert_eq!(prefix.as_deref(), Some("TILE_*")),
            other => panic!("unexpected detail: {:?}", other),
        }

        let record = parse_block(&block(&["* \\enum Flags"])).unwrap();
        match &record.detail {
            Detail::Enum { prefix } => assert!(prefix.is_none()),
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn field_collects_type_and_default() {
        let record = parse_block(&block(&[
            "* \\field X",
            "* \\type Number",
            "* \\default 0.0",
            "* \\desc The X position.",
            "* \\ns Entity",
        ]))
        .unwrap();
        match &record.detail {
            Detail::Value {
                value_type,
                default_value,
            } => {
                assert_eq!(value_type.as_deref(), Some("Number"));
                assert_eq!(default_value.as_deref(), Some("0.0"));
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn constant_ignores_default() {
        let record = parse_block(&block(&[
            "* \\constant Math_PI",
            "* \\type Decimal",
            "* \\default 3.14",
        ]))
        .unwrap();
        match &record.detail {
            Detail::Value {
                value_type,
                default_value,
            } => {
                assert_eq!(value_type.as_deref(), Some("Decimal"));
                assert!(default_value.is_none());
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn scan_stops_at_block_end_marker() {
        // A stray end marker inside the line list stops the scan.
        let record = parse_block(&block(&[
            "* Math_Abs",
            "* \\desc First.",
            "*/",
            "* \\ns Math",
        ]))
        .unwrap();
        assert_eq!(record.description.as_deref(), Some("First."));
        assert!(record.namespace.is_none());
    }
}
