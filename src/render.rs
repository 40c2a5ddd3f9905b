//! HTML reference page writer.
//!
//! Walks the index once per record kind, in a fixed order, emitting three
//! passes: navigation lists, namespace content listings, and per-record
//! detail blocks with a description tally per kind. Anchor ids and kind
//! slugs are a compatibility surface for existing external links.

use std::io::{self, Write};

use crate::index::{DocIndex, RecordId};
use crate::links;
use crate::model::{namespace_anchor, Detail, DocKind, DocRecord, ParamDoc};

const HEADER: &str = r##"
<html>
    <head>
        <title>Hatch Game Engine Documentation</title>
        <style>
            body {
                background-color: white;
                font-family: sans-serif;
                margin: 64px;
            }
            codefrag {
                display: inline;
                margin: 0px;
                font-family: monospace;
            }
            a {
                text-decoration: none;
                color: #4141F2;
            }
            .function_list {
                font-family: monospace;
                margin-top: 0.5em;
            }
            .function_list li {
                margin-top: 0.125em;
                margin-bottom: 0.125em;
            }
            code, pre.code {
                background-color: #f2f2f2;
                border-radius: 3px;
                padding: 3px;
            }
            codeBlock {
                background-color: #f2f2f2;
                border-radius: 3px;
                padding: 3px;
                line-height: 100%;
                word-break: normal;
                font-family: monospace;
            }
        </style>
    </head>

    <body>
        <div style="position: fixed; margin-top: -32px; margin-left: -96px; width: 100%; text-align: right; ">
            <a href="#Reference_top">Back to top</a>
        </div>
        <h1 id="Reference_top">Hatch Game Engine Reference</h1>"##;

/// Write the complete reference document.
pub fn write_document(index: &DocIndex, out: &mut impl Write) -> io::Result<()> {
    out.write_all(HEADER.as_bytes())?;

    let mut navigation = String::new();
    let mut contents = String::new();
    let mut docs = String::new();

    for kind in DocKind::ALL {
        let names = namespace_names(index, kind);
        if writes_navigation(index, kind) {
            navigation.push_str(&navigation_list(index, kind, &names));
        }
        if writes_contents(index, kind) {
            contents.push_str(&contents_list(index, kind, &names));
        }
        if !index.group(kind).records.is_empty() {
            docs.push_str(&kind_docs(index, kind, &names));
        }
    }

    out.write_all(navigation.as_bytes())?;
    out.write_all(b"        <hr/>\n")?;
    out.write_all(contents.as_bytes())?;
    out.write_all(b"        <hr/>\n")?;
    out.write_all(docs.as_bytes())?;
    out.write_all(b"    </body>\n</html>\n")?;
    Ok(())
}

/// Kinds whose namespace listings are ordered alphabetically. Everything
/// else stays in registration order.
fn sorts_namespaces(kind: DocKind) -> bool {
    matches!(kind, DocKind::Function | DocKind::Method | DocKind::Enum)
}

/// The kind's namespace names in emission order. Sorting happens on a copy
/// so rendering the same index twice yields identical bytes.
fn namespace_names(index: &DocIndex, kind: DocKind) -> Vec<String> {
    let mut names = index.group(kind).namespace_names.clone();
    if sorts_namespaces(kind) {
        names.sort();
    }
    names
}

fn writes_navigation(index: &DocIndex, kind: DocKind) -> bool {
    if kind.is_field() || kind == DocKind::Constructor {
        return false;
    }
    let group = index.group(kind);
    if sorts_namespaces(kind) && group.namespace_names.is_empty() {
        return false;
    }
    !group.records.is_empty()
}

fn writes_contents(index: &DocIndex, kind: DocKind) -> bool {
    if matches!(kind, DocKind::Constant | DocKind::GlobalVar) {
        return false;
    }
    writes_navigation(index, kind)
}

fn namespace_heading(kind: DocKind) -> &'static str {
    match kind {
        DocKind::Function => "Namespaces",
        _ => kind.label(),
    }
}

fn is_enum_namespace(index: &DocIndex, name: &str) -> bool {
    index
        .namespaces
        .get(name)
        .is_some_and(|info| info.is_enum_namespace)
}

fn navigation_list(index: &DocIndex, kind: DocKind, names: &[String]) -> String {
    let mut text = format!("        <h3>{}</h3>\n", namespace_heading(kind));
    text.push_str("        <ul>\n");

    if sorts_namespaces(kind) {
        for name in names {
            if kind == DocKind::Enum && !is_enum_namespace(index, name) {
                continue;
            }
            text.push_str(&format!(
                "            <li><a href=\"#{}\">{}</a></li>\n",
                namespace_anchor(name),
                name
            ));
        }
    } else {
        for &id in &index.group(kind).records {
            let record = index.record(id);
            text.push_str(&format!(
                "                    <li><a href=\"#{}\">{}</a></li>\n",
                record.anchor(),
                record.qualified_title()
            ));
        }
    }

    text.push_str("        </ul>\n");
    text
}

fn contents_list(index: &DocIndex, kind: DocKind, names: &[String]) -> String {
    if kind == DocKind::Enum {
        return enum_contents_list(index, names);
    }

    let mut text = format!("        <h3>{}</h3>\n", kind.label());

    for name in names {
        text.push_str(&format!(
            "            <p id=\"{}\">\n",
            namespace_anchor(name)
        ));
        text.push_str(&format!("                <h2>{}</h2>\n", name));

        if let Some(info) = index.namespaces.get(name) {
            for member_kind in DocKind::ALL {
                let members = &info.members[member_kind.index()];
                if members.is_empty() {
                    continue;
                }
                text.push_str(&format!(
                    "                <i>{}:</i>\n",
                    member_kind.label()
                ));
                text.push_str("                <ul>\n");
                for &id in members {
                    let record = index.record(id);
                    text.push_str(&format!(
                        "                    <li><a href=\"#{}\">{}</a></li>\n",
                        record.anchor(),
                        record.qualified_title()
                    ));
                }
                text.push_str("                </ul>\n");
            }
        }

        text.push_str("            </p>\n");
    }

    text
}

fn enum_contents_list(index: &DocIndex, names: &[String]) -> String {
    let mut text = format!("        <h3>{}</h3>\n", namespace_heading(DocKind::Enum));

    for name in names {
        let Some(info) = index.namespaces.get(name) else {
            continue;
        };
        if !info.is_enum_namespace {
            continue;
        }

        text.push_str(&format!(
            "            <p id=\"{}\">\n",
            namespace_anchor(&info.name)
        ));
        text.push_str(&format!(
            "                <h2><code>{}</code></h2>\n",
            info.name
        ));
        text.push_str("                <ul>\n");
        for &id in &info.members[DocKind::Enum.index()] {
            let record = index.record(id);
            text.push_str(&format!(
                "                    <li><a href=\"#{}\">{}</a></li>\n",
                record.anchor(),
                record.qualified_title()
            ));
        }
        text.push_str("                </ul>\n");
        text.push_str("            </p>\n");
    }

    text
}

fn kind_docs(index: &DocIndex, kind: DocKind, names: &[String]) -> String {
    let mut text = format!("        <h3>{}</h3>\n", kind.label());
    let group = index.group(kind);

    let mut ids: Vec<RecordId> = Vec::new();
    if matches!(kind, DocKind::Constant | DocKind::GlobalVar) {
        ids.extend(&group.records);
    } else {
        for name in names {
            if let Some(info) = index.namespaces.get(name) {
                ids.extend(&info.members[kind.index()]);
            }
        }
    }

    let mut described = 0usize;
    for id in ids {
        let record = index.record(id);
        if record.description.is_some() {
            described += 1;
        }
        text.push_str(&record_block(index, record));
    }

    text.push_str(&format!(
        "        <p>{} out of {} {} have descriptions. </p>\n",
        described,
        group.records.len(),
        kind.slug()
    ));
    text.push_str("        <hr/>\n");
    text
}

fn record_block(index: &DocIndex, record: &DocRecord) -> String {
    let mut text = format!("        <p id=\"{}\">\n", record.anchor());

    match &record.detail {
        Detail::Callable { params, returns } => {
            text.push_str(&callable_block(index, record, params, returns.as_deref()));
        }
        Detail::Value {
            value_type,
            default_value,
        } => {
            text.push_str(&value_block(
                index,
                record,
                value_type.as_deref(),
                default_value.as_deref(),
            ));
        }
        Detail::Enum { .. } | Detail::Plain => {
            text.push_str(&plain_block(index, record));
        }
    }

    text.push_str("        </p>\n");
    text
}

fn callable_block(
    index: &DocIndex,
    record: &DocRecord,
    params: &[ParamDoc],
    returns: Option<&str>,
) -> String {
    let title = record.qualified_title();
    let signature = parameter_signature(params);

    // Undescribed entries get a red heading so gaps stand out in review.
    let mut text = if record.description.is_some() {
        format!("        <h2 style=\"margin-bottom: 8px;\">{}</h2>\n", title)
    } else {
        format!(
            "        <h2 style=\"margin-bottom: 8px; color: red;\">{}</h2>\n",
            title
        )
    };
    text.push_str(&format!("        <code>{}{}</code>\n", title, signature));

    if let Some(desc) = record.description.as_deref() {
        text.push_str(&description_div(index, desc));
    }

    if !params.is_empty() {
        text.push_str("        <div style=\"font-weight: bold; margin-top: 8px;\">Parameters:</div>\n");
        text.push_str("        <ul style=\"margin-top: 0px; font-size: 14px;\">\n");
        for param in params {
            text.push_str(&format!(
                "        <li>{}</li>\n",
                links::resolve(&param.label, &index.anchors)
            ));
        }
        text.push_str("        </ul>\n");
    }

    if let Some(returns) = returns {
        text.push_str("        <div style=\"font-weight: bold; margin-top: 8px;\">Returns:</div>\n");
        text.push_str(&format!(
            "        <div style=\"font-size: 14px;\">{}</div>\n",
            links::resolve(returns, &index.anchors)
        ));
    }

    text
}

fn value_block(
    index: &DocIndex,
    record: &DocRecord,
    value_type: Option<&str>,
    default_value: Option<&str>,
) -> String {
    let mut text = title_line(record);

    if let Some(value_type) = value_type {
        text.push_str(&format!(
            "        <div style=\"font-size: 14px;\"><b>Type: </b>{}</div>\n",
            value_type
        ));
    }
    if let Some(default_value) = default_value {
        text.push_str(&format!(
            "        <div style=\"font-size: 14px;\"><b>Default: </b><code>{}</code></div>\n",
            default_value
        ));
    }
    if let Some(desc) = record.description.as_deref() {
        text.push_str(&description_div(index, desc));
    }

    text
}

fn plain_block(index: &DocIndex, record: &DocRecord) -> String {
    let mut text = title_line(record);
    if let Some(desc) = record.description.as_deref() {
        text.push_str(&description_div(index, desc));
    }
    text
}

fn title_line(record: &DocRecord) -> String {
    if record.description.is_some() {
        format!(
            "        <h3 style=\"margin-bottom: 8px;\"><code>{}</code></h3>\n",
            record.qualified_title()
        )
    } else {
        format!(
            "        <h3 style=\"margin-bottom: 8px; color: red;\"><code>{}</code></h3>\n",
            record.qualified_title()
        )
    }
}

fn description_div(index: &DocIndex, desc: &str) -> String {
    format!(
        "        <div style=\"margin-top: 8px; font-size: 14px;\">{}</div>\n",
        links::resolve(desc, &index.anchors)
    )
}

/// Build the display signature for a callable.
///
/// Labels carry a type fragment in parentheses; display keeps the text up
/// to one character before the first `(`. A `[` opens when the parameter
/// run first turns optional and closes before the final `)`.
fn parameter_signature(params: &[ParamDoc]) -> String {
    let mut text = String::from("(");
    let mut in_optional = false;

    for (i, param) in params.iter().enumerate() {
        let label = match param.label.find('(') {
            Some(pos) => param.label.get(..pos.saturating_sub(1)).unwrap_or(""),
            None => param.label.as_str(),
        };
        if i > 0 {
            text.push_str(", ");
        }
        if param.optional && !in_optional {
            text.push('[');
            in_optional = true;
        }
        text.push_str(label);
    }

    if in_optional {
        text.push(']');
    }
    text.push(')');
    text
}
