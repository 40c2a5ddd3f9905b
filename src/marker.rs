//! Marker vocabulary and tag-argument extraction.
//!
//! Documentation blocks are delimited by `/***` and `*/`. Every line inside
//! a block carries a `* \tag` prefix; the text after the tag is the tag's
//! argument. Arguments ending in a backslash continue on the next line.

use crate::model::DocKind;

pub const BLOCK_START: &str = "/***";
pub const BLOCK_END: &str = "*/";

pub const METHOD: &str = "* \\method";
pub const CONSTRUCTOR: &str = "* \\constructor";
pub const CONSTANT: &str = "* \\constant";
pub const ENUM: &str = "* \\enum";
pub const GLOBAL: &str = "* \\global";
pub const FIELD: &str = "* \\field";
pub const CLASS_FIELD: &str = "* \\classfield";

pub const DESC: &str = "* \\desc";
pub const PARAM: &str = "* \\param";
pub const PARAM_OPT: &str = "* \\paramOpt";
pub const RETURN: &str = "* \\return";
pub const TYPE: &str = "* \\type";
pub const DEFAULT: &str = "* \\default";
pub const NAMESPACE: &str = "* \\ns";

/// Header tags and the record kind each one opens. The tags are
/// prefix-distinct, so lookup order only has to be exhaustive.
pub const HEADER_KINDS: [(&str, DocKind); 7] = [
    (METHOD, DocKind::Method),
    (CONSTRUCTOR, DocKind::Constructor),
    (FIELD, DocKind::Field),
    (CLASS_FIELD, DocKind::ClassField),
    (ENUM, DocKind::Enum),
    (CONSTANT, DocKind::Constant),
    (GLOBAL, DocKind::GlobalVar),
];

/// Extract a single-line tag argument: the text after the tag, trimmed.
pub fn value(tag: &str, line: &str) -> String {
    line[tag.len()..].trim().to_string()
}

/// Extract a tag argument that may continue across lines.
///
/// Starting at `lines[start]`, a trailing backslash splices in the next
/// line (trimmed, backslash removed). Continuation past the end of the
/// slice simply stops, so truncated blocks never fail.
///
/// Returns the text and the number of lines consumed, counting the tag
/// line itself plus one per continuation line.
pub fn value_multiline(tag: &str, lines: &[String], start: usize) -> (String, usize) {
    let mut text = value(tag, &lines[start]);
    let mut consumed = 1;

    while text.ends_with('\\') {
        if start + consumed == lines.len() {
            break;
        }
        text.pop();
        text.push_str(lines[start + consumed].trim());
        consumed += 1;
    }

    (text, consumed)
}
