//! Inline `<linkto>` cross-reference resolution.
//!
//! Description, parameter, and return text may embed
//! `<linkto ref="Title">text</linkto>` tags. At render time each tag is
//! rewritten into a `#`-fragment link against the index's anchor table.
//! Broken references degrade to plain text; malformed tags leave the rest
//! of the string untouched.

use std::collections::HashMap;

const LINKTO_TAG: &str = "linkto";

/// Rewrite the `<linkto>` tags in `text`.
///
/// Single forward scan into an output buffer. Every tag, rewritten or not,
/// advances the cursor past its closing tag, so no input can make the scan
/// loop. A tag with no terminating `>`, no closing tag, or an unterminated
/// attribute quote ends the scan with the remainder copied verbatim.
pub fn resolve(text: &str, anchors: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let Some(open) = rest.find('<') else {
            out.push_str(rest);
            return out;
        };
        let Some(open_end_rel) = rest[open + 1..].find('>') else {
            out.push_str(rest);
            return out;
        };
        let open_end = open + 1 + open_end_rel;
        let body = &rest[open + 1..open_end];
        let content_start = open_end + 1;

        let ref_target = body.find(LINKTO_TAG).and_then(|pos| {
            tag_attributes(&body[pos + LINKTO_TAG.len()..]).remove("ref")
        });

        let Some(close_rel) = rest[content_start..].find("</") else {
            out.push_str(rest);
            return out;
        };
        let close_start = content_start + close_rel;
        let Some(close_end_rel) = rest[close_start + 1..].find('>') else {
            out.push_str(rest);
            return out;
        };
        let close_end = close_start + 1 + close_end_rel;

        match ref_target {
            Some(target) => {
                out.push_str(&rest[..open]);

                let contents = &rest[content_start..close_start];
                // An empty tag body shows the reference itself, code-styled.
                let (visible, use_code) = if contents.is_empty() {
                    (target.as_str(), true)
                } else {
                    (contents, false)
                };

                let anchor = anchors.get(&target);
                if use_code {
                    out.push_str("<code>");
                }
                if let Some(anchor) = anchor {
                    out.push_str("<a href=\"#");
                    out.push_str(anchor);
                    out.push_str("\">");
                }
                out.push_str(visible);
                if anchor.is_some() {
                    out.push_str("</a>");
                }
                if use_code {
                    out.push_str("</code>");
                }
            }
            None => {
                // Not a cross-reference; copy the element through as-is.
                out.push_str(&rest[..=close_end]);
            }
        }

        rest = &rest[close_end + 1..];
    }
}

/// Parse `key="value"` pairs by locating quote-delimited values left to
/// right. The character joining key to value (the `=`) is dropped from the
/// key. Malformed input ends the scan; pairs read so far are kept.
fn tag_attributes(input: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    let mut rest = input.trim();

    while !rest.is_empty() {
        let Some(quote_open) = rest.find('"') else { break };
        if quote_open == 0 {
            break;
        }
        let Some(key) = rest.get(..quote_open - 1) else { break };
        if key.is_empty() {
            break;
        }
        let Some(quote_close_rel) = rest[quote_open + 1..].find('"') else {
            break;
        };
        let quote_close = quote_open + 1 + quote_close_rel;
        attributes.insert(
            key.to_string(),
            rest[quote_open + 1..quote_close].to_string(),
        );
        rest = rest[quote_close + 1..].trim();
    }

    attributes
}
