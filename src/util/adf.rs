use serde_json::Value;

const BLOCK_NODES: [&str; 9] = [
    "paragraph",
    "heading",
    "blockquote",
    "codeBlock",
    "listItem",
    "bulletList",
    "orderedList",
    "panel",
    "rule",
];

/// Flatten a description field to plain text.
///
/// Plain strings pass through. Atlassian Document Format trees are walked
/// depth-first; block nodes end up on their own lines. Anything else
/// yields an empty string.
pub fn description_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => {
            let mut out = String::new();
            walk(value, &mut out);
            out.lines()
                .map(str::trim_end)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        }
        _ => String::new(),
    }
}

fn walk(node: &Value, out: &mut String) {
    match node {
        Value::Array(children) => children.iter().for_each(|c| walk(c, out)),
        Value::Object(obj) => {
            let kind = obj.get("type").and_then(Value::as_str).unwrap_or_default();
            match kind {
                "text" => {
                    if let Some(text) = obj.get("text").and_then(Value::as_str) {
                        out.push_str(text);
                    }
                }
                "hardBreak" => out.push('\n'),
                "mention" | "emoji" => {
                    if let Some(text) = obj
                        .get("attrs")
                        .and_then(|a| a.get("text"))
                        .and_then(Value::as_str)
                    {
                        out.push_str(text);
                    }
                }
                _ => {
                    if let Some(content) = obj.get("content") {
                        walk(content, out);
                    }
                    if BLOCK_NODES.contains(&kind) {
                        out.push('\n');
                    }
                }
            }
        }
        _ => {}
    }
}
