//! Message template rendering.
//!
//! Placeholders look like `{Name}`; `{@Name}`, `{$Name}` and format/alignment
//! suffixes (`{Name:l}`, `{Name,10}`) resolve to the same property. Unknown
//! placeholders are left as written and `{{` / `}}` escape braces.

use serde_json::Value;

pub fn render<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<Value>,
{
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(['{', '}']) {
        output.push_str(&rest[..open]);
        let tail = &rest[open..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            output.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            output.push('}');
            rest = &tail[1..];
            continue;
        }

        let Some(close) = tail.find('}') else {
            output.push_str(tail);
            return output;
        };
        let token = &tail[1..close];
        match lookup(property_name(token)) {
            Some(value) => output.push_str(&display(&value)),
            None => output.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    output.push_str(rest);
    output
}

fn property_name(token: &str) -> &str {
    let token = token.trim_start_matches(['@', '$']);
    let end = token.find([':', ',']).unwrap_or(token.len());
    &token[..end]
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
