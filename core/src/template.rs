use serde::{Deserialize, Serialize};

/// Placeholder tokens recognised in query templates.
pub const PLACEHOLDERS: [&str; 4] = ["$tenant", "$type", "$name", "$key"];

/// Metrics template restored by a reset.
pub const DEFAULT_PROM_QUERY_TPL: &str = "sum(rate(tool_option_requests_total{tenant=\"$tenant\",tool_type=\"$type\",tool_name=\"$name\",option_key=\"$key\"}[5m]))";

/// Logs template restored by a reset.
pub const DEFAULT_LOGS_QUERY_TPL: &str = "key:\"$key\" AND tenant:\"$tenant\" AND tool:\"$type.$name\"";

/// The tool invocation a link is scoped to. Supplied by the host per call,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObsContext {
    pub tenant: String,
    pub tool_type: String,
    pub tool_name: String,
}

impl ObsContext {
    pub fn new(
        tenant: impl Into<String>,
        tool_type: impl Into<String>,
        tool_name: impl Into<String>,
    ) -> Self {
        Self {
            tenant: tenant.into(),
            tool_type: tool_type.into(),
            tool_name: tool_name.into(),
        }
    }

    fn value_for<'a>(&'a self, token: &str, key: &'a str) -> Option<&'a str> {
        match token {
            "$tenant" => Some(self.tenant.as_str()),
            "$type" => Some(self.tool_type.as_str()),
            "$name" => Some(self.tool_name.as_str()),
            "$key" => Some(key),
            _ => None,
        }
    }
}

/// Substitute `$tenant`, `$type`, `$name` and `$key` in `template`.
///
/// Single left-to-right pass: substituted values are copied verbatim and
/// never re-scanned. There is no escape syntax, so a literal `$tenant` in
/// the template (or inside a context value) cannot be told apart from a
/// placeholder in the output.
pub fn apply_template(template: &str, ctx: &ObsContext, key: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match PLACEHOLDERS.iter().find(|token| tail.starts_with(**token)) {
            Some(token) => {
                if let Some(value) = ctx.value_for(token, key) {
                    out.push_str(value);
                }
                rest = &tail[token.len()..];
            }
            None => {
                out.push('$');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
