use serde::Serialize;
use url::Url;

use crate::config::ObsFields;
use crate::template::{ObsContext, apply_template};
use crate::validate::is_openable_url;

/// Query parameter used by the interactive graph view of a metrics dashboard.
pub const GRAPH_EXPR_PARAM: &str = "g0.expr";
/// Query parameter used by a raw metrics query endpoint.
pub const METRICS_QUERY_PARAM: &str = "query";
/// Query parameter used by the logs search UI.
pub const LOGS_QUERY_PARAM: &str = "q";

/// Which dashboard a link points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Metrics,
    Logs,
}

impl LinkTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metrics => "metrics",
            Self::Logs => "logs",
        }
    }

    /// Parameter name the query is carried in for `base`.
    pub fn param_name(self, base: &str) -> &'static str {
        match self {
            Self::Metrics if has_graph_segment(base) => GRAPH_EXPR_PARAM,
            Self::Metrics => METRICS_QUERY_PARAM,
            Self::Logs => LOGS_QUERY_PARAM,
        }
    }
}

/// Outcome of resolving a link for one target.
///
/// `Unavailable` and `InvalidScheme` are states, not failures: the host
/// disables the corresponding action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "url", rename_all = "snake_case")]
pub enum LinkStatus {
    /// No base URL configured.
    Unavailable,
    /// Base URL present but not http/https.
    InvalidScheme,
    Ready(String),
}

impl LinkStatus {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Ready(url) => Some(url),
            Self::Unavailable | Self::InvalidScheme => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Both resolved links for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObsLinks {
    pub metrics: LinkStatus,
    pub logs: LinkStatus,
}

/// Compose a dashboard URL carrying the filled-in template.
///
/// Returns `None` when `base` is missing or empty. Any query string already
/// on `base` is kept verbatim and the new parameter is appended after it.
/// The scheme is not checked here; see [`resolve_link`].
pub fn build_link(
    target: LinkTarget,
    base: Option<&str>,
    template: &str,
    ctx: &ObsContext,
    key: &str,
) -> Option<String> {
    let base = base.filter(|b| !b.is_empty())?;
    let query = apply_template(template, ctx, key);
    let sep = if base.contains('?') { '&' } else { '?' };
    let param = target.param_name(base);

    Some(format!("{base}{sep}{param}={}", urlencoding::encode(&query)))
}

pub fn build_metrics_link(base: &str, template: &str, ctx: &ObsContext, key: &str) -> Option<String> {
    build_link(LinkTarget::Metrics, Some(base), template, ctx, key)
}

pub fn build_logs_link(base: &str, template: &str, ctx: &ObsContext, key: &str) -> Option<String> {
    build_link(LinkTarget::Logs, Some(base), template, ctx, key)
}

/// Build a link only if `base` is safe to open.
pub fn resolve_link(
    target: LinkTarget,
    base: Option<&str>,
    template: &str,
    ctx: &ObsContext,
    key: &str,
) -> LinkStatus {
    if base.is_none_or(str::is_empty) {
        return LinkStatus::Unavailable;
    }
    if !is_openable_url(base) {
        return LinkStatus::InvalidScheme;
    }
    match build_link(target, base, template, ctx, key) {
        Some(url) => LinkStatus::Ready(url),
        None => LinkStatus::Unavailable,
    }
}

impl ObsFields {
    pub fn links(&self, ctx: &ObsContext, key: &str) -> ObsLinks {
        ObsLinks {
            metrics: resolve_link(
                LinkTarget::Metrics,
                Some(&self.prom_base),
                &self.prom_query_tpl,
                ctx,
                key,
            ),
            logs: resolve_link(
                LinkTarget::Logs,
                Some(&self.logs_base),
                &self.logs_query_tpl,
                ctx,
                key,
            ),
        }
    }
}

/// True when the path of `base` has a segment exactly equal to `graph`.
/// `/graph` and `/graph/` match; `/graphql`, `/graphing` and a `/graph`
/// inside the query string do not.
///
/// Bases without a scheme (`localhost:9090/graph`) either fail to parse or
/// parse as an opaque URL with no path segments; both use the raw path text.
fn has_graph_segment(base: &str) -> bool {
    match Url::parse(base) {
        Ok(url) if !url.cannot_be_a_base() => url
            .path_segments()
            .is_some_and(|mut segments| segments.any(|s| s == "graph")),
        _ => base
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .any(|s| s == "graph"),
    }
}
