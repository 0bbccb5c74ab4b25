use std::path::Path;

use clap::{Args, ValueEnum};
use obslink_core::{
    LinkOpener, LinkStatus, LinkTarget, ObsContext, SCHEME_HINT, is_openable_url, open_link,
};
use serde_json::json;

use crate::host::BrowserOpener;
use crate::util::{load_settings, print_json};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum TargetArg {
    Metrics,
    Logs,
    All,
}

impl TargetArg {
    fn targets(self) -> &'static [LinkTarget] {
        match self {
            TargetArg::Metrics => &[LinkTarget::Metrics],
            TargetArg::Logs => &[LinkTarget::Logs],
            TargetArg::All => &[LinkTarget::Metrics, LinkTarget::Logs],
        }
    }
}

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Tenant the tool runs under
    #[arg(long, env = "OBSLINK_TENANT", default_value = "default")]
    pub tenant: String,
    /// Tool type (e.g. "http_get")
    #[arg(long, env = "OBSLINK_TOOL_TYPE")]
    pub tool_type: String,
    /// Tool name (e.g. "simple")
    #[arg(long, env = "OBSLINK_TOOL_NAME")]
    pub tool_name: String,
    /// Option key the link is scoped to (e.g. "timeout_ms")
    #[arg(long, default_value = "")]
    pub key: String,
    /// Which link(s) to build
    #[arg(long, value_enum, default_value_t = TargetArg::All)]
    pub target: TargetArg,
    /// Open every available link in the system browser
    #[arg(long)]
    pub open: bool,
}

pub fn run(settings_path: &Path, args: LinkArgs) -> i32 {
    let fields = match load_settings(settings_path) {
        Ok(f) => f,
        Err(e) => return super::settings::local_error(&e),
    };
    let ctx = ObsContext::new(args.tenant, args.tool_type, args.tool_name);
    let links = fields.links(&ctx, &args.key);

    let mut opener = BrowserOpener;
    let mut output = json!({
        "context": ctx,
        "key": args.key,
    });
    for target in args.target.targets() {
        let status = match target {
            LinkTarget::Metrics => &links.metrics,
            LinkTarget::Logs => &links.logs,
        };
        let mut entry = status_json(status);
        if args.open {
            entry["opened"] = json!(open_status(&mut opener, status));
        }
        output[target.as_str()] = entry;
    }

    print_json(&output);
    0
}

pub fn check_url(url: &str) -> i32 {
    let openable = is_openable_url(Some(url));
    let mut output = json!({
        "url": url,
        "openable": openable,
    });
    if !openable {
        output["hint"] = json!(SCHEME_HINT);
    }
    print_json(&output);
    if openable { 0 } else { 1 }
}

fn status_json(status: &LinkStatus) -> serde_json::Value {
    let mut entry = serde_json::to_value(status).unwrap_or_else(|_| json!({}));
    if *status == LinkStatus::InvalidScheme {
        entry["hint"] = json!(SCHEME_HINT);
    }
    entry
}

fn open_status(opener: &mut dyn LinkOpener, status: &LinkStatus) -> bool {
    match open_link(opener, status) {
        Ok(opened) => opened,
        Err(e) => {
            tracing::warn!(error = %e, "could not open browser");
            if let Some(url) = status.url() {
                eprintln!("If the browser doesn't open, visit: {url}");
            }
            false
        }
    }
}
