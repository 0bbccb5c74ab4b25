use std::path::Path;

use clap::Args;
use obslink_core::ObsFields;
use serde_json::json;

use crate::util::{load_settings, print_error, print_json, save_settings};

#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// Metrics dashboard base URL (empty string disables metrics links)
    #[arg(long)]
    pub prom_base: Option<String>,
    /// Metrics query template ($tenant, $type, $name, $key)
    #[arg(long)]
    pub prom_tpl: Option<String>,
    /// Logs search base URL (empty string disables logs links)
    #[arg(long)]
    pub logs_base: Option<String>,
    /// Logs query template ($tenant, $type, $name, $key)
    #[arg(long)]
    pub logs_tpl: Option<String>,
}

impl SetArgs {
    fn is_empty(&self) -> bool {
        self.prom_base.is_none()
            && self.prom_tpl.is_none()
            && self.logs_base.is_none()
            && self.logs_tpl.is_none()
    }

    /// Overwrite only the fields that were given.
    pub fn apply(self, fields: &mut ObsFields) {
        if let Some(v) = self.prom_base {
            fields.prom_base = v;
        }
        if let Some(v) = self.prom_tpl {
            fields.prom_query_tpl = v;
        }
        if let Some(v) = self.logs_base {
            fields.logs_base = v;
        }
        if let Some(v) = self.logs_tpl {
            fields.logs_query_tpl = v;
        }
    }
}

pub fn show(settings_path: &Path) -> i32 {
    let fields = match load_settings(settings_path) {
        Ok(f) => f,
        Err(e) => return local_error(&e),
    };
    print_json(&json!({
        "settings_path": settings_path.display().to_string(),
        "fields": fields
    }));
    0
}

pub fn set(settings_path: &Path, args: SetArgs) -> i32 {
    if args.is_empty() {
        crate::util::exit_error(
            "Nothing to set",
            Some("Pass at least one of --prom-base, --prom-tpl, --logs-base, --logs-tpl."),
        );
    }
    let mut fields = match load_settings(settings_path) {
        Ok(f) => f,
        Err(e) => return local_error(&e),
    };
    args.apply(&mut fields);
    persist(settings_path, &fields)
}

/// Overwrites the settings file without reading it, so a corrupt file can
/// always be recovered.
pub fn reset(settings_path: &Path) -> i32 {
    let mut fields = ObsFields::default();
    fields.reset();
    persist(settings_path, &fields)
}

fn persist(settings_path: &Path, fields: &ObsFields) -> i32 {
    if let Err(e) = save_settings(settings_path, fields) {
        return local_error(&format!("Failed to save settings: {e}"));
    }
    print_json(&json!({ "fields": fields }));
    0
}

pub(crate) fn local_error(message: &str) -> i32 {
    print_error(
        "settings_error",
        message,
        Some("Check --settings / OBSLINK_SETTINGS, or run `obslink reset`."),
    );
    4
}
