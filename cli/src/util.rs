use std::io::Write;
use std::path::{Path, PathBuf};

use obslink_core::ObsFields;
use serde_json::json;

pub fn exit_error(message: &str, docs_hint: Option<&str>) -> ! {
    print_error("cli_error", message, docs_hint);
    std::process::exit(4);
}

/// Structured error on stderr: `{ "error", "message", "docs_hint"? }`.
pub fn print_error(code: &str, message: &str, docs_hint: Option<&str>) {
    let mut err = json!({
        "error": code,
        "message": message
    });
    if let Some(hint) = docs_hint {
        err["docs_hint"] = json!(hint);
    }
    eprintln!("{}", pretty(&err));
}

pub fn print_json(value: &serde_json::Value) {
    println!("{}", pretty(value));
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub fn default_settings_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("obslink");
    config_dir.join("settings.json")
}

/// Load the editable fields. A missing file means nothing was saved yet,
/// so the defaults are returned.
pub fn load_settings(path: &Path) -> Result<ObsFields, String> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(ObsFields::defaults());
        }
        Err(e) => {
            return Err(format!(
                "Failed to read settings file '{}': {e}",
                path.display()
            ));
        }
    };
    serde_json::from_str(&data)
        .map_err(|e| format!("Invalid settings file '{}': {e}", path.display()))
}

pub fn save_settings(path: &Path, fields: &ObsFields) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let data = serde_json::to_string_pretty(fields)?;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(data.as_bytes())?;

    tracing::debug!(path = %path.display(), "saved settings");
    Ok(())
}

// Unix-specific imports for file permissions
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

// No-op on non-unix (won't compile for Windows without this)
#[cfg(not(unix))]
trait OpenOptionsExt {
    fn mode(&mut self, _mode: u32) -> &mut Self;
}

#[cfg(not(unix))]
impl OpenOptionsExt for std::fs::OpenOptions {
    fn mode(&mut self, _mode: u32) -> &mut Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let fields = load_settings(&dir.path().join("absent.json")).unwrap();
        assert_eq!(fields, ObsFields::defaults());
    }

    #[test]
    fn settings_roundtrip_through_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let fields = ObsFields {
            prom_base: "http://localhost:9090/graph".into(),
            prom_query_tpl: "up".into(),
            logs_base: "https://logs.example.com/search".into(),
            logs_query_tpl: r#"tenant:"$tenant""#.into(),
        };

        save_settings(&path, &fields).unwrap();
        assert_eq!(load_settings(&path).unwrap(), fields);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"promBase\""));
    }

    #[cfg(unix)]
    #[test]
    fn settings_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        save_settings(&path, &ObsFields::defaults()).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_settings_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert!(err.starts_with("Invalid settings file"));
    }
}
