use std::path::Path;

use obslink_core::{ObsFields, export_to, import_from};
use serde_json::json;

use crate::host::{DirectorySink, FileSource};
use crate::util::{load_settings, print_error, print_json, save_settings};

use super::settings::local_error;

pub fn export(settings_path: &Path, out_dir: &Path) -> i32 {
    let fields = match load_settings(settings_path) {
        Ok(f) => f,
        Err(e) => return local_error(&e),
    };

    let mut sink = DirectorySink::new(out_dir);
    match export_to(&fields, chrono::Utc::now(), &mut sink) {
        Ok(config) => {
            let file = sink
                .written()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            print_json(&json!({
                "exported": file,
                "version": config.version,
                "exportedAt": config.exported_at,
            }));
            0
        }
        Err(e) => {
            print_error("export_failed", &e.to_string(), None);
            1
        }
    }
}

/// Import `file` ('-' for stdin). The settings file is only rewritten when
/// the whole document validated. An unreadable settings file does not block
/// the import, since a valid document replaces every field.
pub fn import(settings_path: &Path, file: &str) -> i32 {
    let mut fields = load_settings(settings_path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable settings file for import");
        ObsFields::defaults()
    });

    let mut source = FileSource::new(file);
    let config = match import_from(&mut fields, &mut source) {
        Ok(c) => c,
        Err(e) => {
            print_error(
                "import_failed",
                &e.to_string(),
                Some("Fix the file and import again; current settings were left unchanged."),
            );
            return 1;
        }
    };

    if let Err(e) = save_settings(settings_path, &fields) {
        return local_error(&format!("Failed to save settings: {e}"));
    }

    print_json(&json!({
        "imported": file,
        "version": config.version,
        "exportedAt": config.exported_at,
        "fields": fields,
    }));
    0
}

#[cfg(test)]
mod tests {
    use obslink_core::EXPORT_FILE_NAME;

    use super::*;

    fn seeded(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("settings.json");
        let fields = ObsFields {
            prom_base: "http://localhost:9090".into(),
            prom_query_tpl: r#"up{tenant="$tenant"}"#.into(),
            logs_base: "https://logs.example.com/search".into(),
            logs_query_tpl: r#"key:"$key""#.into(),
        };
        save_settings(&path, &fields).unwrap();
        path
    }

    #[test]
    fn export_writes_document_into_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let settings = seeded(dir.path());
        let out = dir.path().join("exports");

        assert_eq!(export(&settings, &out), 0);
        let raw = std::fs::read_to_string(out.join(EXPORT_FILE_NAME)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["promBase"], "http://localhost:9090");
        assert_eq!(value["version"], 1);
    }

    #[test]
    fn bad_import_leaves_settings_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let settings = seeded(dir.path());
        let before = std::fs::read_to_string(&settings).unwrap();

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{bad:").unwrap();
        assert_eq!(import(&settings, &bad.to_string_lossy()), 1);
        assert_eq!(std::fs::read_to_string(&settings).unwrap(), before);
    }

    #[test]
    fn good_import_replaces_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = seeded(dir.path());

        let doc = dir.path().join(EXPORT_FILE_NAME);
        std::fs::write(
            &doc,
            r#"{"promBase":"http://127.0.0.1:9090","promQueryTpl":"","logsBase":"","logsQueryTpl":"q","version":1,"exportedAt":"2026-10-16T00:00:00.000Z"}"#,
        )
        .unwrap();

        assert_eq!(import(&settings, &doc.to_string_lossy()), 0);
        assert_eq!(
            load_settings(&settings).unwrap(),
            ObsFields {
                prom_base: "http://127.0.0.1:9090".into(),
                prom_query_tpl: String::new(),
                logs_base: String::new(),
                logs_query_tpl: "q".into(),
            }
        );
    }

    #[test]
    fn import_replaces_corrupt_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        std::fs::write(&settings, "[]").unwrap();
        assert!(load_settings(&settings).is_err());

        let doc = dir.path().join(EXPORT_FILE_NAME);
        std::fs::write(
            &doc,
            r#"{"promBase":"http://localhost:9090/graph","promQueryTpl":"up","logsBase":"","logsQueryTpl":"","version":1}"#,
        )
        .unwrap();

        assert_eq!(import(&settings, &doc.to_string_lossy()), 0);
        let fields = load_settings(&settings).unwrap();
        assert_eq!(fields.prom_base, "http://localhost:9090/graph");
        assert_eq!(fields.prom_query_tpl, "up");
    }

    #[test]
    fn bad_import_keeps_corrupt_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        std::fs::write(&settings, "{corrupt").unwrap();

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"promBase":"http://other"}"#).unwrap();
        assert_eq!(import(&settings, &bad.to_string_lossy()), 1);
        assert_eq!(std::fs::read_to_string(&settings).unwrap(), "{corrupt");
    }
}
