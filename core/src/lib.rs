//! Observability link building for tool invocations.
//!
//! A user-edited query template is filled from the invocation context,
//! embedded into a metrics or logs dashboard URL, and the four editable
//! fields behind it round-trip through a portable JSON document.

pub mod config;
pub mod link;
pub mod template;
pub mod transfer;
pub mod validate;

pub use config::{
    CONFIG_VERSION, EXPORT_FILE_NAME, IMPORT_FAILED_MARKER, ImportError, ObsFields,
    ObservabilityConfig, export_config, export_config_now, import_config,
};
pub use link::{
    LinkStatus, LinkTarget, ObsLinks, build_link, build_logs_link, build_metrics_link, resolve_link,
};
pub use template::{ObsContext, apply_template};
pub use transfer::{
    DownloadSink, LinkOpener, TextSource, TransferError, export_to, import_from, open_link,
};
pub use validate::{SCHEME_HINT, is_openable_url};
