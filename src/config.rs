/// Application-level constants
pub const APP_NAME: &str = "Rxdoc";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fallbacks printed when the prescriber profile is incomplete.
pub const DEFAULT_DOCUMENT_ID: &str = "ADMIN";
pub const DEFAULT_CLINIC_NAME: &str = "CLÍNICA VETERINÁRIA VETIUS";
pub const DEFAULT_PRESCRIBER_NAME: &str = "Dr. Silva";
pub const DEFAULT_PRESCRIBER_CRMV: &str = "CRMV-SP 00000";

/// Format used for the document date line (pt-BR).
pub const DATE_LABEL_FORMAT: &str = "%d/%m/%Y";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "rxdoc_lib=debug,rxdoc=debug"
    } else {
        "rxdoc_lib=info,rxdoc=info"
    }
}
