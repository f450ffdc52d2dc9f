pub use folio_utils_derive::trace_instrument;

mod macros;

/// Returns the version of the backend as reported by the CLI.
pub fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
