//! Error handling foundation for the Welsh BOT widget.
//!
//! Only the `Result` alias lives here. Each crate defines its own typed
//! error enums and carries them in a rootcause [`Report`], adding context
//! as errors cross a crate boundary.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
///
/// `C` is the typed context of the report, e.g. a crate's error enum.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
