//! Loads the colon-separated key-bindings file (spec's external-interfaces
//! section) that builds a `Calculator`'s `Keys` table.

use std::path::Path;

/// Shipped with the binary so a fresh checkout runs without any setup.
pub const DEFAULT_KEYBINDINGS: &str = include_str!("../keybindings.config");

/// Reads `path` if given; falls back to the bundled default on a missing
/// file or read error rather than failing the whole run over it.
pub fn load(path: Option<&Path>) -> String {
    match path {
        Some(p) => std::fs::read_to_string(p).unwrap_or_else(|_| DEFAULT_KEYBINDINGS.to_string()),
        None => DEFAULT_KEYBINDINGS.to_string(),
    }
}
