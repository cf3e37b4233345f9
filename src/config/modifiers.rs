//! Run modifier resolution.
//!
//! Merges the global run modifiers with a tool's own modifiers. The order
//! matters: `go run` applies the last occurrence of a repeated flag.

/// Resolve the effective run modifiers for one tool.
///
/// With `override_global` set only `local` is used, otherwise `global`
/// precedes `local`.
pub fn resolve_modifiers(
    global: &[String],
    local: &[String],
    override_global: bool,
) -> Vec<String> {
    if override_global {
        return local.to_vec();
    }

    global.iter().chain(local).cloned().collect()
}
