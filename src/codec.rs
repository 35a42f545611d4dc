/// Decide whether the legacy transaction encoding is used.
///
/// With no trailing token the legacy codec is the default. When a token is present only
/// `"true"` or `"t"` (case-sensitive) keep it; every other value selects the current
/// codec. Older operator scripts depend on this asymmetry.
pub fn resolve_legacy_codec(args: &[String], required: usize) -> bool {
    match args.get(required) {
        None => true,
        Some(token) => matches!(token.as_str(), "true" | "t"),
    }
}
