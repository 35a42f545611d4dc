//! Relay chain id clean-up.
//!
//! Operators type chain lists by hand, so anything outside `[0-9a-fA-F,]` is dropped
//! before splitting. Length and checksum checks belong to the signer.

use crate::error::{LifecycleError, LifecycleResult};

pub fn is_chain_id_char(c: char) -> bool {
    c.is_ascii_hexdigit() || c == ','
}

/// Drop every character that cannot appear in a comma-separated hex list.
pub fn strip_chain_ids(raw: &str) -> String {
    raw.chars().filter(|c| is_chain_id_char(*c)).collect()
}

/// Sanitize then split on commas.
///
/// An input with nothing left after stripping yields `[""]`, not an empty vector.
pub fn sanitize_chain_ids(raw: &str) -> Vec<String> {
    strip_chain_ids(raw)
        .split(',')
        .map(str::to_string)
        .collect()
}

/// Reject lists with empty identifiers before any credential is requested.
pub fn validate_chain_ids(chains: &[String]) -> LifecycleResult<()> {
    if chains.iter().all(|chain| chain.is_empty()) {
        return Err(LifecycleError::ChainIdFormat(
            "no hexadecimal chain ids found".to_string(),
        ));
    }
    if let Some(position) = chains.iter().position(|chain| chain.is_empty()) {
        return Err(LifecycleError::ChainIdFormat(format!(
            "empty chain id at position {position}"
        )));
    }
    Ok(())
}
