//! Axum route handlers for the JSON API.

pub mod health;
pub mod preferences;
pub mod projects;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// Lenient request body parsing: a malformed or empty JSON body is
/// treated as an empty payload rather than an error. Validation of the
/// resulting value (e.g. the mandatory-title rule) stays with the
/// caller.
pub(crate) fn lenient_json<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::preferences::PreferencesUpdate;

    #[test]
    fn test_lenient_json_falls_back_to_default() {
        let garbage = Bytes::from_static(b"{not json");
        let update: PreferencesUpdate = lenient_json(&garbage);
        assert!(update.theme.is_none());

        let empty = Bytes::new();
        let update: PreferencesUpdate = lenient_json(&empty);
        assert!(update.window_bounds.is_none());
    }
}
