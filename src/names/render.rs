//! The render-hook contract: decorate a base display string
//!
//! Reads the decoration cache only; safe to call from the render path at
//! any time. Each append is idempotent, so decorating an already
//! decorated string changes nothing.

use crate::core::config::{EngineSettings, SurnameMode};
use crate::core::types::PersonId;
use crate::names::cache::DecorationCache;

/// Append ordinal suffix, surname and nickname to `base`, in that order,
/// skipping any piece already trailing the string.
pub fn decorated_name(
    cache: &DecorationCache,
    settings: &EngineSettings,
    id: PersonId,
    base: &str,
) -> String {
    let mut out = base.to_string();

    if let Some(suffix) = cache.suffix(id) {
        append_token(&mut out, &suffix);
    }

    let surname = match settings.surname_mode {
        SurnameMode::UnitName => cache.unit_surname(id),
        SurnameMode::Free => cache.free_surname(id),
    };
    if let Some(surname) = surname {
        append_token(&mut out, &surname);
    }

    // A nickname only renders while its owner record is intact
    if cache.nickname_owner(id).is_some() {
        if let Some(nickname) = cache.nickname(id) {
            append_token(&mut out, &nickname);
        }
    }

    out
}

fn append_token(out: &mut String, token: &str) {
    if token.is_empty() {
        return;
    }
    let trailing = format!(" {}", token);
    if out.ends_with(&trailing) || out == token {
        return;
    }
    out.push_str(&trailing);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EngineSettings {
        EngineSettings::default()
    }

    #[test]
    fn test_appends_in_order() {
        let cache = DecorationCache::new();
        cache.set_suffix(PersonId(1), "II".to_string());
        cache.set_free_surname(PersonId(1), "Stormwind".to_string());
        cache.set_nickname(PersonId(1), "the Great".to_string(), PersonId(1));

        assert_eq!(
            decorated_name(&cache, &settings(), PersonId(1), "Harlaus"),
            "Harlaus II Stormwind the Great"
        );
    }

    #[test]
    fn test_missing_fields_skipped() {
        let cache = DecorationCache::new();
        cache.set_free_surname(PersonId(1), "Stormwind".to_string());

        assert_eq!(
            decorated_name(&cache, &settings(), PersonId(1), "Harlaus"),
            "Harlaus Stormwind"
        );
    }

    #[test]
    fn test_idempotent_append() {
        let cache = DecorationCache::new();
        cache.set_suffix(PersonId(1), "II".to_string());
        cache.set_free_surname(PersonId(1), "Stormwind".to_string());

        let once = decorated_name(&cache, &settings(), PersonId(1), "Harlaus");
        let twice = decorated_name(&cache, &settings(), PersonId(1), &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mode_selects_surname_map() {
        let cache = DecorationCache::new();
        cache.set_unit_surname(PersonId(1), "dey Molarn".to_string());
        cache.set_free_surname(PersonId(1), "Stormwind".to_string());

        let mut unit_mode = settings();
        unit_mode.surname_mode = SurnameMode::UnitName;
        assert_eq!(
            decorated_name(&cache, &unit_mode, PersonId(1), "Harlaus"),
            "Harlaus dey Molarn"
        );
        assert_eq!(
            decorated_name(&cache, &settings(), PersonId(1), "Harlaus"),
            "Harlaus Stormwind"
        );
    }

    #[test]
    fn test_orphaned_nickname_not_rendered() {
        let cache = DecorationCache::new();
        cache.set_nickname(PersonId(1), "the Great".to_string(), PersonId(1));
        cache.clear_nickname(PersonId(1));

        assert_eq!(
            decorated_name(&cache, &settings(), PersonId(1), "Harlaus"),
            "Harlaus"
        );
    }

    #[test]
    fn test_undecorated_base_untouched() {
        let cache = DecorationCache::new();
        assert_eq!(
            decorated_name(&cache, &settings(), PersonId(1), "Harlaus"),
            "Harlaus"
        );
    }
}
