//! Engine settings snapshot and the user-editable nickname rule list
//!
//! The host supplies a read-only `EngineSettings` with every resolution
//! pass; nothing in here is a global. Nickname rules live in their own
//! TOML file because they are configuration, not save state.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{NameError, Result};

/// How surnames are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurnameMode {
    /// Surname is the organizational unit's display name, recomputed on
    /// every pass.
    UnitName,
    /// Surname is inherited from spouse/blood relatives or drawn from the
    /// culture name pool, then kept (sticky).
    Free,
}

/// One user-editable nickname rule: a trait category (by name), the minimum
/// level for the suffix to be considered, and the suffix text itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicknameRule {
    pub trait_name: String,
    pub threshold: i32,
    pub suffix: String,
}

impl NicknameRule {
    pub fn new(trait_name: &str, threshold: i32, suffix: &str) -> Self {
        Self {
            trait_name: trait_name.to_string(),
            threshold,
            suffix: suffix.to_string(),
        }
    }
}

/// Read-only settings snapshot consumed on every resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Master toggle for surname decoration
    pub surnames_enabled: bool,
    pub surname_mode: SurnameMode,

    // Per-role eligibility. A person must pass every toggle that applies
    // to them to receive a surname.
    pub surnames_for_rulers: bool,
    pub surnames_for_wanderers: bool,
    pub surnames_for_notables: bool,
    pub surnames_for_minor_factions: bool,

    /// In free mode, wives copy their husband's surname on marriage
    pub wife_inherits_surname: bool,

    pub nicknames_enabled: bool,

    /// Number ordinals within blood relatives (true) or across the whole
    /// unit roster (false)
    pub family_scope: bool,
    /// Include aunts/uncles and cousins of the root in family traversal
    pub include_extended_family: bool,

    /// Generation depths for ordinal numbering
    pub generations_up: u32,
    pub generations_down: u32,

    /// Generation depths for surname inheritance. Deliberately independent
    /// of the numbering depths; the two passes answer different questions.
    pub surname_generations_up: u32,
    pub surname_generations_down: u32,

    pub nickname_rules: Vec<NicknameRule>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            surnames_enabled: true,
            surname_mode: SurnameMode::Free,
            surnames_for_rulers: true,
            surnames_for_wanderers: false,
            surnames_for_notables: false,
            surnames_for_minor_factions: false,
            wife_inherits_surname: true,
            nicknames_enabled: true,
            family_scope: true,
            include_extended_family: true,
            generations_up: 2,
            generations_down: 2,
            surname_generations_up: 10,
            surname_generations_down: 0,
            nickname_rules: default_nickname_rules(),
        }
    }
}

impl EngineSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.generations_up == 0 && self.generations_down == 0 {
            return Err(NameError::InvalidConfig(
                "numbering depths cannot both be zero".into(),
            ));
        }
        if self.generations_up > 50 || self.generations_down > 50 {
            return Err(NameError::InvalidConfig(format!(
                "numbering depths ({}, {}) exceed the supported maximum of 50",
                self.generations_up, self.generations_down
            )));
        }
        if self.surname_generations_up > 50 || self.surname_generations_down > 50 {
            return Err(NameError::InvalidConfig(format!(
                "surname depths ({}, {}) exceed the supported maximum of 50",
                self.surname_generations_up, self.surname_generations_down
            )));
        }
        Ok(())
    }
}

/// First-run nickname rules, matching the shipped `nicknames.toml`
pub fn default_nickname_rules() -> Vec<NicknameRule> {
    vec![
        NicknameRule::new("Honor", 1, "the Honorable"),
        NicknameRule::new("Honor", 2, "the Great"),
        NicknameRule::new("Honor", -2, "the Damned"),
        NicknameRule::new("Honor", -1, "the Inglorious"),
        NicknameRule::new("Valor", 1, "the Brave"),
        NicknameRule::new("Valor", 2, "the Valiant"),
        NicknameRule::new("Valor", -2, "the Treacherous"),
        NicknameRule::new("Valor", -1, "the Weak"),
    ]
}

/// Load nickname rules from a TOML file.
///
/// Falls back to the defaults when the file does not exist. Entries with a
/// missing field are rejected; unknown trait names are accepted here and
/// skipped at selection time.
pub fn load_nickname_rules(path: &Path) -> Result<Vec<NicknameRule>> {
    if !path.exists() {
        return Ok(default_nickname_rules());
    }
    let content = std::fs::read_to_string(path)?;
    parse_nickname_rules(&content)
}

fn parse_nickname_rules(content: &str) -> Result<Vec<NicknameRule>> {
    let toml: toml::Value = content
        .parse()
        .map_err(|e| NameError::InvalidRuleFile(format!("invalid TOML: {}", e)))?;

    let mut rules = Vec::new();
    if let Some(entries) = toml.get("nicknames").and_then(|v| v.as_array()) {
        for entry in entries {
            let trait_name = entry
                .get("trait")
                .and_then(|v| v.as_str())
                .ok_or_else(|| NameError::InvalidRuleFile("nickname entry missing trait".into()))?;
            let threshold = entry
                .get("threshold")
                .and_then(|v| v.as_integer())
                .ok_or_else(|| {
                    NameError::InvalidRuleFile("nickname entry missing threshold".into())
                })?;
            let suffix = entry
                .get("suffix")
                .and_then(|v| v.as_str())
                .ok_or_else(|| NameError::InvalidRuleFile("nickname entry missing suffix".into()))?;
            rules.push(NicknameRule::new(trait_name, threshold as i32, suffix));
        }
    }
    Ok(rules)
}
