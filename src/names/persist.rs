//! Save-state records for succession histories and free-mode surnames
//!
//! Serialization is verbatim: ordered lists of plain records. On load the
//! keyed maps are re-derived, silently dropping records whose realm or
//! person no longer resolves.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{PersonId, RealmId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessionRecord {
    pub realm: RealmId,
    pub rulers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurnameRecord {
    pub person: PersonId,
    pub surname: String,
}

/// Everything the engine persists across save/load boundaries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub histories: Vec<SuccessionRecord>,
    pub surnames: Vec<SurnameRecord>,
}

impl SaveData {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let data = SaveData {
            histories: vec![SuccessionRecord {
                realm: RealmId(1),
                rulers: vec!["Harlaus".to_string(), "Harlaus II".to_string()],
            }],
            surnames: vec![SurnameRecord {
                person: PersonId(7),
                surname: "Stormwind".to_string(),
            }],
        };

        let json = data.to_json().unwrap();
        let restored = SaveData::from_json(&json).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(SaveData::from_json("not json").is_err());
    }
}
