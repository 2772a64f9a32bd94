use crate::io::store::KvStore;

/// A named id list. The two lists drive the two navigation axes of a
/// task-taking session: individual questions and whole questionnaires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum IdKey {
    /// Question ids (`data_id`)
    #[value(name = "data_id")]
    DataId,
    /// Questionnaire ids (`questionnaire_id`)
    #[value(name = "questionnaire_id")]
    QuestionnaireId,
}

impl IdKey {
    pub const ALL: [IdKey; 2] = [IdKey::DataId, IdKey::QuestionnaireId];

    /// The storage key for this list
    pub fn as_str(self) -> &'static str {
        match self {
            IdKey::DataId => "data_id",
            IdKey::QuestionnaireId => "questionnaire_id",
        }
    }
}

/// Save a raw newline-delimited block of ids under `key`, replacing any
/// prior list. Lines are trimmed and blank lines dropped; order is kept.
pub fn save_ids(store: &mut dyn KvStore, key: IdKey, raw: &str) {
    let ids: Vec<&str> = raw
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    // Vec<&str> to JSON array never fails
    let encoded = serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string());
    store.set(key.as_str(), encoded);
}

/// The persisted list for `key`. Absent or malformed values read as empty.
pub fn get_ids(store: &dyn KvStore, key: IdKey) -> Vec<String> {
    store
        .get(key.as_str())
        .and_then(|value| serde_json::from_str(&value).ok())
        .unwrap_or_default()
}

/// Drop both lists. Called on task exit; idempotent.
pub fn clear_ids(store: &mut dyn KvStore) {
    for key in IdKey::ALL {
        store.remove(key.as_str());
    }
}
