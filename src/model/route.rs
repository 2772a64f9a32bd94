use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Task-taking mode, selected by the path segment before the task id.
///
/// Unknown tokens are carried through as `Other` — a route guard upstream
/// decides whether they are valid, not this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskType {
    /// Labeling a task's questions
    Task,
    /// Auditing submitted answers
    Audit,
    /// Previewing an unstarted task
    Preview,
    /// Read-only view of all questions
    Review,
    /// Read-only view of one labeler's work
    ReviewTask,
    /// Read-only view of one auditor's work
    ReviewAudit,
    /// Unrecognized token, passed through verbatim
    Other(String),
}

impl TaskType {
    /// The path token for this type
    pub fn as_str(&self) -> &str {
        match self {
            TaskType::Task => "task",
            TaskType::Audit => "audit",
            TaskType::Preview => "preview",
            TaskType::Review => "review",
            TaskType::ReviewTask => "review_task",
            TaskType::ReviewAudit => "review_audit",
            TaskType::Other(s) => s,
        }
    }

    /// Parse a path token into a type
    pub fn from_token(token: &str) -> TaskType {
        match token {
            "task" => TaskType::Task,
            "audit" => TaskType::Audit,
            "preview" => TaskType::Preview,
            "review" => TaskType::Review,
            "review_task" => TaskType::ReviewTask,
            "review_audit" => TaskType::ReviewAudit,
            other => TaskType::Other(other.to_string()),
        }
    }
}

impl Default for TaskType {
    fn default() -> Self {
        TaskType::Task
    }
}

/// Record filter for the question list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Processing,
    Completed,
    Discarded,
}

impl RecordStatus {
    pub fn from_token(token: &str) -> Option<RecordStatus> {
        match token {
            "processing" => Some(RecordStatus::Processing),
            "completed" => Some(RecordStatus::Completed),
            "discarded" => Some(RecordStatus::Discarded),
            _ => None,
        }
    }
}

/// Question scope filter: everything, flagged-as-problem, or a custom range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    All,
    Problem,
    Customize,
}

impl QuestionType {
    pub fn from_token(token: &str) -> Option<QuestionType> {
        match token {
            "all" => Some(QuestionType::All),
            "problem" => Some(QuestionType::Problem),
            "customize" => Some(QuestionType::Customize),
            _ => None,
        }
    }
}

/// Display kind: absent means single-question mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    WithDuplicate,
}

impl Kind {
    pub fn from_token(token: &str) -> Option<Kind> {
        match token {
            "with_duplicate" => Some(Kind::WithDuplicate),
            _ => None,
        }
    }
}

/// Well-known query keys
pub mod keys {
    pub const FLOW_INDEX: &str = "flow_index";
    pub const USER_ID: &str = "user_id";
    pub const RECORD_STATUS: &str = "record_status";
    pub const IS_SEARCH: &str = "is_search";
    pub const DATA_ID: &str = "data_id";
    pub const QUESTIONNAIRE_ID: &str = "questionnaire_id";
    pub const QUESTION_TYPE: &str = "question_type";
    pub const KIND: &str = "kind";
}

/// Ordered query-parameter mapping. Insertion order is preserved so that
/// re-serialized URLs keep their keys where the caller put them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryMap(IndexMap<String, String>);

impl QueryMap {
    pub fn new() -> QueryMap {
        QueryMap(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        self.0.shift_remove(key);
    }

    /// Merge a patch: `Some` values are set, `None` values remove the key.
    /// Keys not mentioned in the patch are left untouched.
    pub fn merge<'a, I>(&mut self, patch: I)
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        for (key, value) in patch {
            match value {
                Some(v) => self.insert(key, v),
                None => self.remove(key),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The route state of a task-taking session: a path (kept verbatim) with
/// the type and task id derived from it, plus the query mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteState {
    /// Path portion of the URL, preserved verbatim across query updates
    pub path: String,
    /// Derived from the path segment before the task id
    pub task_type: TaskType,
    /// Derived from the last path segment
    pub task_id: String,
    /// Query mapping
    pub query: QueryMap,
}

impl RouteState {
    /// True for the auditing modes
    pub fn is_audit(&self) -> bool {
        matches!(self.task_type, TaskType::Audit | TaskType::ReviewAudit)
    }

    /// True for the read-only modes
    pub fn is_preview(&self) -> bool {
        matches!(
            self.task_type,
            TaskType::Preview | TaskType::Review | TaskType::ReviewTask | TaskType::ReviewAudit
        )
    }

    pub fn flow_index(&self) -> Option<&str> {
        self.query.get(keys::FLOW_INDEX)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.query.get(keys::USER_ID)
    }

    pub fn record_status(&self) -> Option<RecordStatus> {
        self.query
            .get(keys::RECORD_STATUS)
            .and_then(RecordStatus::from_token)
    }

    pub fn question_type(&self) -> Option<QuestionType> {
        self.query
            .get(keys::QUESTION_TYPE)
            .and_then(QuestionType::from_token)
    }

    pub fn kind(&self) -> Option<Kind> {
        self.query.get(keys::KIND).and_then(Kind::from_token)
    }

    /// Truthy reading of the `is_search` flag
    pub fn is_search(&self) -> bool {
        match self.query.get(keys::IS_SEARCH) {
            Some("") | Some("0") | Some("false") | None => false,
            Some(_) => true,
        }
    }
}
