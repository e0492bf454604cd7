/// Task-created event message
///
/// After a task is persisted, the task service publishes exactly one of these
/// onto the queue; the worker's listener turns each one into a notification
/// for the task owner.
///
/// # Addressing
///
/// The transport address is fixed: one exchange, one queue (the Redis Stream
/// key), one routing key.
///
/// # Wire Format
///
/// Stream entries carry two fields:
/// ```text
/// routing_key: "task.created"
/// payload: "{\"taskId\":\"...\",\"title\":\"...\",...}"
/// ```
/// The payload JSON uses camelCase field names:
/// {taskId, title, description, userId, creationDate, targetDate}.
///
/// # Example
///
/// ```
/// use taskpulse_shared::events::task_created::{
///     deserialize_message, serialize_message, TaskCreatedMessage,
/// };
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let message = TaskCreatedMessage {
///     task_id: Uuid::new_v4(),
///     title: "Write report".to_string(),
///     description: "Quarterly numbers".to_string(),
///     user_id: Uuid::new_v4(),
///     creation_date: Utc::now(),
///     target_date: Utc::now(),
/// };
///
/// let fields = serialize_message(&message)?;
/// let roundtrip = deserialize_message(&fields)?;
/// assert_eq!(message.task_id, roundtrip.task_id);
/// # Ok(())
/// # }
/// ```

use crate::models::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Exchange name of the task-created transport
pub const TASK_CREATED_EXCHANGE: &str = "task.created.exchange";

/// Queue name of the task-created transport; doubles as the stream key
pub const TASK_CREATED_QUEUE: &str = "task.created.queue";

/// Routing key of the task-created transport
pub const TASK_CREATED_ROUTING_KEY: &str = "task.created";

/// Message serialization errors
#[derive(Error, Debug)]
pub enum MessageError {
    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Event emitted after a task has been persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreatedMessage {
    /// ID of the created task
    pub task_id: Uuid,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,

    /// Owning user
    pub user_id: Uuid,

    /// When the task was created
    pub creation_date: DateTime<Utc>,

    /// When the task is due
    pub target_date: DateTime<Utc>,
}

impl TaskCreatedMessage {
    /// Builds the message for a freshly persisted task
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            user_id: task.user_id,
            creation_date: task.created_at,
            target_date: task.target_date,
        }
    }
}

/// Serializes a message to Redis Stream field-value pairs
pub fn serialize_message(
    message: &TaskCreatedMessage,
) -> Result<HashMap<String, String>, MessageError> {
    let mut fields = HashMap::new();

    fields.insert(
        "routing_key".to_string(),
        TASK_CREATED_ROUTING_KEY.to_string(),
    );
    fields.insert("payload".to_string(), serde_json::to_string(message)?);

    Ok(fields)
}

/// Deserializes a message from Redis Stream field-value pairs
///
/// # Errors
///
/// Returns an error if the payload field is missing or its JSON is malformed.
pub fn deserialize_message(
    fields: &HashMap<String, String>,
) -> Result<TaskCreatedMessage, MessageError> {
    let payload = fields
        .get("payload")
        .ok_or_else(|| MessageError::MissingField("payload".to_string()))?;

    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> TaskCreatedMessage {
        TaskCreatedMessage {
            task_id: Uuid::new_v4(),
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            user_id: Uuid::new_v4(),
            creation_date: Utc::now(),
            target_date: Utc::now(),
        }
    }

    #[test]
    fn test_wire_fields_are_camel_case() {
        let message = sample_message();
        let json = serde_json::to_value(&message).unwrap();

        assert!(json.get("taskId").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("creationDate").is_some());
        assert!(json.get("targetDate").is_some());
        assert!(json.get("task_id").is_none());
    }

    #[test]
    fn test_serialize_sets_routing_key() {
        let fields = serialize_message(&sample_message()).unwrap();
        assert_eq!(
            fields.get("routing_key").map(String::as_str),
            Some(TASK_CREATED_ROUTING_KEY)
        );
        assert!(fields.contains_key("payload"));
    }

    #[test]
    fn test_round_trip() {
        let message = sample_message();
        let fields = serialize_message(&message).unwrap();
        let roundtrip = deserialize_message(&fields).unwrap();
        assert_eq!(message, roundtrip);
    }

    #[test]
    fn test_missing_payload_rejected() {
        let fields = HashMap::new();
        let error = deserialize_message(&fields).unwrap_err();
        assert!(matches!(error, MessageError::MissingField(_)));
    }

    #[test]
    fn test_malformed_payload_rejected() {
        let mut fields = HashMap::new();
        fields.insert("payload".to_string(), "{not json".to_string());
        let error = deserialize_message(&fields).unwrap_err();
        assert!(matches!(error, MessageError::JsonError(_)));
    }
}
