/// Event types and wire serialization
///
/// This module defines the task-created message that flows from the API
/// server to the worker, together with its Redis Stream wire format and the
/// fixed addressing constants.

pub mod task_created;

// Re-export common types
pub use task_created::{
    deserialize_message, serialize_message, MessageError, TaskCreatedMessage,
    TASK_CREATED_EXCHANGE, TASK_CREATED_QUEUE, TASK_CREATED_ROUTING_KEY,
};
