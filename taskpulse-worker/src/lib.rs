//! # TaskPulse Worker Library
//!
//! This library provides the asynchronous side of the task backend:
//!
//! - `listener`: consumes task-created events from the queue and creates a
//!   notification for each one
//! - `scheduler`: the periodic overdue scan that marks open tasks past their
//!   target date and notifies their owners

pub mod listener;
pub mod scheduler;
