//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate guard and repository calls into the task-store API.
//! - Keep channel/view layers decoupled from storage details.

pub mod task_service;
