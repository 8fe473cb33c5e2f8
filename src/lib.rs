//! CourseKit - the data model behind a lesson "course builder"
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Lesson Model
//! - [`component`] - Component ids, types, typed data, patches and quizzes
//! - [`factory`] - Default data per component type and the palette
//! - [`ids`] - Component and quiz option id generation
//!
//! ## State Management
//! - [`store`] - The course builder: ordered components and selection
//! - [`snapshot`] - Serializable snapshots and JSON persistence
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Lesson Model
// ============================================================================
pub mod component;
pub mod factory;
pub mod ids;

// ============================================================================
// State Management
// ============================================================================
pub mod snapshot;
pub mod store;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;

pub use component::{Component, ComponentData, ComponentId, ComponentPatch, ComponentType};
pub use error::{BuilderError, Result};
pub use store::CourseBuilder;
