//! Core types for resdeps
//!
//! This module holds the vocabulary shared by every other part of the crate:
//!
//! - [`ResError`], [`ErrorContext`] and [`user_friendly_error`] - error handling
//! - [`ResourceType`] - a resource type definition (paths, extensions, flags)
//! - [`TypeProperty`] / [`ListProperty`] - the configurable keys of a type definition
//! - [`ResourceRef`] - a parsed group member (`name`, `!name`, `type:name`, `!type:name`)

pub mod error;
pub mod resource;
pub mod resource_ref;

pub use error::{ErrorContext, ResError, user_friendly_error};
pub use resource::{ListProperty, ResourceType, TypeProperty};
pub use resource_ref::ResourceRef;
