//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the entity CRUD domains,
//! excluding core authentication routes which are handled separately.

pub mod common;
pub mod company;
pub mod job;
pub mod permission;
pub mod resume;
pub mod role;
pub mod subscriber;
pub mod user;
