//! Business-logic services, one per entity.
//!
//! Services validate input, enforce business rules, and delegate
//! persistence to the repository layer. Mutating operations take the acting
//! identity explicitly and record it in the audit columns.

pub mod company_service;
pub mod job_service;
pub mod permission_service;
pub mod resume_service;
pub mod role_service;
pub mod subscriber_service;
pub mod user_service;
