//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models;
//! secret-bearing columns are never serialized into responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: i64,
    pub gender: String,
    pub address: String,
    pub role_id: Option<String>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Payload for self-service registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(range(min = 1, max = 150, message = "Age must be between 1-150"))]
    pub age: i64,

    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

/// Payload for admin-side user creation; unlike registration the role is
/// chosen by the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNewUser {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(range(min = 1, max = 150, message = "Age must be between 1-150"))]
    pub age: i64,

    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    pub role_id: Option<String>,
}

/// Fully-resolved insert row for the users table.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i64,
    pub gender: String,
    pub address: String,
    pub role_id: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 1, max = 150, message = "Age must be between 1-150"))]
    pub age: Option<i64>,

    pub gender: Option<String>,
    pub address: Option<String>,
    pub role_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRole {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub is_active: Option<bool>,

    /// Permission ids granted to the new role.
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRole {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,
    pub is_active: Option<bool>,

    /// When present, replaces the role's permission grants.
    pub permissions: Option<Vec<String>>,
}

/// Role detail projection with its permission grants populated.
#[derive(Debug, Clone, Serialize)]
pub struct RoleWithPermissions {
    #[serde(flatten)]
    pub role: Role,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    pub id: String,
    pub name: String,
    pub api_path: String,
    pub method: String,
    pub module: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePermission {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "API path is required"))]
    pub api_path: String,

    #[validate(length(min = 1, message = "Method is required"))]
    pub method: String,

    #[validate(length(min = 1, message = "Module is required"))]
    pub module: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePermission {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: Option<String>,

    pub api_path: Option<String>,
    pub method: Option<String>,
    pub module: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    pub logo: Option<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCompany {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub logo: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCompany {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: Option<String>,

    pub address: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: String,
    pub name: String,
    pub skills: Json<Vec<String>>,
    pub company_id: String,
    pub company_name: String,
    pub location: String,
    pub salary: i64,
    pub quantity: i64,
    pub level: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Company reference embedded in job payloads.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanyRef {
    #[validate(length(min = 1, message = "Company id is required"))]
    pub id: String,

    #[validate(length(min = 1, message = "Company name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJob {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "At least one skill is required"))]
    pub skills: Vec<String>,

    #[validate(nested)]
    pub company: CompanyRef,

    pub location: String,

    #[validate(range(min = 0, message = "Salary must not be negative"))]
    pub salary: i64,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,

    #[validate(length(min = 1, message = "Level is required"))]
    pub level: String,

    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateJob {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: Option<String>,

    pub skills: Option<Vec<String>>,
    pub location: Option<String>,

    #[validate(range(min = 0, message = "Salary must not be negative"))]
    pub salary: Option<i64>,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i64>,

    pub level: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: String,
    pub email: String,
    pub user_id: String,
    pub url: String,
    pub status: String,
    pub company_id: String,
    pub job_id: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Payload for a user submitting their own CV; email and user id come from
/// the authenticated identity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserCv {
    #[validate(length(min = 1, message = "Url is required"))]
    pub url: String,

    #[validate(length(min = 1, message = "Company id is required"))]
    pub company_id: String,

    #[validate(length(min = 1, message = "Job id is required"))]
    pub job_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscriber {
    pub id: String,
    pub name: String,
    pub email: String,
    pub skills: Json<Vec<String>>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubscriber {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Must be a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "At least one skill is required"))]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSubscriber {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1-255 characters"))]
    pub name: Option<String>,

    pub skills: Option<Vec<String>>,
}
