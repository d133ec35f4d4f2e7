//! API layer for HTTP request handling and data models.
//!
//! This module contains the JSON API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Projects** (`/api/projects/`): ownership-scoped CRUD
//! - **Preferences** (`/api/preferences/`): per-user UI state
//! - **Health** (`/api/health/`): unauthenticated liveness check
//!
//! The server-rendered page surface lives in [`crate::pages`]; both
//! surfaces share the repositories underneath.
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using
//! `utoipa`. API documentation is available at `/docs` when the
//! server is running.

pub mod handlers;
pub mod models;
