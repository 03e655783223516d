//! Huddle Gateway Service Library
//!
//! This library provides the core functionality for the Huddle gateway -
//! a thin HTTP service that fronts a hosted real-time media provider:
//!
//! - Join credential issuance (`POST /token`)
//! - Advisory room directory (`GET /rooms`)
//! - Liveness probe (`GET /health`)
//!
//! The media transport itself (SFU routing, codec negotiation, NAT
//! traversal) is owned entirely by the provider; this service only signs
//! provider-compatible access tokens and proxies the room list.
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `models` - Request/response types
//! - `routes` - Axum router setup
//! - `services` - Token signing and provider room-service client

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
