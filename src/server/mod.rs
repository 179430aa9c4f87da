//! Licence validation backend.
//!
//! This module contains the complete backend implementation: the licence consumption
//! guard, the administrative licence API, data access, and the optional Discord bot.
//! The backend uses Axum as the web framework, SeaORM for database operations, and
//! Serenity for Discord bot integration.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Licence guard and administrative business logic
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Admin authentication and rate limiting
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Clock** (`clock`) - Injectable time source for expiry checks
//! - **State** (`state`) - Shared application state
//! - **Startup** (`startup`) - Tracing, database initialization and serving
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Bot** (`bot/`) - Discord bot with the `/license` lookup command
//!
//! # Request Flow
//!
//! A typical request flows through these layers:
//!
//! 1. **Router** receives HTTP request, applies rate limiting, and routes to a controller
//! 2. **Controller** checks admin access or resolves the client IP, converts DTOs to params
//! 3. **Service** executes business logic, orchestrates data operations
//! 4. **Data** queries database, converts entities to domain models
//! 5. **Controller** converts domain model to DTO, returns HTTP response

pub mod bot;
pub mod clock;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
