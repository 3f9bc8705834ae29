//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep route/CLI layers decoupled from storage details.

pub mod catalog_service;
