//! Core library for seotools
//!
//! This crate implements the **Functional Core** of the seotools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The seotools project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`seotools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`seotools`**: I/O operations and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! The core crate is organized by analysis stage:
//!
//! - [`document`]: Fact extraction from an already-fetched HTML string
//! - [`headings`]: Heading hierarchy reconstruction and issue detection
//! - [`page`]: Per-category sub-analyses and full page analysis assembly
//! - [`score`]: The composite weighted scoring model
//! - [`config`]: Thresholds and category weights, owned by the caller
//!
//! Each module contains:
//!
//! - **Domain models**: Structured types representing extracted facts and outputs
//! - **Transformation functions**: Pure functions that convert facts to analyses
//! - **Comprehensive tests**: Unit tests using fixture data (no mocking)
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use seotools_core::headings::{analyze_headings, HeadingLevel, HeadingObservation};
//!
//! // Create fixture data (no HTTP required)
//! let flat = vec![
//!     HeadingObservation {
//!         level: HeadingLevel::H1,
//!         text: "Welcome".to_string(),
//!         order: 1,
//!     },
//! ];
//!
//! // Transform using pure function
//! let analysis = analyze_headings(flat, Some("welcome"), 1);
//!
//! // Assert on results (no mocking needed)
//! assert_eq!(analysis.heading_tree.len(), 1);
//! assert!(analysis.issues.is_empty());
//! ```
//!
//! # Pattern Reference
//!
//! This architecture is based on Gary Bernhardt's Functional Core, Imperative Shell pattern.
//! The key insight: **data transformation logic should be pure and ignorant of where data
//! comes from or where it goes**.

pub mod config;
pub mod document;
pub mod headings;
pub mod page;
pub mod score;
