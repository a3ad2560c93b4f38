//! sopdoc - SOP content engine
//!
//! A hierarchical, typed-content document model for standard operating
//! procedures: tabs select documents, documents own nested sections of typed
//! content blocks. The tree is rendered recursively, edited through explicit
//! index paths, searched with a naive substring scan, and persisted through
//! interchangeable stores (a read-only bundled dataset and a mutable
//! directory store) behind a synchronization controller with optimistic
//! updates and rollback-by-reload.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod content_model;
pub mod controller;
pub mod edit;
pub mod progress;
pub mod render;
pub mod search;
pub mod store;
