//! Core pipeline and domain logic for refbuilder.
//!
//! This crate ties together API list parsing, markdown rendering, and
//! reference assembly into the end-to-end `build_reference` workflow.

pub mod assembler;
pub mod parser;
pub mod pipeline;
pub mod render;
