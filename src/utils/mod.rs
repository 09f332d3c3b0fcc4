//! Utility functions

pub mod domain;
