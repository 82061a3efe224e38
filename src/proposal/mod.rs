//! Templated proposal text generation

pub mod generator;
