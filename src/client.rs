//! Unified client for the student face-recognition backend.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
mod policy;
mod recognition;
mod students;

pub use builder::RostroClientBuilder;
pub use core::RostroClient;
