// SPDX-License-Identifier: MIT

//! Text generation layer
//!
//! - [model] - the provider-facing `Model` trait and its Gemini implementation
//! - [generator] - `TextGenerator`, the prompt-in/text-out adapter used by the workflow

pub mod generator;
pub mod model;

pub use generator::TextGenerator;
pub use model::{Content, GenerationConfig, Model, Part};
