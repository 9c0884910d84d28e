// SPDX-License-Identifier: MIT

pub mod career;
pub mod error;
pub mod llm;
