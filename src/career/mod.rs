// SPDX-License-Identifier: MIT

pub mod chat;
pub mod config;
pub mod graph;
pub mod render;
pub mod server;
pub mod workflow;
