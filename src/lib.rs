//! # Skiss
//!
//! `Skiss` turns a short plain-text process description into a Business
//! Process Model and Notation (BPMN) 2.0 file that any bpmn.io style viewer
//! can open.
//!
//! - Numbered lines become tasks, conditional lines become gateways.
//! - Participants are resolved from the task text and grouped into pools
//!   with lanes.
//! - The output carries a diagram interchange section, so it renders without
//!   an auto-layout step.
//! - A second mode inspects existing BPMN files before handing them to a
//!   rendering adapter.
//!
//! This is a rule-based extractor, not natural language understanding: the
//! output is always one linear chain of elements between a start and an end
//! event.
//!
//! ## Example
//!
//! ### Cargo.toml
//! ```toml
//! [dependencies]
//! skiss = "0.3"
//! log = "0.4"
//! pretty_env_logger = "0.5"
//! ```
//! ### main.rs
//!
//! ```
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     pretty_env_logger::init();
//!
//!     let description = "\
//! 1. Клиент оформляет заказ
//! 2. Менеджер проверяет заказ
//! Если заказ одобрен, работа продолжается";
//!
//!     let output = skiss::generate(description)?;
//!
//!     println!("{}", output.xml);
//!     println!("tasks: {}", output.model.tasks.len());
//!     Ok(())
//! }
//! ```

mod analyze;
mod api;
mod error;
mod generator;
mod model;
mod viewer;
mod writer;

pub use api::{AnalysisStage, GeneratedBpmn, Renderer};
pub use error::{Error, Result};
pub use generator::{generate, generate_with_progress};
pub use model::{Decision, GatewayType, Lane, MessageFlow, Pool, ProcessModel, Task, TaskType};
pub use viewer::{DiagramSummary, display, inspect};
