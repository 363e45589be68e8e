//! jsondocx CLI - Command-line interface library
//!
//! - Render: Compile a JSON document definition to DOCX
//! - Check: Validate a definition without writing anything
//!
//! # Binary Usage
//!
//! ```bash
//! # Render a definition next to its source
//! jsondocx render report.json
//!
//! # Choose the output and generator options
//! jsondocx render report.json --output out/final.docx --config jsondocx.toml
//!
//! # Validate only
//! jsondocx check report.json --format json
//! ```

pub mod app;

pub use app::{check_command, render_command, run_cli, summarize, DefinitionSummary, OutputFormat};
