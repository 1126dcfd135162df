//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup and listings | `init`, `types`, `sites` |
//! | Link | Work with link values | `link resolve`, `link validate`, `link input` |
//! | Url | URL inspection | `url show`, `url edit` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr; `RUST_LOG` overrides it:
//! ```bash
//! linkfield --verbose link resolve site 2
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod link_cmd;
mod output;
mod types_cmd;
mod url_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
