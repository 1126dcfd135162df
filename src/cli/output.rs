//! Output formatting for CLI commands

use serde::Serialize;

pub use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        let json = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };

        match json {
            Ok(json) => println!("{}", json),
            Err(err) => tracing::error!(error = %err, "Failed to serialize output"),
        }
    }

    /// Prints a `label: value` line (text only)
    pub fn field(&self, label: &str, value: Option<&str>) {
        if self.is_text() {
            println!("{:<10} {}", format!("{}:", label), value.unwrap_or("-"));
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Returns true if using text format
    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }

    /// Logs a debug message (shown with --verbose or RUST_LOG=debug)
    pub fn verbose(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    /// Logs a debug message for a command
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        tracing::debug!(command = context, "{}", message);
    }
}
