//! Link commands

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::{json, Value};

use super::output::Output;
use crate::domain::{Link, LinkField};
use crate::link_type::LinkTypeRegistry;
use crate::storage::Project;

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Resolve a link to its text, URL and element
    Resolve {
        /// Link type (site, url, entry, ...)
        link_type: String,

        /// Link value; a JSON list like `[10]` is passed through as a list
        value: String,

        /// Field the link belongs to
        #[arg(long)]
        field: Option<String>,

        /// Extra query string merged into the URL
        #[arg(long)]
        query: Option<String>,

        /// Fragment replacing the URL's fragment
        #[arg(long)]
        fragment: Option<String>,

        /// Custom link text
        #[arg(long)]
        text: Option<String>,

        /// Also resolve unpublished elements
        #[arg(long)]
        ignore_status: bool,
    },

    /// Validate a link value against a field
    Validate {
        /// Link type
        link_type: String,

        /// Link value (empty if omitted)
        value: Option<String>,

        /// Field to validate against
        #[arg(long)]
        field: String,
    },

    /// Render the input control of a link type
    Input {
        /// Link type
        link_type: String,

        /// Current value
        value: Option<String>,

        /// Field the control belongs to
        #[arg(long)]
        field: String,
    },

    /// Render the settings control of a link type
    Settings {
        /// Link type
        link_type: String,

        /// Field whose settings are shown
        #[arg(long)]
        field: String,
    },
}

pub fn run(cmd: LinkCommands, output: &Output, project: Option<&Path>) -> Result<()> {
    let project = Project::open_from(project)?;
    let registry = project.registry()?;

    match cmd {
        LinkCommands::Resolve {
            link_type,
            value,
            field,
            query,
            fragment,
            text,
            ignore_status,
        } => {
            let field = match field {
                Some(handle) => project.field(&handle)?.clone(),
                None => LinkField::new("link"),
            };

            let mut link = registry.link_from_input(&field, &link_type, parse_value(Some(value)))?;
            link.query = query;
            link.fragment = fragment;
            link.custom_text = text;

            resolve(output, &registry, &link, ignore_status)
        }
        LinkCommands::Validate {
            link_type,
            value,
            field,
        } => {
            let field = project.field(&field)?;
            let link = build_link(&registry, &link_type, parse_value(value));
            validate(output, &registry, field, &link)
        }
        LinkCommands::Input {
            link_type,
            value,
            field,
        } => {
            let field = project.field(&field)?;
            let link = build_link(&registry, &link_type, parse_value(value));
            let html = registry
                .get(&link_type)
                .with_context(|| format!("Unknown link type: {}", link_type))?
                .input_html(&link_type, field, &link, None);

            print_html(output, &link_type, &html);
            Ok(())
        }
        LinkCommands::Settings { link_type, field } => {
            let mut field = project.field(&field)?.clone();
            registry.normalize_settings(&mut field);

            let html = registry
                .get(&link_type)
                .with_context(|| format!("Unknown link type: {}", link_type))?
                .settings_html(&link_type, &field);

            print_html(output, &link_type, &html);
            Ok(())
        }
    }
}

/// Reads a command-line value. JSON lists are parsed; everything else stays
/// a string.
fn parse_value(raw: Option<String>) -> Option<Value> {
    let raw = raw?;
    if raw.trim_start().starts_with('[') {
        if let Ok(list @ Value::Array(_)) = serde_json::from_str::<Value>(&raw) {
            return Some(list);
        }
    }
    Some(Value::String(raw))
}

/// Builds a link, normalising the value when the type is known
fn build_link(registry: &LinkTypeRegistry, link_type: &str, raw: Option<Value>) -> Link {
    let value = match registry.get(link_type) {
        Some(known) => known.link_value(raw),
        None => raw,
    };

    Link {
        value,
        ..Link::empty(link_type)
    }
}

fn resolve(
    output: &Output,
    registry: &LinkTypeRegistry,
    link: &Link,
    ignore_status: bool,
) -> Result<()> {
    let empty = registry.is_empty(link);
    let text = registry.text(link);
    let url = registry.url(link);
    let element = registry.element(link, ignore_status);

    if output.is_json() {
        output.data(&json!({
            "type": link.link_type,
            "value": link.value,
            "empty": empty,
            "text": text,
            "url": url,
            "element": element,
        }));
    } else {
        output.field("Type", Some(&link.link_type));
        output.field("Empty", Some(if empty { "yes" } else { "no" }));
        output.field("Text", text.as_deref());
        output.field("URL", url.as_deref());
        let element = element.map(|e| format!("{} #{} ({})", e.kind, e.id, e.title));
        output.field("Element", element.as_deref());
    }

    Ok(())
}

fn validate(
    output: &Output,
    registry: &LinkTypeRegistry,
    field: &LinkField,
    link: &Link,
) -> Result<()> {
    let errors = registry.validate(field, link);

    if output.is_json() {
        output.data(&json!({
            "valid": errors.is_empty(),
            "errors": errors,
        }));
    } else if errors.is_empty() {
        output.success(&format!("Valid {} link for field '{}'", link.link_type, field.handle));
    } else {
        for error in &errors {
            println!("{}: {}", error.field, error.message);
        }
    }

    if !errors.is_empty() {
        anyhow::bail!("Validation failed for field '{}'", field.handle);
    }

    Ok(())
}

fn print_html(output: &Output, link_type: &str, html: &str) {
    if output.is_json() {
        output.data(&json!({
            "type": link_type,
            "html": html,
        }));
    } else {
        print!("{}", html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lists_and_strings() {
        assert_eq!(parse_value(Some("[10]".to_string())), Some(json!([10])));
        assert_eq!(parse_value(Some("10".to_string())), Some(json!("10")));
        assert_eq!(parse_value(Some("[oops".to_string())), Some(json!("[oops")));
        assert_eq!(parse_value(None), None);
    }
}
