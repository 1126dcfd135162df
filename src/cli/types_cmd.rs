//! Link type listing

use std::path::Path;
use std::rc::Rc;

use anyhow::Result;

use super::output::Output;
use crate::host::{Aliases, BuiltinTemplates, HostServices, Translations};
use crate::link_type::LinkTypeRegistry;
use crate::storage::{Catalog, Project};

/// Services for listing types outside a project: empty catalog, no aliases
fn standalone_services() -> HostServices {
    let catalog = Rc::new(Catalog::new());
    HostServices::new(
        catalog.clone(),
        catalog,
        Rc::new(BuiltinTemplates),
        Rc::new(Translations::new()),
        Rc::new(Aliases::default()),
    )
}

pub fn run(output: &Output, project: Option<&Path>) -> Result<()> {
    let services = match Project::open_from(project) {
        Ok(project) => project.services()?,
        Err(err) => {
            output.verbose_ctx("types", &format!("Using built-in defaults: {:#}", err));
            standalone_services()
        }
    };

    let registry = LinkTypeRegistry::with_defaults(&services);
    let groups = registry.grouped();

    if output.is_json() {
        let items: Vec<_> = groups
            .iter()
            .map(|group| {
                serde_json::json!({
                    "group": group.name,
                    "types": group.types.iter().map(|(name, link_type)| {
                        serde_json::json!({
                            "name": name,
                            "display_name": link_type.display_name(),
                            "default_settings": link_type.default_settings(),
                        })
                    }).collect::<Vec<_>>(),
                })
            })
            .collect();
        output.data(&items);
    } else {
        for group in &groups {
            println!("{}", group.name);
            for (name, link_type) in &group.types {
                println!("  {:<12} {}", name, link_type.display_name());
            }
        }
    }

    Ok(())
}
