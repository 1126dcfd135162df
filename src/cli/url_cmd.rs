//! URL commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::Url;

#[derive(Subcommand)]
pub enum UrlCommands {
    /// Show the components of a URL
    Show {
        /// URL to inspect
        url: String,
    },

    /// Edit the query and fragment of a URL
    Edit {
        /// URL to edit
        url: String,

        /// Set a query parameter (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Remove a query parameter (repeatable)
        #[arg(long = "remove", value_name = "KEY")]
        remove: Vec<String>,

        /// Drop the existing query before applying --set
        #[arg(long)]
        clear_query: bool,

        /// Replace the fragment
        #[arg(long, conflicts_with = "clear_fragment")]
        fragment: Option<String>,

        /// Remove the fragment
        #[arg(long)]
        clear_fragment: bool,
    },
}

pub fn run(cmd: UrlCommands, output: &Output) -> Result<()> {
    match cmd {
        UrlCommands::Show { url } => show(output, &url),
        UrlCommands::Edit {
            url,
            set,
            remove,
            clear_query,
            fragment,
            clear_fragment,
        } => {
            let edit = Edit {
                set,
                remove,
                clear_query,
                fragment,
                clear_fragment,
            };
            let edited = edit.apply(Url::parse(&url))?;
            output.verbose_ctx("url", &format!("{} -> {}", url, edited));

            if output.is_json() {
                output.data(&serde_json::json!({ "url": edited.to_string() }));
            } else {
                println!("{}", edited);
            }
            Ok(())
        }
    }
}

fn show(output: &Output, raw: &str) -> Result<()> {
    let url = Url::parse(raw);
    let query = url.query();

    if output.is_json() {
        output.data(&serde_json::json!({
            "url": url.to_string(),
            "scheme": url.scheme(),
            "user": url.user(),
            "pass": url.pass(),
            "host": url.host(),
            "port": url.port(),
            "path": url.path(),
            "query": query,
            "fragment": url.fragment(),
        }));
        return Ok(());
    }

    let port = url.port().map(|port| port.to_string());
    output.field("Scheme", url.scheme());
    output.field("User", url.user());
    output.field("Password", url.pass());
    output.field("Host", url.host());
    output.field("Port", port.as_deref());
    output.field("Path", url.path());
    output.field("Query", url.raw_query());
    for (key, value) in query.iter() {
        println!("  {} = {}", key, value);
    }
    output.field("Fragment", url.fragment());

    Ok(())
}

/// Query and fragment changes requested on the command line
#[derive(Debug, Default)]
struct Edit {
    set: Vec<String>,
    remove: Vec<String>,
    clear_query: bool,
    fragment: Option<String>,
    clear_fragment: bool,
}

impl Edit {
    /// Applies the edit. The query is only rewritten when it is touched.
    fn apply(&self, mut url: Url) -> Result<Url> {
        if self.clear_query || !self.set.is_empty() || !self.remove.is_empty() {
            let mut params = if self.clear_query {
                Default::default()
            } else {
                url.query()
            };

            for pair in &self.set {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| anyhow::anyhow!("Invalid --set '{}': expected KEY=VALUE", pair))?;
                params.insert(key, value);
            }
            for key in &self.remove {
                params.remove(key);
            }

            url.set_query(&params);
        }

        if self.clear_fragment {
            url.set_fragment(None);
        } else if let Some(fragment) = &self.fragment {
            url.set_fragment(Some(fragment.as_str()));
        }

        Ok(url)
    }
}
