//! Built-in templates for link type inputs and settings
//!
//! Each template reads its variables from a JSON object and produces an
//! HTML fragment. A missing variable is a [`RenderError`], which link types
//! turn into fallback markup.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use serde_json::Value;

use super::{RenderError, TemplateRenderer};

/// Select box input (sites)
pub const INPUT_SELECT: &str = "linkfield/input-select";

/// Text input (url, email, tel, custom)
pub const INPUT_TEXT: &str = "linkfield/input-text";

/// Element picker input (entries, assets, ...)
pub const INPUT_ELEMENT: &str = "linkfield/input-element";

/// Site link settings
pub const SETTINGS_SITE: &str = "linkfield/settings-site";

/// Input link settings
pub const SETTINGS_INPUT: &str = "linkfield/settings-input";

/// Element link settings
pub const SETTINGS_ELEMENT: &str = "linkfield/settings-element";

/// Renderer for the templates shipped with the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateRenderer for BuiltinTemplates {
    fn render(&self, template: &str, vars: &Value) -> Result<String, RenderError> {
        let vars = Vars { template, vars };

        match template {
            INPUT_SELECT => input_select(&vars),
            INPUT_TEXT => input_text(&vars),
            INPUT_ELEMENT => input_element(&vars),
            SETTINGS_SITE => settings_site(&vars),
            SETTINGS_INPUT => settings_input(&vars),
            SETTINGS_ELEMENT => settings_element(&vars),
            _ => Err(RenderError::NotFound(template.to_string())),
        }
    }
}

/// Variable access with template-aware errors
struct Vars<'a> {
    template: &'a str,
    vars: &'a Value,
}

impl<'a> Vars<'a> {
    fn get(&self, name: &str) -> Result<&'a Value, RenderError> {
        self.vars.get(name).ok_or_else(|| self.missing(name))
    }

    fn str(&self, name: &str) -> Result<&'a str, RenderError> {
        self.get(name)?.as_str().ok_or_else(|| self.missing(name))
    }

    fn object(&self, name: &str) -> Result<Vars<'a>, RenderError> {
        let value = self.get(name)?;
        if !value.is_object() {
            return Err(self.missing(name));
        }
        Ok(Vars {
            template: self.template,
            vars: value,
        })
    }

    fn flag(&self, name: &str) -> bool {
        self.vars.get(name).is_some_and(truthy)
    }

    fn missing(&self, name: &str) -> RenderError {
        RenderError::MissingVariable {
            template: self.template.to_string(),
            name: name.to_string(),
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Renders a scalar JSON value as plain text
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn wrapper(link_type_name: &str, selected: bool, inner: &str) -> String {
    format!(
        "<div class=\"linkfield-type\" data-type=\"{}\"{}>\n{}</div>\n",
        attr(link_type_name),
        if selected { "" } else { " hidden" },
        inner
    )
}

fn disabled(options: &Vars<'_>) -> &'static str {
    if options.flag("disabled") {
        " disabled"
    } else {
        ""
    }
}

fn input_select(vars: &Vars<'_>) -> Result<String, RenderError> {
    let name = vars.str("linkTypeName")?;
    let options = vars.object("selectFieldOptions")?;
    let current = options.vars.get("value").cloned().unwrap_or(Value::Null);

    let mut html = format!(
        "  <select id=\"{}\" name=\"{}\"{}>\n",
        attr(options.str("id")?),
        attr(options.str("name")?),
        disabled(&options),
    );

    let items = options.get("options")?.as_array().cloned().unwrap_or_default();
    for item in &items {
        let value = item.get("value").cloned().unwrap_or(Value::Null);
        let label = item.get("label").map(scalar).unwrap_or_default();
        let selected = if !current.is_null() && scalar(&value) == scalar(&current) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "    <option value=\"{}\"{}>{}</option>\n",
            attr(&scalar(&value)),
            selected,
            text(&label)
        ));
    }
    html.push_str("  </select>\n");

    Ok(wrapper(name, vars.flag("isSelected"), &html))
}

fn input_text(vars: &Vars<'_>) -> Result<String, RenderError> {
    let name = vars.str("linkTypeName")?;
    let options = vars.object("textFieldOptions")?;
    let value = options.vars.get("value").map(scalar).unwrap_or_default();
    let placeholder = options.vars.get("placeholder").map(scalar).unwrap_or_default();

    let html = format!(
        "  <input type=\"{}\" id=\"{}\" name=\"{}\" value=\"{}\" placeholder=\"{}\"{}>\n",
        attr(options.str("type")?),
        attr(options.str("id")?),
        attr(options.str("name")?),
        attr(&value),
        attr(&placeholder),
        disabled(&options),
    );

    Ok(wrapper(name, vars.flag("isSelected"), &html))
}

fn input_element(vars: &Vars<'_>) -> Result<String, RenderError> {
    let name = vars.str("linkTypeName")?;
    let options = vars.object("elementFieldOptions")?;

    let sources = match options.get("sources")? {
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(","),
        other => scalar(other),
    };

    let mut html = format!(
        "  <div class=\"elementselect\" id=\"{}\" data-kind=\"{}\" data-sources=\"{}\"{}>\n",
        attr(options.str("id")?),
        attr(options.str("kind")?),
        attr(&sources),
        if options.flag("disabled") { " data-disabled" } else { "" },
    );

    let input_name = options.str("name")?;
    match options.vars.get("element").filter(|e| e.is_object()) {
        Some(element) => {
            let id = element.get("id").map(scalar).unwrap_or_default();
            let title = element.get("title").map(scalar).unwrap_or_default();
            html.push_str(&format!(
                "    <input type=\"hidden\" name=\"{}[]\" value=\"{}\">\n    <span class=\"element-title\">{}</span>\n",
                attr(input_name),
                attr(&id),
                text(&title)
            ));
        }
        None => html.push_str(&format!(
            "    <input type=\"hidden\" name=\"{}\" value=\"\">\n",
            attr(input_name)
        )),
    }
    html.push_str("  </div>\n");

    Ok(wrapper(name, vars.flag("isSelected"), &html))
}

fn fieldset(link_type_name: &str, legend: &str, inner: &str) -> String {
    format!(
        "<fieldset class=\"linkfield-settings\" data-type=\"{}\">\n  <legend>{}</legend>\n{}</fieldset>\n",
        attr(link_type_name),
        text(legend),
        inner
    )
}

fn checkbox(name: &str, value: &str, checked: bool, label: &str) -> String {
    format!(
        "  <label><input type=\"checkbox\" name=\"{}\" value=\"{}\"{}> {}</label>\n",
        attr(name),
        attr(value),
        if checked { " checked" } else { "" },
        text(label)
    )
}

/// Checkbox list for a `"*"` / `""` / list setting
fn selection_list(
    link_type_name: &str,
    setting: &str,
    current: Option<&Value>,
    options: &[(String, String)],
) -> String {
    let all = match current {
        Some(Value::Array(_)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        _ => true,
    };
    let selected: Vec<String> = match current {
        Some(Value::Array(items)) => items.iter().map(scalar).collect(),
        _ => Vec::new(),
    };

    let base = format!("settings[{}][{}]", link_type_name, setting);
    let mut html = checkbox(&base, "*", all, "All");
    for (value, label) in options {
        let checked = all || selected.contains(value);
        html.push_str(&checkbox(&format!("{}[]", base), value, checked, label));
    }
    html
}

fn settings_site(vars: &Vars<'_>) -> Result<String, RenderError> {
    let name = vars.str("linkTypeName")?;
    let settings = vars.object("settings")?;

    let options: Vec<(String, String)> = vars
        .get("siteOptions")?
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    (
                        item.get("value").map(scalar).unwrap_or_default(),
                        item.get("label").map(scalar).unwrap_or_default(),
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    let inner = selection_list(name, "sites", settings.vars.get("sites"), &options);
    Ok(fieldset(name, vars.str("elementName")?, &inner))
}

fn settings_input(vars: &Vars<'_>) -> Result<String, RenderError> {
    let name = vars.str("linkTypeName")?;
    let settings = vars.object("settings")?;

    let mut inner = checkbox(
        &format!("settings[{}][disableValidation]", name),
        "1",
        settings.flag("disableValidation"),
        "Disable validation",
    );
    inner.push_str(&checkbox(
        &format!("settings[{}][allowAliases]", name),
        "1",
        settings.flag("allowAliases"),
        "Allow aliases",
    ));

    Ok(fieldset(name, vars.str("elementName")?, &inner))
}

fn settings_element(vars: &Vars<'_>) -> Result<String, RenderError> {
    let name = vars.str("linkTypeName")?;
    let settings = vars.object("settings")?;

    let options: Vec<(String, String)> = vars
        .get("sourceOptions")?
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| (scalar(item), scalar(item)))
                .collect()
        })
        .unwrap_or_default();

    let inner = selection_list(name, "sources", settings.vars.get("sources"), &options);
    Ok(fieldset(name, vars.str("elementName")?, &inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_template() {
        let err = BuiltinTemplates.render("nope", &json!({})).unwrap_err();
        assert_eq!(err, RenderError::NotFound("nope".to_string()));
    }

    #[test]
    fn missing_variable() {
        let err = BuiltinTemplates
            .render(INPUT_SELECT, &json!({"linkTypeName": "site"}))
            .unwrap_err();

        assert_eq!(
            err,
            RenderError::MissingVariable {
                template: INPUT_SELECT.to_string(),
                name: "selectFieldOptions".to_string(),
            }
        );
    }

    #[test]
    fn select_marks_current_value() {
        let html = BuiltinTemplates
            .render(
                INPUT_SELECT,
                &json!({
                    "isSelected": true,
                    "linkTypeName": "site",
                    "selectFieldOptions": {
                        "disabled": false,
                        "id": "link-site",
                        "name": "link[site]",
                        "options": [
                            {"value": 1, "label": "Main"},
                            {"value": 2, "label": "Norsk & Co"},
                        ],
                        "value": 2,
                    },
                }),
            )
            .unwrap();

        assert!(html.contains("<select id=\"link-site\" name=\"link[site]\">"));
        assert!(html.contains("<option value=\"1\">Main</option>"));
        assert!(html.contains("<option value=\"2\" selected>Norsk &amp; Co</option>"));
        assert!(!html.contains("hidden"));
    }

    #[test]
    fn unselected_type_is_hidden_and_disabled_when_static() {
        let html = BuiltinTemplates
            .render(
                INPUT_TEXT,
                &json!({
                    "isSelected": false,
                    "linkTypeName": "url",
                    "textFieldOptions": {
                        "disabled": true,
                        "id": "link-url",
                        "name": "link[url]",
                        "type": "url",
                        "value": "\"quoted\"",
                    },
                }),
            )
            .unwrap();

        assert!(html.contains("data-type=\"url\" hidden"));
        assert!(html.contains(" disabled>"));
        assert!(html.contains("value=\"&quot;quoted&quot;\""));
    }

    #[test]
    fn settings_lists_checked_sites() {
        let html = BuiltinTemplates
            .render(
                SETTINGS_SITE,
                &json!({
                    "linkTypeName": "site",
                    "elementName": "Site",
                    "settings": {"sites": [2]},
                    "siteOptions": [
                        {"value": 1, "label": "Main"},
                        {"value": 2, "label": "Norsk"},
                    ],
                }),
            )
            .unwrap();

        assert!(html.contains("<legend>Site</legend>"));
        assert!(html.contains("value=\"*\"> All"));
        assert!(html.contains("value=\"1\"> Main"));
        assert!(html.contains("value=\"2\" checked> Norsk"));
    }

    #[test]
    fn settings_all_checks_everything() {
        let html = BuiltinTemplates
            .render(
                SETTINGS_ELEMENT,
                &json!({
                    "linkTypeName": "entry",
                    "elementName": "Entry",
                    "settings": {"sources": "*"},
                    "sourceOptions": ["section:news"],
                }),
            )
            .unwrap();

        assert!(html.contains("value=\"*\" checked> All"));
        assert!(html.contains("value=\"section:news\" checked> section:news"));
    }

    #[test]
    fn settings_unrecognised_string_checks_everything() {
        let render = |sources: Value| {
            BuiltinTemplates
                .render(
                    SETTINGS_ELEMENT,
                    &json!({
                        "linkTypeName": "entry",
                        "elementName": "Entry",
                        "settings": {"sources": sources},
                        "sourceOptions": ["section:news"],
                    }),
                )
                .unwrap()
        };

        let html = render(json!("foo"));
        assert!(html.contains("value=\"*\" checked> All"));
        assert!(html.contains("value=\"section:news\" checked> section:news"));

        let html = render(json!(""));
        assert!(!html.contains("checked"));
    }

    #[test]
    fn element_input_shows_selection() {
        let html = BuiltinTemplates
            .render(
                INPUT_ELEMENT,
                &json!({
                    "isSelected": true,
                    "linkTypeName": "entry",
                    "elementFieldOptions": {
                        "disabled": false,
                        "id": "link-entry",
                        "name": "link[entry]",
                        "kind": "entry",
                        "sources": ["section:news", "section:pages"],
                        "element": {"id": 10, "title": "About"},
                    },
                }),
            )
            .unwrap();

        assert!(html.contains("data-sources=\"section:news,section:pages\""));
        assert!(html.contains("name=\"link[entry][]\" value=\"10\""));
        assert!(html.contains("<span class=\"element-title\">About</span>"));
    }
}
