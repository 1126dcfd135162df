//! Fail-soft template rendering
//!
//! A link type that can't render its controls must not break the whole
//! field: the failure is logged and replaced by a short error paragraph.

use crate::host::HostServices;

const RENDER_FAILED: &str = "Error: Could not render the template for the field `{name}`.";

/// Renders `template`, falling back to an error paragraph on failure
pub(crate) fn render_or_fallback(
    services: &HostServices,
    display_name: &str,
    template: &str,
    vars: &serde_json::Value,
) -> String {
    match services.templates.render(template, vars) {
        Ok(html) => html,
        Err(err) => {
            let message = services
                .translator
                .translate(RENDER_FAILED, &[("name", display_name)]);

            tracing::error!(
                link_type = display_name,
                template,
                error = %err,
                "{} {}",
                message,
                err
            );

            format!("<p>{}</p>", html_escape::encode_text(&message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{failing_services, services};
    use serde_json::json;

    #[test]
    fn passes_rendered_markup_through() {
        let services = services();
        let html = render_or_fallback(
            &services,
            "Site",
            crate::host::templates::SETTINGS_INPUT,
            &json!({
                "linkTypeName": "url",
                "elementName": "Url",
                "settings": {},
            }),
        );

        assert!(html.starts_with("<fieldset"));
    }

    #[test]
    fn falls_back_on_error() {
        let services = failing_services();
        let html = render_or_fallback(&services, "Site <b>", "whatever", &json!({}));

        assert_eq!(
            html,
            "<p>Error: Could not render the template for the field `Site &lt;b&gt;`.</p>"
        );
    }
}
