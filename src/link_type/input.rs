//! Input link types
//!
//! Free-text links: URLs, email addresses, phone numbers and custom values.
//! The value is the string the editor typed.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};

use super::protocol::{is_blank_string, setting_flag, LinkType, LinkTypeMeta, ValidationError};
use super::render::render_or_fallback;
use crate::domain::{Element, Link, LinkField, Settings, Url};
use crate::host::templates::{INPUT_TEXT, SETTINGS_INPUT};
use crate::host::HostServices;

/// Schemes accepted by URL validation
const URL_SCHEMES: &[&str] = &["http", "https", "ftp"];

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static TEL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"))
}

fn tel_regex() -> &'static Regex {
    TEL_REGEX.get_or_init(|| Regex::new(r"^\+?[0-9 ()./-]+$").expect("Invalid phone regex"))
}

/// What kind of text an input link holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Url,
    Email,
    Tel,
    Custom,
}

impl InputKind {
    /// Returns all input kinds
    pub fn all() -> &'static [InputKind] {
        &[InputKind::Url, InputKind::Email, InputKind::Tel, InputKind::Custom]
    }

    /// Stable name used to register the matching link type
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Url => "url",
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Custom => "custom",
        }
    }

    /// Default display name
    pub fn display_name(&self) -> &'static str {
        match self {
            InputKind::Url => "Url",
            InputKind::Email => "Mail",
            InputKind::Tel => "Telephone",
            InputKind::Custom => "Custom",
        }
    }

    fn html_type(&self) -> &'static str {
        match self {
            InputKind::Url => "url",
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Custom => "text",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            InputKind::Url => "https://www.example.com/",
            InputKind::Email => "name@example.com",
            InputKind::Tel => "+1 555 0100",
            InputKind::Custom => "",
        }
    }

    fn invalid_message(&self) -> &'static str {
        match self {
            InputKind::Url => "Please enter a valid url.",
            InputKind::Email => "Please enter a valid email address.",
            InputKind::Tel => "Please enter a valid phone number.",
            InputKind::Custom => "Please enter a valid value.",
        }
    }
}

/// Links typed in by hand
pub struct InputLinkType {
    kind: InputKind,
    meta: LinkTypeMeta,
    services: HostServices,
}

impl InputLinkType {
    pub fn new(kind: InputKind, display_name: impl Into<String>, services: HostServices) -> Self {
        Self {
            kind,
            meta: LinkTypeMeta::new(display_name, "Input fields"),
            services,
        }
    }

    pub fn with_display_group(mut self, display_group: impl Into<String>) -> Self {
        self.meta.display_group = display_group.into();
        self
    }

    /// The trimmed value, if the link isn't empty
    fn value<'a>(&self, link: &'a Link) -> Option<&'a str> {
        if self.is_empty(link) {
            return None;
        }
        link.value_str().map(str::trim)
    }

    fn is_valid(&self, value: &str, allow_aliases: bool) -> bool {
        match self.kind {
            InputKind::Url => is_valid_url(value, allow_aliases),
            InputKind::Email => email_regex().is_match(value.trim_start_matches("mailto:")),
            InputKind::Tel => {
                let number = value.trim_start_matches("tel:");
                tel_regex().is_match(number)
                    && number.chars().filter(char::is_ascii_digit).count() >= 3
            }
            InputKind::Custom => true,
        }
    }
}

/// Absolute http(s)/ftp URLs, scheme-relative and root-relative URLs, and
/// (when allowed) `@alias` URLs
fn is_valid_url(value: &str, allow_aliases: bool) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    if value.starts_with('@') {
        return allow_aliases;
    }

    let url = Url::parse(value);
    match url.scheme() {
        Some(scheme) => {
            URL_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) && url.host().is_some()
        }
        None => url.host().is_some() || value.starts_with('/'),
    }
}

impl LinkType for InputLinkType {
    fn default_settings(&self) -> Settings {
        let mut settings = Settings::new();
        settings.insert("disableValidation".to_string(), json!(false));
        settings.insert("allowAliases".to_string(), json!(false));
        settings
    }

    fn display_name(&self) -> String {
        self.services.t(&self.meta.display_name)
    }

    fn display_group(&self) -> String {
        self.services.t(&self.meta.display_group)
    }

    fn element(&self, _link: &Link, _ignore_status: bool) -> Option<Element> {
        None
    }

    fn has_element(&self, _link: &Link, _ignore_status: bool) -> bool {
        false
    }

    fn input_html(
        &self,
        link_type_name: &str,
        field: &LinkField,
        value: &Link,
        _element: Option<&Element>,
    ) -> String {
        let is_selected = value.link_type == link_type_name;
        let text = if is_selected {
            value.value_str().unwrap_or_default()
        } else {
            ""
        };

        let vars = json!({
            "isSelected": is_selected,
            "linkTypeName": link_type_name,
            "textFieldOptions": {
                "disabled": field.is_static,
                "id": field.input_id(link_type_name),
                "name": field.input_name(link_type_name),
                "type": self.kind.html_type(),
                "value": text,
                "placeholder": self.services.t(self.kind.placeholder()),
            },
        });

        render_or_fallback(&self.services, &self.display_name(), INPUT_TEXT, &vars)
    }

    fn settings_html(&self, link_type_name: &str, field: &LinkField) -> String {
        let vars = json!({
            "settings": field.link_type_settings(link_type_name, self.default_settings()),
            "elementName": self.display_name(),
            "linkTypeName": link_type_name,
        });

        render_or_fallback(&self.services, &self.display_name(), SETTINGS_INPUT, &vars)
    }

    fn link_value(&self, value: Option<Value>) -> Option<Value> {
        match value {
            Some(Value::String(s)) => Some(Value::String(s.trim().to_string())),
            other => other,
        }
    }

    fn text(&self, link: &Link) -> Option<String> {
        self.value(link).map(str::to_string)
    }

    fn url(&self, link: &Link) -> Option<String> {
        let value = self.value(link)?;

        match self.kind {
            InputKind::Url => self.services.aliases.resolve(value),
            InputKind::Email => Some(format!("mailto:{}", value.trim_start_matches("mailto:"))),
            InputKind::Tel => {
                let number: String = value
                    .trim_start_matches("tel:")
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                Some(format!("tel:{}", number))
            }
            InputKind::Custom => Some(value.to_string()),
        }
    }

    fn is_empty(&self, link: &Link) -> bool {
        is_blank_string(link.value.as_ref())
    }

    fn validate_settings(&self, mut settings: Settings) -> Settings {
        for key in ["disableValidation", "allowAliases"] {
            if settings.contains_key(key) {
                let flag = setting_flag(&settings, key);
                settings.insert(key.to_string(), Value::Bool(flag));
            }
        }
        settings
    }

    fn validate_value(&self, field: &LinkField, link: &Link) -> Option<Vec<ValidationError>> {
        let value = self.value(link)?;
        let settings = field.link_type_settings(&link.link_type, self.default_settings());

        if setting_flag(&settings, "disableValidation") {
            return None;
        }

        if self.is_valid(value, setting_flag(&settings, "allowAliases")) {
            None
        } else {
            Some(vec![ValidationError::new(
                "value",
                self.services.t(self.kind.invalid_message()),
            )])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{failing_services, services};

    fn input(kind: InputKind) -> InputLinkType {
        InputLinkType::new(kind, kind.display_name(), services())
    }

    fn field_with(name: &str, settings: Value) -> LinkField {
        LinkField::new("link").with_settings(name, settings.as_object().cloned().unwrap())
    }

    #[test]
    fn blank_values_are_empty() {
        let url = input(InputKind::Url);

        assert!(url.is_empty(&Link::new("url", "")));
        assert!(url.is_empty(&Link::new("url", " \t ")));
        assert!(url.is_empty(&Link::empty("url")));
        assert!(url.is_empty(&Link::new("url", 42)));
        assert!(!url.is_empty(&Link::new("url", "https://example.com")));
    }

    #[test]
    fn url_passes_through_and_expands_aliases() {
        let url = input(InputKind::Url);

        assert_eq!(
            url.url(&Link::new("url", " https://example.org/a ")),
            Some("https://example.org/a".to_string())
        );
        assert_eq!(
            url.url(&Link::new("url", "@web/contact")),
            Some("https://example.com/contact".to_string())
        );
        assert_eq!(url.url(&Link::new("url", "@nope/contact")), None);
        assert_eq!(url.url(&Link::new("url", "")), None);
    }

    #[test]
    fn email_and_tel_urls() {
        assert_eq!(
            input(InputKind::Email).url(&Link::new("email", "kari@example.com")),
            Some("mailto:kari@example.com".to_string())
        );
        assert_eq!(
            input(InputKind::Tel).url(&Link::new("tel", "+47 22 00 00 00")),
            Some("tel:+4722000000".to_string())
        );
        assert_eq!(
            input(InputKind::Custom).url(&Link::new("custom", "#top")),
            Some("#top".to_string())
        );
    }

    #[test]
    fn text_is_trimmed_value() {
        assert_eq!(
            input(InputKind::Email).text(&Link::new("email", " kari@example.com ")),
            Some("kari@example.com".to_string())
        );
        assert_eq!(input(InputKind::Email).text(&Link::new("email", "  ")), None);
    }

    #[test]
    fn link_value_trims_strings() {
        let url = input(InputKind::Url);
        assert_eq!(url.link_value(Some(json!(" /a "))), Some(json!("/a")));
        assert_eq!(url.link_value(Some(json!(3))), Some(json!(3)));
        assert_eq!(url.link_value(None), None);
    }

    #[test]
    fn url_validation() {
        let url = input(InputKind::Url);
        let field = LinkField::new("link");

        for valid in ["https://example.com", "http://a.b/c?d=e", "/about", "//cdn.example.com/x.js"] {
            assert!(url.validate_value(&field, &Link::new("url", valid)).is_none(), "{valid}");
        }

        for invalid in ["example.com", "javascript:alert(1)", "http:/nohost", "https://a b.com", "@web/x"] {
            let errors = url.validate_value(&field, &Link::new("url", invalid));
            assert!(errors.is_some_and(|e| !e.is_empty()), "{invalid}");
        }
    }

    #[test]
    fn aliases_allowed_by_setting() {
        let url = input(InputKind::Url);
        let field = field_with("url", json!({"allowAliases": true}));

        assert!(url.validate_value(&field, &Link::new("url", "@web/x")).is_none());
    }

    #[test]
    fn validation_can_be_disabled() {
        let email = input(InputKind::Email);
        let field = field_with("email", json!({"disableValidation": "1"}));

        assert!(email.validate_value(&field, &Link::new("email", "not an email")).is_none());
    }

    #[test]
    fn email_and_tel_validation() {
        let field = LinkField::new("link");
        let email = input(InputKind::Email);
        let tel = input(InputKind::Tel);

        assert!(email.validate_value(&field, &Link::new("email", "kari@example.com")).is_none());
        assert!(email.validate_value(&field, &Link::new("email", "kari@example")).is_some());

        assert!(tel.validate_value(&field, &Link::new("tel", "+47 (22) 00-00.00")).is_none());
        assert!(tel.validate_value(&field, &Link::new("tel", "call me")).is_some());
        assert!(tel.validate_value(&field, &Link::new("tel", "+1")).is_some());
    }

    #[test]
    fn empty_values_are_valid() {
        let field = LinkField::new("link");
        assert!(input(InputKind::Email).validate_value(&field, &Link::new("email", "")).is_none());
    }

    #[test]
    fn settings_coerced_to_bools() {
        let settings = json!({"disableValidation": "1", "allowAliases": 0, "other": "x"})
            .as_object()
            .cloned()
            .unwrap();

        let validated = input(InputKind::Url).validate_settings(settings);

        assert_eq!(validated.get("disableValidation"), Some(&json!(true)));
        assert_eq!(validated.get("allowAliases"), Some(&json!(false)));
        assert_eq!(validated.get("other"), Some(&json!("x")));
    }

    #[test]
    fn input_html_prefills_selected_value() {
        let html = input(InputKind::Email).input_html(
            "email",
            &LinkField::new("cta"),
            &Link::new("email", "kari@example.com"),
            None,
        );

        assert!(html.contains("type=\"email\""));
        assert!(html.contains("value=\"kari@example.com\""));
        assert!(html.contains("placeholder=\"name@example.com\""));
    }

    #[test]
    fn input_html_ignores_other_types_value() {
        let html = input(InputKind::Url).input_html(
            "url",
            &LinkField::new("cta"),
            &Link::new("site", "2"),
            None,
        );

        assert!(html.contains("value=\"\""));
        assert!(html.contains(" hidden>"));
    }

    #[test]
    fn render_failure_falls_back() {
        let url = InputLinkType::new(InputKind::Url, "Url", failing_services());
        assert_eq!(
            url.settings_html("url", &LinkField::new("cta")),
            "<p>Error: Could not render the template for the field `Url`.</p>"
        );
    }

    #[test]
    fn no_elements() {
        let url = input(InputKind::Url);
        assert!(url.element(&Link::new("url", "/a"), true).is_none());
        assert!(!url.has_element(&Link::new("url", "/a"), true));
        assert_eq!(url.display_group(), "Input fields");
    }
}
