//! Site link type
//!
//! The value is a site ID; the link resolves to the site's base URL (with
//! aliases expanded) and its name. Fields can restrict the selectable sites
//! with the `sites` setting:
//!
//! | Setting | Meaning |
//! |---------|---------|
//! | `"*"` | every site with URLs |
//! | `""` | no sites |
//! | `[1, 3]` | only these sites (if they have URLs) |

use serde::Serialize;
use serde_json::{json, Value};

use super::protocol::{LinkType, LinkTypeMeta, ValidationError};
use super::render::render_or_fallback;
use crate::domain::{Element, Link, LinkField, Settings, Site, SiteId};
use crate::host::templates::{INPUT_SELECT, SETTINGS_SITE};
use crate::host::HostServices;

/// Which sites a field offers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteFilter {
    /// No restriction
    All,

    /// Explicitly empty selection
    Nothing,

    /// Allow-list of site IDs
    Only(Vec<SiteId>),
}

impl SiteFilter {
    /// Interprets a `sites` setting. Anything other than `""` or a list means
    /// no restriction.
    pub fn from_setting(setting: Option<&Value>) -> Self {
        match setting {
            Some(Value::String(s)) if s.is_empty() => SiteFilter::Nothing,
            Some(Value::Array(items)) => {
                SiteFilter::Only(items.iter().filter_map(SiteId::from_value).collect())
            }
            _ => SiteFilter::All,
        }
    }

    pub fn allows(&self, id: SiteId) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Nothing => false,
            SiteFilter::Only(ids) => ids.contains(&id),
        }
    }
}

/// A selectable site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    pub value: SiteId,
    pub label: String,
}

/// Links to a site's home page
pub struct SiteLinkType {
    meta: LinkTypeMeta,
    services: HostServices,
}

impl SiteLinkType {
    pub fn new(display_name: impl Into<String>, services: HostServices) -> Self {
        Self {
            meta: LinkTypeMeta::new(display_name, "Common"),
            services,
        }
    }

    pub fn with_display_group(mut self, display_group: impl Into<String>) -> Self {
        self.meta.display_group = display_group.into();
        self
    }

    /// Looks up the linked site
    pub fn site(&self, link: &Link) -> Option<Site> {
        if self.is_empty(link) {
            return None;
        }

        let id = link.value.as_ref().and_then(SiteId::from_value)?;
        self.services.sites.site_by_id(id)
    }

    /// Sites that can be picked under the given `sites` setting
    pub fn site_options(&self, filter: Option<&Value>) -> Vec<SiteOption> {
        let filter = SiteFilter::from_setting(filter);

        self.services
            .sites
            .all_sites()
            .into_iter()
            .filter(|site| site.has_urls && filter.allows(site.id))
            .map(|site| SiteOption {
                value: site.id,
                label: site.name,
            })
            .collect()
    }
}

impl LinkType for SiteLinkType {
    fn default_settings(&self) -> Settings {
        let mut settings = Settings::new();
        settings.insert("sites".to_string(), json!("*"));
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
        let settings = field.link_type_settings(link_type_name, self.default_settings());
        let is_selected = value.link_type == link_type_name;
        let selected_site = if is_selected { self.site(value) } else { None };

        let vars = json!({
            "isSelected": is_selected,
            "linkTypeName": link_type_name,
            "selectFieldOptions": {
                "disabled": field.is_static,
                "id": field.input_id(link_type_name),
                "name": field.input_name(link_type_name),
                "options": self.site_options(settings.get("sites")),
                "value": selected_site.map(|site| site.id),
            },
        });

        render_or_fallback(&self.services, &self.display_name(), INPUT_SELECT, &vars)
    }

    fn settings_html(&self, link_type_name: &str, field: &LinkField) -> String {
        let vars = json!({
            "settings": field.link_type_settings(link_type_name, self.default_settings()),
            "elementName": self.display_name(),
            "linkTypeName": link_type_name,
            "siteOptions": self.site_options(None),
        });

        render_or_fallback(&self.services, &self.display_name(), SETTINGS_SITE, &vars)
    }

    fn text(&self, link: &Link) -> Option<String> {
        self.site(link).map(|site| site.to_string())
    }

    fn url(&self, link: &Link) -> Option<String> {
        let base_url = self.site(link)?.base_url?;
        self.services.aliases.resolve(&base_url)
    }

    fn is_empty(&self, link: &Link) -> bool {
        match &link.value {
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Number(_)) => false,
            _ => true,
        }
    }

    fn validate_value(&self, _field: &LinkField, _link: &Link) -> Option<Vec<ValidationError>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Translations;
    use crate::test_support::{failing_services, services, services_with};
    use pretty_assertions::assert_eq;

    fn site_type() -> SiteLinkType {
        SiteLinkType::new("Site", services())
    }

    fn ids(options: &[SiteOption]) -> Vec<u32> {
        options.iter().map(|o| o.value.0).collect()
    }

    #[test]
    fn default_settings_allow_all_sites() {
        let settings = site_type().default_settings();
        assert_eq!(settings.get("sites"), Some(&json!("*")));
    }

    #[test]
    fn display_metadata_is_translated() {
        let translations = Translations::from_iter([("Site", "Nettsted"), ("Common", "Felles")]);
        let link_type = SiteLinkType::new("Site", services_with(translations));

        assert_eq!(link_type.display_name(), "Nettsted");
        assert_eq!(link_type.display_group(), "Felles");
        assert_eq!(link_type.display_name(), link_type.display_name());
    }

    #[test]
    fn custom_display_group() {
        let link_type = SiteLinkType::new("Site", services()).with_display_group("Navigation");
        assert_eq!(link_type.display_group(), "Navigation");
    }

    #[test]
    fn empty_values() {
        let link_type = site_type();

        assert!(link_type.is_empty(&Link::new("site", "")));
        assert!(link_type.is_empty(&Link::new("site", "   ")));
        assert!(link_type.is_empty(&Link::empty("site")));
        assert!(link_type.is_empty(&Link::new("site", json!(null))));
        assert!(link_type.is_empty(&Link::new("site", json!([1]))));
        assert!(!link_type.is_empty(&Link::new("site", "2")));
        assert!(!link_type.is_empty(&Link::new("site", 2)));
    }

    #[test]
    fn resolves_site_text_and_url() {
        let link_type = site_type();
        let link = Link::new("site", "2");

        assert_eq!(link_type.site(&link).map(|s| s.handle), Some("nb".to_string()));
        assert_eq!(link_type.text(&link), Some("Norsk".to_string()));
        assert_eq!(link_type.url(&link), Some("https://example.com/nb/".to_string()));
    }

    #[test]
    fn url_without_alias() {
        let link_type = site_type();
        assert_eq!(
            link_type.url(&Link::new("site", "3")),
            Some("https://example.se/".to_string())
        );
    }

    #[test]
    fn missing_site_is_not_empty_but_unresolved() {
        let link_type = site_type();
        let link = Link::new("site", "99");

        assert!(link_type.site(&link).is_none());
        assert!(link_type.text(&link).is_none());
        assert!(link_type.url(&link).is_none());
        assert!(!link_type.is_empty(&link));
    }

    #[test]
    fn empty_link_resolves_to_nothing() {
        let link_type = site_type();
        let link = Link::new("site", "  ");

        assert!(link_type.site(&link).is_none());
        assert!(link_type.text(&link).is_none());
        assert!(link_type.url(&link).is_none());
    }

    #[test]
    fn unknown_alias_or_missing_base_url_gives_no_url() {
        let link_type = site_type();

        assert!(link_type.url(&Link::new("site", "5")).is_none());
        assert!(link_type.url(&Link::new("site", "4")).is_none());
        assert_eq!(link_type.text(&Link::new("site", "4")), Some("Headless".to_string()));
    }

    #[test]
    fn options_for_all_sites_skip_headless() {
        let options = site_type().site_options(Some(&json!("*")));
        assert_eq!(ids(&options), vec![1, 2, 3, 5]);
        assert_eq!(options[0].label, "Main");

        assert_eq!(ids(&site_type().site_options(None)), vec![1, 2, 3, 5]);
    }

    #[test]
    fn options_for_empty_selection() {
        assert!(site_type().site_options(Some(&json!(""))).is_empty());
    }

    #[test]
    fn options_for_allow_list() {
        let options = site_type().site_options(Some(&json!([2, "3", 4])));
        assert_eq!(ids(&options), vec![2, 3]);
    }

    #[test]
    fn never_targets_elements() {
        let link_type = site_type();
        let link = Link::new("site", "1");

        assert!(link_type.element(&link, false).is_none());
        assert!(!link_type.has_element(&link, true));
    }

    #[test]
    fn settings_and_values_always_valid() {
        let link_type = site_type();
        let settings = json!({"sites": [1]}).as_object().cloned().unwrap();

        assert_eq!(link_type.validate_settings(settings.clone()), settings);
        assert!(link_type
            .validate_value(&LinkField::new("link"), &Link::new("site", "99"))
            .is_none());
        assert_eq!(link_type.link_value(Some(json!("2"))), Some(json!("2")));
    }

    #[test]
    fn input_html_selects_current_site() {
        let link_type = site_type();
        let field = LinkField::new("cta")
            .with_settings("site", json!({"sites": [1, 2]}).as_object().cloned().unwrap());

        let html = link_type.input_html("site", &field, &Link::new("site", "2"), None);

        assert!(html.contains("id=\"cta-site\""));
        assert!(html.contains("name=\"cta[site]\""));
        assert!(html.contains("<option value=\"1\">Main</option>"));
        assert!(html.contains("<option value=\"2\" selected>Norsk</option>"));
        assert!(!html.contains("Svenska"));
    }

    #[test]
    fn input_html_for_other_type_is_hidden() {
        let link_type = site_type();
        let html = link_type.input_html(
            "site",
            &LinkField::new("cta"),
            &Link::new("url", "https://a.b"),
            None,
        );

        assert!(html.contains(" hidden>"));
        assert!(!html.contains("selected"));
    }

    #[test]
    fn settings_html_lists_sites() {
        let html = site_type().settings_html("site", &LinkField::new("cta"));

        assert!(html.contains("<legend>Site</legend>"));
        assert!(html.contains("Svenska"));
        assert!(!html.contains("Headless"));
    }

    #[test]
    fn render_failures_fall_back() {
        let link_type = SiteLinkType::new("Site", failing_services());
        let field = LinkField::new("cta");

        let expected = "<p>Error: Could not render the template for the field `Site`.</p>";
        assert_eq!(
            link_type.input_html("site", &field, &Link::new("site", "1"), None),
            expected
        );
        assert_eq!(link_type.settings_html("site", &field), expected);
    }
}
