// A single plugin listed on moodle.org

use crate::error::DeserializationError;
use crate::moodle::coerce;
use crate::moodle::version::PluginVersion;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Plugin {
    #[serde(deserialize_with = "coerce::u64_lenient")]
    pub id: u64,
    #[serde(default, deserialize_with = "coerce::string_or_empty")]
    pub name: String,
    /// Frankenstyle component, `<type>_<name>`. Empty for unpackageable entries.
    #[serde(deserialize_with = "coerce::string_or_empty")]
    pub component: String,
    #[serde(
        rename = "source",
        default,
        deserialize_with = "coerce::string_or_empty"
    )]
    pub source_url: String,
    #[serde(rename = "doc", default, deserialize_with = "coerce::string_or_empty")]
    pub documentation_url: String,
    #[serde(rename = "bugs", default, deserialize_with = "coerce::string_or_empty")]
    pub bugs_url: String,
    #[serde(
        rename = "discussion",
        default,
        deserialize_with = "coerce::string_or_empty"
    )]
    pub discussion_url: String,
    #[serde(rename = "timelastreleased", deserialize_with = "coerce::epoch_seconds")]
    pub time_last_released: DateTime<Utc>,
    pub versions: Vec<PluginVersion>,
}

impl Plugin {
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DeserializationError> {
        Ok(Plugin::deserialize(value)?)
    }

    /// Split the component into (plugin type, short name) at the first underscore
    pub fn split_component(&self) -> Option<(&str, &str)> {
        self.component
            .split_once('_')
            .filter(|(kind, name)| !kind.is_empty() && !name.is_empty())
    }

    /// Documentation URL, falling back to the bug tracker
    pub fn homepage(&self) -> Option<&str> {
        [&self.documentation_url, &self.bugs_url]
            .into_iter()
            .find(|url| !url.is_empty())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": "42",
            "name": "Example activity",
            "component": "mod_example",
            "source": "https://github.com/example/moodle-mod_example",
            "doc": null,
            "bugs": "https://github.com/example/moodle-mod_example/issues",
            "discussion": "",
            "timelastreleased": "1721260800",
            "versions": [{
                "id": 1,
                "version": 2024071800,
                "release": null,
                "maturity": "50",
                "downloadurl": "https://moodle.org/plugins/download.php/1/mod_example.zip",
                "downloadmd5": "d41d8cd98f00b204e9800998ecf8427e",
                "vcssystem": null,
                "vcssystemother": null,
                "vcsrepositoryurl": null,
                "vcsbranch": null,
                "vcstag": null,
                "timecreated": 1721260800
            }]
        })
    }

    #[test]
    fn test_parse_plugin() {
        let plugin = Plugin::from_json(&sample()).unwrap();
        assert_eq!(plugin.id, 42);
        assert_eq!(plugin.component, "mod_example");
        assert_eq!(plugin.documentation_url, "");
        assert_eq!(plugin.versions.len(), 1);
        assert_eq!(plugin.time_last_released.timestamp(), 1721260800);
    }

    #[test]
    fn test_missing_component_fails() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("component");
        assert!(Plugin::from_json(&value).is_err());
    }

    #[test]
    fn test_null_component_is_empty() {
        let mut value = sample();
        value["component"] = json!(null);
        assert_eq!(Plugin::from_json(&value).unwrap().component, "");
    }

    #[test]
    fn test_invalid_nested_version_fails() {
        let mut value = sample();
        value["versions"][0]["maturity"] = json!(7);
        assert!(Plugin::from_json(&value).is_err());
    }

    #[test]
    fn test_split_component() {
        let mut plugin = Plugin::from_json(&sample()).unwrap();
        assert_eq!(plugin.split_component(), Some(("mod", "example")));

        plugin.component = "local_my_tool".into();
        assert_eq!(plugin.split_component(), Some(("local", "my_tool")));

        plugin.component = "nounderscore".into();
        assert_eq!(plugin.split_component(), None);

        plugin.component = "mod_".into();
        assert_eq!(plugin.split_component(), None);
    }

    #[test]
    fn test_homepage_fallback() {
        let mut plugin = Plugin::from_json(&sample()).unwrap();
        assert_eq!(
            plugin.homepage(),
            Some("https://github.com/example/moodle-mod_example/issues")
        );

        plugin.documentation_url = "https://docs.moodle.org/en/Example".into();
        assert_eq!(plugin.homepage(), Some("https://docs.moodle.org/en/Example"));

        plugin.documentation_url.clear();
        plugin.bugs_url.clear();
        assert_eq!(plugin.homepage(), None);
    }
}
