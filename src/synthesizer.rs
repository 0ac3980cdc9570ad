// Package synthesis: one resolver package per plugin version

use crate::calver;
use crate::constants;
use crate::error::SynthesisError;
use crate::moodle::{Plugin, PluginVersion};
use crate::package::{Dist, Link, Source, SynthesizedPackage};
use std::collections::BTreeMap;

/// Turns catalog plugins into packages under a fixed namespace
#[derive(Debug, Clone)]
pub struct PackageSynthesizer {
    namespace: String,
}

impl Default for PackageSynthesizer {
    fn default() -> Self {
        Self::new(constants::DEFAULT_NAMESPACE)
    }
}

impl PackageSynthesizer {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Package name a component is published under
    pub fn package_name(&self, component: &str) -> String {
        format!("{}/{}", self.namespace, component)
    }

    /// Lazily build one package for each version of `plugin`, in catalog order
    ///
    /// Callers skip plugins with an empty component before calling this.
    /// Every version number is checked up front, so one bad release fails the
    /// whole plugin rather than part of its sequence.
    /// The returned iterator is `Clone`, so the sequence can be walked again
    /// from the start.
    pub fn synthesize<'a>(&self, plugin: &'a Plugin) -> Result<Packages<'a>, SynthesisError> {
        let (plugin_type, short_name) =
            plugin
                .split_component()
                .ok_or_else(|| SynthesisError::MalformedComponent {
                    plugin_id: plugin.id,
                    component: plugin.component.clone(),
                })?;

        if let Some(bad) = plugin
            .versions
            .iter()
            .find(|version| version.version_number().is_none())
        {
            return Err(SynthesisError::MalformedVersion {
                plugin_id: plugin.id,
                version: bad.version.clone(),
            });
        }

        Ok(Packages {
            plugin,
            name: self.package_name(&plugin.component),
            kind: format!("{}-{}", constants::PACKAGE_TYPE_PREFIX, plugin_type),
            installer_name: short_name.to_string(),
            versions: plugin.versions.iter(),
        })
    }
}

/// Iterator over the packages of a single plugin
#[derive(Debug, Clone)]
pub struct Packages<'a> {
    plugin: &'a Plugin,
    name: String,
    kind: String,
    installer_name: String,
    versions: std::slice::Iter<'a, PluginVersion>,
}

impl Packages<'_> {
    fn build(&self, version: &PluginVersion) -> SynthesizedPackage {
        let mut extra = BTreeMap::new();
        extra.insert(
            constants::EXTRA_INSTALLER_NAME.to_string(),
            self.installer_name.clone(),
        );
        extra.insert(
            constants::EXTRA_DIST_MD5.to_string(),
            version.download_md5.clone(),
        );

        let source = version.vcs.provenance().map(|p| Source {
            kind: p.kind.to_string(),
            url: p.url.to_string(),
            reference: p.reference.to_string(),
        });

        SynthesizedPackage {
            name: self.name.clone(),
            version: calver::to_calver(
                version.version_number().unwrap_or_default(),
                version.maturity,
            ),
            description: self.plugin.name.clone(),
            kind: self.kind.clone(),
            dist: Dist {
                kind: constants::DIST_TYPE.to_string(),
                url: version.download_url.clone(),
            },
            release_date: version.time_created,
            homepage: self.plugin.homepage().map(str::to_string),
            requires: vec![Link::installer(self.name.clone())],
            extra,
            source,
        }
    }
}

impl Iterator for Packages<'_> {
    type Item = SynthesizedPackage;

    fn next(&mut self) -> Option<Self::Item> {
        let version = self.versions.next()?;
        Some(self.build(version))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.versions.size_hint()
    }
}

impl ExactSizeIterator for Packages<'_> {}
