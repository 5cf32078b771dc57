//! Settings validation, run once before the first compile or jar step

use std::collections::HashSet;

use tracing::warn;

use crate::{
    config::{CompileSettings, DependencyGroupSelector, LibraryDir},
    error::{Error, Result},
};

/// Trait for validating settings
pub trait ConfigValidator {
    fn validate(&self, settings: &CompileSettings) -> Result<()>;
}

pub struct SettingsValidator;

impl SettingsValidator {
    fn validate_selectors(&self, field: &str, selectors: &[DependencyGroupSelector]) -> Result<()> {
        let mut seen = HashSet::new();
        for selector in selectors {
            if selector.group.trim().is_empty() {
                return Err(Error::config(
                    format!("{field} contains a dependency group with an empty name"),
                    format!(
                        "Give every entry of {field} a group name, for example:\n    {{ \"group\": \"compile\", \"transitive\": true }}"
                    ),
                ));
            }
            if !seen.insert(selector.group.as_str()) {
                warn!(
                    "Dependency group '{}' is listed more than once in {}",
                    selector.group, field
                );
            }
        }
        Ok(())
    }

    fn validate_manifest(&self, settings: &CompileSettings) -> Result<()> {
        for key in settings.jar_manifest_entries.keys() {
            let invalid = key.trim().is_empty()
                || key.contains(':')
                || key.contains('\n')
                || key.contains('\r');
            if invalid {
                return Err(Error::config(
                    format!("jar_manifest_entries has an invalid key: {key:?}"),
                    "Manifest keys must be non-empty and may not contain ':' or line breaks, for example:\n    \"jar_manifest_entries\": { \"Main-Class\": \"app.MainKt\" }",
                ));
            }
        }
        for (key, value) in &settings.jar_manifest_entries {
            if value.contains('\n') || value.contains('\r') {
                return Err(Error::config(
                    format!("jar_manifest_entries value for {key:?} contains a line break"),
                    "Manifest values must fit on one logical line",
                ));
            }
        }
        Ok(())
    }
}

impl ConfigValidator for SettingsValidator {
    fn validate(&self, settings: &CompileSettings) -> Result<()> {
        settings.extra_compiler_arg_tokens()?;

        self.validate_selectors("main_dependencies", &settings.main_dependencies)?;
        self.validate_selectors("test_dependencies", &settings.test_dependencies)?;

        let library_groups: Vec<DependencyGroupSelector> = settings
            .extra_library_dirs
            .iter()
            .filter_map(|dir| match dir {
                LibraryDir::Group(selector) => Some(selector.clone()),
                LibraryDir::Path(_) => None,
            })
            .collect();
        self.validate_selectors("extra_library_dirs", &library_groups)?;

        self.validate_manifest(settings)
    }
}
