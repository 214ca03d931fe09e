use std::path::PathBuf;

/// Runtime settings for an extraction run.
///
/// Values are immutable once built; [`Configuration::merge`] produces a
/// new value instead of changing this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Directory the extracted fonts are written to
    pub output_directory: PathBuf,

    /// When false an existing output file aborts the run
    pub overwrite_existing: bool,

    /// Recompute every source table checksum and warn about mismatches
    pub validate_checksums: bool,

    pub verbose: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            overwrite_existing: true,
            validate_checksums: false,
            verbose: false,
        }
    }
}

/// Fields to replace when merging; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub output_directory: Option<PathBuf>,
    pub overwrite_existing: Option<bool>,
    pub validate_checksums: Option<bool>,
    pub verbose: Option<bool>,
}

impl Configuration {
    pub fn merge(&self, overrides: ConfigOverrides) -> Self {
        Self {
            output_directory: overrides
                .output_directory
                .unwrap_or_else(|| self.output_directory.clone()),
            overwrite_existing: overrides.overwrite_existing.unwrap_or(self.overwrite_existing),
            validate_checksums: overrides.validate_checksums.unwrap_or(self.validate_checksums),
            verbose: overrides.verbose.unwrap_or(self.verbose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert_eq!(config.output_directory, PathBuf::from("."));
        assert!(config.overwrite_existing);
        assert!(!config.validate_checksums);
        assert!(!config.verbose);
    }

    #[test]
    fn merge_replaces_only_given_fields() {
        let config = Configuration::default();
        let merged = config.merge(ConfigOverrides {
            output_directory: Some("/tmp/fonts".into()),
            verbose: Some(true),
            ..Default::default()
        });

        assert_eq!(merged.output_directory, PathBuf::from("/tmp/fonts"));
        assert!(merged.verbose);
        assert_eq!(merged.overwrite_existing, config.overwrite_existing);
        assert_eq!(merged.validate_checksums, config.validate_checksums);

        // the source value is untouched
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn empty_merge_is_identity() {
        let config = Configuration::default().merge(ConfigOverrides {
            validate_checksums: Some(true),
            ..Default::default()
        });
        assert_eq!(config.merge(ConfigOverrides::default()), config);
    }
}
