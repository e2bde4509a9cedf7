use std::fs;
use std::path::Path;

use maras_core::{FilterPipeline, ItemDomain, RuleFilter};
use serde::Deserialize;

/// Run configuration, read from JSON.
///
/// ```json
/// { "domain": { "drug_count": 400, "reaction_count": 120 },
///   "pipeline": { "steps": ["closures", "drug_reaction"] } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub domain: Option<ItemDomain>,
    #[serde(default)]
    pub pipeline: Option<FilterPipeline>,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
        Self::parse(&content).map_err(|e| format!("Invalid config '{}': {}", path.display(), e))
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// Command line values win over the file.
    pub fn resolve(
        self,
        drugs: Option<u32>,
        reactions: Option<u32>,
        filters: &[RuleFilter],
    ) -> Result<(ItemDomain, FilterPipeline), String> {
        let file_domain = self.domain.unwrap_or(DEFAULT_DOMAIN);
        let domain = ItemDomain::try_new(
            drugs.unwrap_or(file_domain.drug_count()),
            reactions.unwrap_or(file_domain.reaction_count()),
        )
        .map_err(|e| e.to_string())?;
        let pipeline = if filters.is_empty() {
            self.pipeline.unwrap_or_else(default_pipeline)
        } else {
            FilterPipeline::new(filters.to_vec())
        };
        Ok((domain, pipeline))
    }
}

pub const DEFAULT_DOMAIN: ItemDomain = ItemDomain::new(400, 120);

/// Closed drug-to-reaction rules with two-drug antecedents and one reaction.
pub fn default_pipeline() -> FilterPipeline {
    FilterPipeline::new(vec![
        RuleFilter::DrugReaction,
        RuleFilter::NoSingletons,
        RuleFilter::NoComplex,
        RuleFilter::Closures,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = RunConfig::parse(
            r#"{"domain": {"drug_count": 8, "reaction_count": 3},
                "pipeline": {"steps": ["closures"]}}"#,
        )
        .unwrap();
        let (domain, pipeline) = config.resolve(None, None, &[]).unwrap();
        assert_eq!(domain, ItemDomain::new(8, 3));
        assert_eq!(pipeline.steps, vec![RuleFilter::Closures]);
    }

    #[test]
    fn test_flags_override_file() {
        let config = RunConfig::parse(r#"{"domain": {"drug_count": 8, "reaction_count": 3}}"#).unwrap();
        let (domain, pipeline) = config.resolve(Some(50), None, &[RuleFilter::NoComplex]).unwrap();
        assert_eq!(domain, ItemDomain::new(50, 3));
        assert_eq!(pipeline.steps, vec![RuleFilter::NoComplex]);
    }

    #[test]
    fn test_defaults() {
        let (domain, pipeline) = RunConfig::default().resolve(None, None, &[]).unwrap();
        assert_eq!(domain, DEFAULT_DOMAIN);
        assert_eq!(pipeline, default_pipeline());
    }

    #[test]
    fn test_rejects_oversized_domain() {
        let config = RunConfig::parse(r#"{"domain": {"drug_count": 8, "reaction_count": 3}}"#).unwrap();
        assert!(config.resolve(Some(u32::MAX), None, &[]).is_err());
        assert!(RunConfig::parse(r#"{"domain": {"drug_count": 4294967295, "reaction_count": 5}}"#).is_err());
    }

    #[test]
    fn test_rejects_unknown_filter() {
        assert!(RunConfig::parse(r#"{"pipeline": {"steps": ["support"]}}"#).is_err());
    }
}
