//! Static catalog of the studio's generation tools.
//!
//! Each feature carries its image-requirement policy and output kind; the
//! dispatcher and the UI both read from this one table instead of branching
//! on feature identity at every call site.

use serde::{Deserialize, Serialize};

/// Identifier for one of the fixed set of tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureKey {
    SurrealExterior,
    InstantInterior,
    MasterPlan,
    SmartEdit,
    SketchupFinalize,
    PlanTo3d,
    RealToTechDrawing,
    CostCalculation,
    TaskGenerator,
}

/// Whether a feature needs an uploaded image before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRequirement {
    None,
    Optional,
    Required,
}

/// What kind of result a feature produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Image,
    StructuredText,
}

/// Immutable descriptor for one tool. Defined at startup, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub key: FeatureKey,
    pub image_requirement: ImageRequirement,
    pub output_kind: OutputKind,
}

/// All supported features, in presentation order.
const FEATURES: &[Feature] = &[
    Feature {
        key: FeatureKey::SurrealExterior,
        image_requirement: ImageRequirement::Optional,
        output_kind: OutputKind::Image,
    },
    Feature {
        key: FeatureKey::InstantInterior,
        image_requirement: ImageRequirement::Required,
        output_kind: OutputKind::Image,
    },
    Feature {
        key: FeatureKey::MasterPlan,
        image_requirement: ImageRequirement::Required,
        output_kind: OutputKind::Image,
    },
    Feature {
        key: FeatureKey::SmartEdit,
        image_requirement: ImageRequirement::Required,
        output_kind: OutputKind::Image,
    },
    Feature {
        key: FeatureKey::SketchupFinalize,
        image_requirement: ImageRequirement::Required,
        output_kind: OutputKind::Image,
    },
    Feature {
        key: FeatureKey::PlanTo3d,
        image_requirement: ImageRequirement::Required,
        output_kind: OutputKind::Image,
    },
    Feature {
        key: FeatureKey::RealToTechDrawing,
        image_requirement: ImageRequirement::Required,
        output_kind: OutputKind::Image,
    },
    Feature {
        key: FeatureKey::CostCalculation,
        image_requirement: ImageRequirement::Optional,
        output_kind: OutputKind::StructuredText,
    },
    Feature {
        key: FeatureKey::TaskGenerator,
        image_requirement: ImageRequirement::None,
        output_kind: OutputKind::StructuredText,
    },
];

/// Look up the descriptor for a feature key. Total over the enum.
pub fn lookup(key: FeatureKey) -> Feature {
    *FEATURES
        .iter()
        .find(|f| f.key == key)
        .expect("every FeatureKey has a FEATURES entry")
}

/// All features in presentation order.
pub fn all() -> &'static [Feature] {
    FEATURES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_resolves() {
        for feature in all() {
            assert_eq!(lookup(feature.key).key, feature.key);
        }
    }

    #[test]
    fn test_image_requirements_match_catalog() {
        assert_eq!(
            lookup(FeatureKey::SurrealExterior).image_requirement,
            ImageRequirement::Optional
        );
        assert_eq!(
            lookup(FeatureKey::InstantInterior).image_requirement,
            ImageRequirement::Required
        );
        assert_eq!(
            lookup(FeatureKey::TaskGenerator).image_requirement,
            ImageRequirement::None
        );
        assert_eq!(
            lookup(FeatureKey::CostCalculation).image_requirement,
            ImageRequirement::Optional
        );
    }

    #[test]
    fn test_output_kinds() {
        assert_eq!(
            lookup(FeatureKey::CostCalculation).output_kind,
            OutputKind::StructuredText
        );
        assert_eq!(
            lookup(FeatureKey::TaskGenerator).output_kind,
            OutputKind::StructuredText
        );
        assert_eq!(lookup(FeatureKey::SmartEdit).output_kind, OutputKind::Image);
    }

    #[test]
    fn test_presentation_order_is_stable() {
        let keys: Vec<FeatureKey> = all().iter().map(|f| f.key).collect();
        assert_eq!(keys[0], FeatureKey::SurrealExterior);
        assert_eq!(keys.last().copied(), Some(FeatureKey::TaskGenerator));
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn test_key_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&FeatureKey::RealToTechDrawing).unwrap();
        assert_eq!(json, "\"REAL_TO_TECH_DRAWING\"");
    }
}
