//! Urban plan data model
//!
//! The plan is what one generation produces: a narrative description, key
//! metrics, and the layout grid. Serde names follow the generation schema
//! (camelCase), so a saved plan and a model response share one shape.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grid::CityGrid;
use crate::normalize::normalize_grid;

/// Requested overall population density.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PopulationDensity {
    Low,
    Medium,
    High,
}

impl PopulationDensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            PopulationDensity::Low => "low",
            PopulationDensity::Medium => "medium",
            PopulationDensity::High => "high",
        }
    }
}

/// Building categories the generator may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BuildingType {
    Residential,
    Commercial,
    Industrial,
    MixedUse,
}

impl BuildingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingType::Residential => "residential",
            BuildingType::Commercial => "commercial",
            BuildingType::Industrial => "industrial",
            BuildingType::MixedUse => "mixed-use",
        }
    }
}

/// Development priorities weighted into the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Walkability,
    PublicTransport,
    Sustainability,
    EconomicGrowth,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Walkability => "walkability",
            Priority::PublicTransport => "public-transport",
            Priority::Sustainability => "sustainability",
            Priority::EconomicGrowth => "economic-growth",
        }
    }
}

/// User-chosen parameters for one generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSettings {
    pub city_name: String,
    pub population_density: PopulationDensity,
    /// Desired share of green space, percent of total area.
    pub green_space_percentage: u8,
    pub building_mix: Vec<BuildingType>,
    pub priorities: Vec<Priority>,
}

impl Default for ControlSettings {
    fn default() -> Self {
        ControlSettings {
            city_name: "Aethelgard".to_string(),
            population_density: PopulationDensity::Medium,
            green_space_percentage: 40,
            building_mix: vec![
                BuildingType::Residential,
                BuildingType::Commercial,
                BuildingType::MixedUse,
            ],
            priorities: vec![Priority::Sustainability, Priority::Walkability],
        }
    }
}

/// Headline figures the model estimates for the plan.
///
/// Every field defaults: the model's metrics are untrusted and a missing
/// value degrades the report, not the generation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    #[serde(default)]
    pub population_estimate: String,
    #[serde(default)]
    pub green_space_percentage: f32,
    #[serde(default)]
    pub dominant_building_type: String,
    #[serde(default)]
    pub sustainability_score: f32,
}

/// A complete generated city plan.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrbanPlan {
    pub city_name: String,
    pub description: String,
    pub key_metrics: KeyMetrics,
    pub layout_grid: CityGrid,
}

impl UrbanPlan {
    /// Assemble a plan from a parsed-but-untrusted model response.
    ///
    /// Scalar fields fall back to defaults when missing or mistyped; the
    /// layout grid goes through full normalization. Total over any JSON
    /// value (a body that is not JSON at all never reaches this point).
    pub fn from_response(value: &Value, settings: &ControlSettings, grid_size: usize) -> UrbanPlan {
        let city_name = value
            .get("cityName")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&settings.city_name)
            .to_string();

        let description = value
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let key_metrics = value
            .get("keyMetrics")
            .and_then(|metrics| serde_json::from_value(metrics.clone()).ok())
            .unwrap_or_default();

        let layout_grid = normalize_grid(value.get("layoutGrid").unwrap_or(&Value::Null), grid_size);

        UrbanPlan {
            city_name,
            description,
            key_metrics,
            layout_grid,
        }
    }

    /// Store key / filename stem for this plan.
    pub fn slug(&self) -> String {
        slugify(&self.city_name)
    }
}

/// Lowercase a name and collapse whitespace runs to single hyphens.
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    lower.split_whitespace().collect::<Vec<_>>().join("-")
}
