//! Generation prompt assembly
//!
//! Turns the control settings and activated enhancements into the full
//! natural-language prompt. The chat endpoint takes no response schema, so
//! the expected JSON shape and the allowed land-use tags are spelled out in
//! the prompt text itself.

use crate::land_use::LandUse;
use crate::modules::Enhancement;
use crate::plan::ControlSettings;

/// System message framing the model's role.
pub const SYSTEM_PROMPT: &str = "You are an expert urban planner and smart-city designer. \
You respond with a single JSON object and nothing else.";

/// Build the full user prompt for one plan generation.
pub fn build_plan_prompt(
    settings: &ControlSettings,
    enhancements: &[Enhancement],
    grid_size: usize,
) -> String {
    let building_mix = settings
        .building_mix
        .iter()
        .map(|b| b.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let priorities = settings
        .priorities
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let enhancements_block = if enhancements.is_empty() {
        String::new()
    } else {
        let fragments = enhancements
            .iter()
            .map(|e| format!("- {}", e.prompt_fragment()))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "\n**Activated AI Enhancements:**\n\
             The design must also incorporate the following advanced principles:\n{}\n",
            fragments
        )
    };

    let allowed_tags = LandUse::active()
        .iter()
        .map(|lu| format!("\"{}\"", lu.as_tag()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Generate a modern smart city plan for \"{city}\" with a realistic and futuristic design. \
         The layout should be organized and efficient but have a natural, organic flow.\n\
         \n\
         **Core Concept:**\n\
         Design a well-balanced, sustainable city that blends technology with nature. The city is \
         organized around a central hub with circular and radial roads for excellent connectivity. \
         Green corridors link parks and open spaces, promoting an eco-friendly lifestyle.\n\
         \n\
         **Constraints and Priorities:**\n\
         - Population Density: {density}\n\
         - Desired Green Space: Approximately {green}% of the total area.\n\
         - Allowed Building Mix: {mix}. Emphasize mixed-use development.\n\
         - Key Development Priorities: {priorities}. Focus on sustainability and quality of life.\n\
         {enhancements}\
         \n\
         **Output Requirements:**\n\
         Respond with a single JSON object with keys \"cityName\" (string), \"description\" (string), \
         \"keyMetrics\" (object with \"populationEstimate\" string, \"greenSpacePercentage\" number, \
         \"dominantBuildingType\" string, \"sustainabilityScore\" number) and \"layoutGrid\".\n\
         \n\
         1. **description**: Write a compelling, one-paragraph narrative describing this modern \
         smart city. Mention the balance of technology and nature, the central hub, mixed-use \
         zones, and sustainability features. If any AI enhancements were activated, subtly \
         reference their influence in the description.\n\
         2. **keyMetrics**: Provide estimated values. The sustainabilityScore should reflect the \
         city's eco-friendliness.\n\
         3. **layoutGrid**: Generate a grid representing the city layout. The grid MUST be exactly \
         {size} rows and {size} columns. Each cell is an object with a \"landUse\" string (one of: \
         {tags}) and a \"density\" number between 0.0 for low density and 1.0 for high density.\n\
         \n\
         **Visual Guidelines for the Layout Grid:**\n\
         - **Central Hub ('central-hub'):** Create a distinct, high-density city center that serves \
         as the focal point for commerce, culture, and public services.\n\
         - **Roads ('main-road', 'secondary-road'):** Design a network of main roads in circular or \
         radial patterns around the hub, with secondary roads branching off to connect zones.\n\
         - **Mixed-Use Zones ('mixed-use'):** Create vibrant neighborhoods that combine \
         residential, commercial, and recreational spaces.\n\
         - **Green Rooftops ('rooftop-garden'):** Distribute these throughout residential and \
         commercial zones to represent sustainable building practices.\n\
         - **Solar Fields ('solar-field'):** Place one or two dedicated areas for renewable energy \
         generation, typically on the city outskirts.\n\
         - **EV Charging Zones ('ev-charging-zone'):** Integrate these into commercial and \
         mixed-use areas.\n\
         - **Green Corridors ('green-corridor'):** Use these to link larger parks ('park') and \
         create seamless connections for pedestrians and wildlife.\n",
        city = settings.city_name,
        density = settings.population_density.as_str(),
        green = settings.green_space_percentage,
        mix = building_mix,
        priorities = priorities,
        enhancements = enhancements_block,
        size = grid_size,
        tags = allowed_tags,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_settings() {
        let settings = ControlSettings::default();
        let prompt = build_plan_prompt(&settings, &[], 20);
        assert!(prompt.contains("\"Aethelgard\""));
        assert!(prompt.contains("Population Density: medium"));
        assert!(prompt.contains("Approximately 40%"));
        assert!(prompt.contains("residential, commercial, mixed-use"));
        assert!(prompt.contains("sustainability, walkability"));
        assert!(prompt.contains("exactly 20 rows and 20 columns"));
    }

    #[test]
    fn test_prompt_lists_only_active_tags() {
        let prompt = build_plan_prompt(&ControlSettings::default(), &[], 20);
        assert!(prompt.contains("\"ev-charging-zone\""));
        assert!(!prompt.contains("\"wind-turbine\""));
        assert!(!prompt.contains("\"industrial\""));
    }

    #[test]
    fn test_enhancement_block_only_when_active() {
        let settings = ControlSettings::default();
        let plain = build_plan_prompt(&settings, &[], 20);
        assert!(!plain.contains("Activated AI Enhancements"));

        let enhanced = build_plan_prompt(&settings, &[Enhancement::ArVisualization], 20);
        assert!(enhanced.contains("Activated AI Enhancements"));
        assert!(enhanced.contains("- Design visually striking areas"));
    }
}
