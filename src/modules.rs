//! AI enhancement modules
//!
//! Optional design directives layered onto the base prompt. Each module is
//! one variant carrying its own parameters; the stringly-typed module ids of
//! the browser UI become a closed sum type here.

/// One activated enhancement and its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Enhancement {
    /// Simulated public-consultation feedback points.
    CitizenFeedback(Vec<String>),
    /// Competing-objective sliders, both 0-100.
    MultiObjectiveOptimization {
        traffic_vs_green: u32,
        economic_vs_residential: u32,
    },
    /// Ask for landmark-heavy areas suited to 3D/AR mockups.
    ArVisualization,
    /// Specific environmental goals.
    ClimateSustainability(Vec<String>),
    /// Real-world cities and concepts to emulate.
    AdaptiveLearning(Vec<String>),
    /// Financial and material limits.
    BudgetConstraints(Vec<String>),
    /// Hazards the design must be resilient against.
    DisasterPlanning(Vec<String>),
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- \"{}\"", item.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Enhancement {
    /// The directive sentence(s) this module contributes to the prompt.
    pub fn prompt_fragment(&self) -> String {
        match self {
            Enhancement::CitizenFeedback(feedback) => {
                if feedback.is_empty() {
                    "Incorporate citizen feedback. Specifically: \"focus on public happiness and accessibility\".".to_string()
                } else {
                    format!(
                        "Incorporate the following list of specific citizen feedback points into the design:\n{}",
                        bullet_list(feedback)
                    )
                }
            }
            Enhancement::MultiObjectiveOptimization {
                traffic_vs_green,
                economic_vs_residential,
            } => {
                let mut text = String::from("Optimize the layout by balancing competing objectives. ");
                if *traffic_vs_green < 30 {
                    text.push_str("Strongly prioritize expansive green spaces and pedestrian access over maximizing traffic throughput. ");
                } else if *traffic_vs_green > 70 {
                    text.push_str("Strongly prioritize efficient traffic flow and clear road hierarchy over maximizing green space coverage. ");
                } else {
                    text.push_str("Strike a balance between traffic efficiency and green space access. ");
                }
                if *economic_vs_residential < 30 {
                    text.push_str("The focus should be on high-quality residential comfort and community spaces over dense economic zones. ");
                } else if *economic_vs_residential > 70 {
                    text.push_str("The focus should be on creating a vibrant economic hub with dense commercial areas over maximizing residential space. ");
                } else {
                    text.push_str("Balance economic growth with residential comfort. ");
                }
                text
            }
            Enhancement::ArVisualization => {
                "Design visually striking areas and landmarks, particularly a well-defined central hub, that would be impressive in 3D visualizations.".to_string()
            }
            Enhancement::ClimateSustainability(goals) => {
                if goals.is_empty() {
                    "Focus on climate sustainability, implementing a wide range of green technologies like solar, green roofs, and water conservation.".to_string()
                } else {
                    format!(
                        "Focus on climate sustainability, incorporating these specific goals:\n{}",
                        bullet_list(goals)
                    )
                }
            }
            Enhancement::AdaptiveLearning(inspirations) => {
                if inspirations.is_empty() {
                    "Draw inspiration from successful real-world cities, like efficient, circular cities such as Amsterdam or Copenhagen.".to_string()
                } else {
                    format!(
                        "Draw inspiration from the following real-world cities and concepts:\n{}",
                        bullet_list(inspirations)
                    )
                }
            }
            Enhancement::BudgetConstraints(constraints) => {
                if constraints.is_empty() {
                    "Adhere to realistic budget and resource constraints, generating a practical and cost-effective layout.".to_string()
                } else {
                    format!(
                        "Adhere to the following specific budget and resource constraints:\n{}",
                        bullet_list(constraints)
                    )
                }
            }
            Enhancement::DisasterPlanning(disasters) => {
                if disasters.is_empty() {
                    "Incorporate emergency and disaster planning for general resilience, ensuring robust evacuation routes.".to_string()
                } else {
                    format!(
                        "Incorporate emergency and disaster planning. The design must be resilient against these specific hazards:\n{}",
                        bullet_list(disasters)
                    )
                }
            }
        }
    }
}
