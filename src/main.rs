use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use urban_planner::ascii;
use urban_planner::llm::{generate_urban_plan, LlmClient, LlmConfig};
use urban_planner::modules::Enhancement;
use urban_planner::plan::{BuildingType, ControlSettings, PopulationDensity, Priority, UrbanPlan};
use urban_planner::render::{encode_png, image_filename, render_grid};
use urban_planner::store::PlanStore;

#[derive(Parser, Debug)]
#[command(name = "urban_planner")]
#[command(about = "Generate AI-assisted smart city plans and render them as images")]
struct Args {
    /// City name for the generated plan
    #[arg(short, long, default_value = "Aethelgard")]
    city: String,

    /// Overall population density
    #[arg(long, value_enum, default_value = "medium")]
    density: PopulationDensity,

    /// Desired green space, percent of total area
    #[arg(long, default_value_t = 40)]
    green_space: u8,

    /// Allowed building mix (comma separated)
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values = ["residential", "commercial", "mixed-use"]
    )]
    building_mix: Vec<BuildingType>,

    /// Key development priorities (comma separated)
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values = ["sustainability", "walkability"]
    )]
    priorities: Vec<Priority>,

    /// Layout grid side length
    #[arg(long, default_value_t = 20)]
    grid_size: usize,

    /// Citizen feedback point to design around (repeatable)
    #[arg(long = "feedback")]
    feedback: Vec<String>,

    /// Balance traffic flow (100) vs. green space (0)
    #[arg(long)]
    traffic_vs_green: Option<u32>,

    /// Balance economic growth (100) vs. residential comfort (0)
    #[arg(long)]
    economic_vs_residential: Option<u32>,

    /// Favor landmark-heavy areas suited to 3D/AR mockups
    #[arg(long)]
    ar_viz: bool,

    /// Specific sustainability goal (repeatable)
    #[arg(long = "sustainability-goal")]
    sustainability_goals: Vec<String>,

    /// Real-world city or concept to emulate (repeatable)
    #[arg(long = "inspiration")]
    inspirations: Vec<String>,

    /// Budget or resource constraint (repeatable)
    #[arg(long = "budget-constraint")]
    budget_constraints: Vec<String>,

    /// Hazard the design must be resilient against (repeatable)
    #[arg(long = "disaster")]
    disasters: Vec<String>,

    /// Base URL of the OpenAI-compatible generation server
    #[arg(long, default_value = "http://localhost:8000")]
    llm_url: String,

    /// Model name (server default if not specified)
    #[arg(long)]
    model: Option<String>,

    /// Lighter model to fall back to when the primary is overloaded
    #[arg(long)]
    fallback_model: Option<String>,

    /// Directory holding saved plans (default: ./plans)
    #[arg(long)]
    plans_dir: Option<PathBuf>,

    /// Save the generated plan to the plans directory
    #[arg(long)]
    save: bool,

    /// List saved plans and exit
    #[arg(long)]
    list: bool,

    /// Load a saved plan by city name instead of generating
    #[arg(long)]
    load: Option<String>,

    /// Delete a saved plan by city name and exit
    #[arg(long)]
    delete: Option<String>,

    /// Print an ASCII preview of the layout
    #[arg(long)]
    ascii: bool,

    /// Write the plan as pretty-printed JSON to this path
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Output path for the layout image (default derived from city name)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn collect_enhancements(args: &Args) -> Vec<Enhancement> {
    let mut enhancements = Vec::new();

    if !args.feedback.is_empty() {
        enhancements.push(Enhancement::CitizenFeedback(args.feedback.clone()));
    }
    if args.traffic_vs_green.is_some() || args.economic_vs_residential.is_some() {
        enhancements.push(Enhancement::MultiObjectiveOptimization {
            traffic_vs_green: args.traffic_vs_green.unwrap_or(50),
            economic_vs_residential: args.economic_vs_residential.unwrap_or(50),
        });
    }
    if args.ar_viz {
        enhancements.push(Enhancement::ArVisualization);
    }
    if !args.sustainability_goals.is_empty() {
        enhancements.push(Enhancement::ClimateSustainability(
            args.sustainability_goals.clone(),
        ));
    }
    if !args.inspirations.is_empty() {
        enhancements.push(Enhancement::AdaptiveLearning(args.inspirations.clone()));
    }
    if !args.budget_constraints.is_empty() {
        enhancements.push(Enhancement::BudgetConstraints(args.budget_constraints.clone()));
    }
    if !args.disasters.is_empty() {
        enhancements.push(Enhancement::DisasterPlanning(args.disasters.clone()));
    }

    enhancements
}

fn print_report(plan: &UrbanPlan) {
    println!();
    println!("{}", plan.city_name);
    if !plan.description.is_empty() {
        println!("{}", plan.description);
    }
    let metrics = &plan.key_metrics;
    if !metrics.population_estimate.is_empty() {
        println!("  Population estimate: {}", metrics.population_estimate);
    }
    println!("  Green space: {:.0}%", metrics.green_space_percentage);
    if !metrics.dominant_building_type.is_empty() {
        println!("  Dominant building type: {}", metrics.dominant_building_type);
    }
    println!("  Sustainability score: {:.0}", metrics.sustainability_score);
    println!();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let store = PlanStore::new(
        args.plans_dir
            .clone()
            .unwrap_or_else(PlanStore::default_dir),
    );

    if args.list {
        let plans = store.list()?;
        if plans.is_empty() {
            println!("No saved plans in {}", store.dir().display());
            return Ok(());
        }
        println!("Saved plans in {}:", store.dir().display());
        for plan in &plans {
            println!(
                "  {} ({}x{} grid)",
                plan.city_name,
                plan.layout_grid.size(),
                plan.layout_grid.size()
            );
        }
        return Ok(());
    }

    if let Some(name) = &args.delete {
        store.delete(name)?;
        println!("Deleted saved plan: {}", name);
        return Ok(());
    }

    let plan = if let Some(name) = &args.load {
        println!("Loading saved plan: {}", name);
        store.load(name)?
    } else {
        let settings = ControlSettings {
            city_name: args.city.clone(),
            population_density: args.density,
            green_space_percentage: args.green_space,
            building_mix: args.building_mix.clone(),
            priorities: args.priorities.clone(),
        };
        let enhancements = collect_enhancements(args);

        let client = LlmClient::new(LlmConfig {
            base_url: args.llm_url.clone(),
            model: args.model.clone(),
            fallback_model: args.fallback_model.clone(),
            ..LlmConfig::default()
        });
        if !client.health_check() {
            eprintln!("Warning: LLM server at {} is not available", args.llm_url);
        }

        println!("Generating urban plan for \"{}\"...", settings.city_name);
        if !enhancements.is_empty() {
            println!("Active enhancements: {}", enhancements.len());
        }
        generate_urban_plan(&client, &settings, &enhancements, args.grid_size)?
    };

    print_report(&plan);

    if args.ascii {
        print!("{}", ascii::render_ascii(&plan.layout_grid));
        println!();
        println!("Legend:");
        print!("{}", ascii::legend());
    }

    if args.save && args.load.is_none() {
        let path = store.save(&plan)?;
        println!("Saved plan to {}", path.display());
    }

    if let Some(path) = &args.export_json {
        fs::write(path, serde_json::to_string_pretty(&plan)?)?;
        println!("Wrote plan JSON to {}", path.display());
    }

    let image = render_grid(&plan.layout_grid)?;
    let png = encode_png(&image)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(image_filename(&plan.city_name)));
    fs::write(&output, &png)?;
    println!(
        "Wrote layout image to {} ({}x{} pixels)",
        output.display(),
        image.width(),
        image.height()
    );

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
