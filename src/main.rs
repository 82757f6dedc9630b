use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mealplan_optim::api_connection::connection::Provider;
use mealplan_optim::catalog::{filter_allergens, load_catalog};
use mealplan_optim::cli::{parse_args, Command};
use mealplan_optim::goals::Goal;
use mealplan_optim::nutrition::{daily_total, macro_snapshot, scaled_nutrition};
use mealplan_optim::planner::{day_label, generate_week_plan};
use mealplan_optim::server::{router, AppState};

// Credential for the generative-language-model service, supplied via the
// environment or a .env file.
const API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match parse_args().command {
        Command::Serve { host, port } => serve(&host, port).await,
        Command::Plan {
            catalog,
            goal,
            allergens,
            seed,
        } => plan(&catalog, goal, &allergens, seed).await,
    }
}

async fn serve(host: &str, port: u16) -> Result<()> {
    let model = Provider::gemini(API_KEY_ENV_VAR);
    let app = router(AppState {
        model: Arc::new(model),
    });

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("API server running on http://{}", addr);
    info!("Visit http://{}/api/test to test your API key", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn plan(catalog_path: &str, goal: Goal, allergens: &[String], seed: Option<u64>) -> Result<()> {
    let recipes = load_catalog(Path::new(catalog_path))
        .await
        .with_context(|| format!("Failed to load recipe catalog from '{}'", catalog_path))?;
    let available = filter_allergens(&recipes, allergens);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let week = generate_week_plan(&available, &mut rng)?;

    println!(
        "Goal: {} ({}x servings, target C:{}% P:{}% F:{}%)",
        goal.label(),
        goal.serving_multiplier(),
        goal.target_macros().carb,
        goal.target_macros().protein,
        goal.target_macros().fat
    );
    if !allergens.is_empty() {
        println!("Avoiding: {}", allergens.join(", "));
    }

    for (index, day) in week.days.iter().enumerate() {
        let total = daily_total(day, goal);
        let macros = macro_snapshot(&total);

        println!("\n{} - {} kcal", day_label(index), total.calories);
        for (slot, recipe) in day.slots() {
            let scaled = scaled_nutrition(recipe, goal);
            println!("  {:<10} {} ({} kcal)", slot.as_str(), recipe.name, scaled.calories);
        }
        println!(
            "  macros     C {}g ({:.1}%) / P {}g ({:.1}%) / F {}g ({:.1}%)",
            macros[0].value,
            macros[0].cal_percentage,
            macros[1].value,
            macros[1].cal_percentage,
            macros[2].value,
            macros[2].cal_percentage
        );
    }

    Ok(())
}
