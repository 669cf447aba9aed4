//! `parley doctor`: Diagnose configuration and backend health.

use parley_core::{GenerationBackend, HandlerRegistry};

use super::Overrides;

pub async fn run(overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Parley Doctor: System Diagnostics");
    println!("=====================================\n");

    let mut issues = 0;

    let config_path = overrides.config_path();
    if config_path.exists() {
        println!("  ✅ Config file found at {}", config_path.display());
    } else {
        println!("  ⚠️  No config file, using defaults (run `parley config init`)");
    }

    let config = match overrides.load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!();
            println!("  ⚠️  1 issue found. See above for details.");
            return Ok(());
        }
    };

    match parley_handlers::default_registry(&config) {
        Ok(registry) => {
            println!("  ✅ {} route(s) bound to handlers", registry.routes().len());
            for line in route_lines(&registry) {
                println!("     {line}");
            }
        }
        Err(e) => {
            println!("  ❌ Route configuration: {e}");
            issues += 1;
        }
    }

    let backend = parley_providers::build_from_config(&config);
    if check_backend(backend.as_ref()).await {
        println!("  ✅ Backend reachable at {}", config.backend.base_url);
    } else {
        issues += 1;
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

/// One line per route, in evaluation order: handler, subject and what it does.
fn route_lines(registry: &HandlerRegistry) -> Vec<String> {
    registry
        .routes()
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let description = registry
                .get(&route.handler)
                .map(|h| h.description())
                .unwrap_or("(no handler)");
            format!(
                "{}. {} [{}]: {description}",
                i + 1,
                route.handler,
                route.subject_id
            )
        })
        .collect()
}

async fn check_backend(backend: &dyn GenerationBackend) -> bool {
    match backend.health_check().await {
        Ok(true) => true,
        Ok(false) => {
            println!("  ❌ Backend {} answered with an error status", backend.name());
            false
        }
        Err(e) => {
            println!("  ❌ Backend {} unreachable: {e}", backend.name());
            false
        }
    }
}
