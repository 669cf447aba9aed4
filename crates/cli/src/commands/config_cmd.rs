//! `parley config`: Configuration management commands.

use parley_config::AppConfig;

use super::Overrides;

pub async fn validate(overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match overrides.load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();
            if config.session.turn_timeout_secs.is_none() {
                warnings.push("No turn timeout: a stalled backend blocks the session");
            }
            if config.routes.is_empty() {
                warnings.push("No routes: every turn goes to the backend");
            }
            if config.context.passages.is_empty() {
                warnings.push("No context passages: every prompt uses the fallback");
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Backend:   {}", config.backend.kind);
            println!("   Base URL:  {}", config.backend.base_url);
            println!("   Model:     {}", config.backend.model);
            println!("   Routes:    {}", config.routes.len());
            println!("   Passages:  {}", config.context.passages.len());
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show(overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    let config = overrides
        .load()
        .map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn init(overrides: &Overrides, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = overrides.config_path();
    if path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&path, AppConfig::default_toml())?;
    println!("✅ Wrote default configuration to {}", path.display());
    Ok(())
}

pub async fn path(overrides: &Overrides) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", overrides.config_path().display());
    Ok(())
}
