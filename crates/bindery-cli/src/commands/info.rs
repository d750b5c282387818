//! `bindery info` — Display version and effective configuration.

use bindery_sdk::INTERNAL_FIELD_COUNT;

use crate::demo;
use crate::session::ResolvedOptions;

pub fn execute(resolved: &ResolvedOptions) -> anyhow::Result<()> {
    for line in report(resolved) {
        println!("{}", line);
    }
    Ok(())
}

/// Lines printed by `bindery info`
pub fn report(resolved: &ResolvedOptions) -> Vec<String> {
    let options = &resolved.options;
    let mut lines = vec![format!("Bindery v{}", env!("CARGO_PKG_VERSION")), String::new()];

    match &resolved.config_path {
        Some(path) => lines.push(format!("Config:         {}", path.display())),
        None => lines.push("Config:         (defaults)".to_string()),
    }
    lines.push(format!("Traversal:      {}", options.traversal));
    lines.push(format!("Collision warn: {}", options.warn_on_collision));
    lines.push(format!("Internal slots: {}", INTERNAL_FIELD_COUNT));

    let registry = demo::demo_registry();
    lines.push(String::new());
    lines.push(format!("Module:         {}", demo::MODULE_NAME));
    lines.push(format!("Registrations:  {}", registry.len()));

    lines.push(String::new());
    lines.push("Environment:".to_string());
    match std::env::var("BINDERY_LOG") {
        Ok(val) => lines.push(format!("  BINDERY_LOG = {}", val)),
        Err(_) => lines.push("  BINDERY_LOG = (unset)".to_string()),
    }

    lines
}
