//! `bindery inspect` — list the classes bound by the demo module.

use bindery_core::InitOptions;

use crate::session::{ClassSummary, Session};

pub fn execute(options: InitOptions, json: bool) -> anyhow::Result<()> {
    let session = Session::load(options)?;
    let classes = session.classes();

    if json {
        println!("{}", serde_json::to_string_pretty(&classes)?);
        return Ok(());
    }

    println!(
        "{} ({}): {} classes from {} registrations",
        session.module.name(),
        session.module.options().traversal,
        classes.len(),
        session.registry.len()
    );
    for line in render(&classes) {
        println!("  {}", line);
    }
    Ok(())
}

/// One aligned line per class
pub fn render(classes: &[ClassSummary]) -> Vec<String> {
    let width = classes.iter().map(|c| c.name.len()).max().unwrap_or(0);
    classes
        .iter()
        .map(|c| {
            format!(
                "{:<width$}  slots={}  {}",
                c.name,
                c.internal_fields,
                c.methods.join(", "),
                width = width
            )
        })
        .collect()
}
