//! `socdeck modules`: print the slide catalog.

use socdeck_core::Platform;
use socdeck_report::{select_modules, REGISTRY};

pub(crate) fn run_modules(platforms: &[String]) -> anyhow::Result<()> {
    let enabled: Vec<Platform> = if platforms.is_empty() {
        Platform::ALL.to_vec()
    } else {
        platforms
            .iter()
            .map(|p| p.parse::<Platform>())
            .collect::<Result<_, _>>()?
    };

    println!("{:>5}  {:<18} {:<10} {:<9} NAME", "ORDER", "ID", "PLATFORM", "CATEGORY");
    for module in select_modules(REGISTRY, &enabled) {
        println!(
            "{:>5}  {:<18} {:<10} {:<9} {}",
            module.order, module.id, module.platform, module.category, module.name
        );
    }
    Ok(())
}
