use anyhow::Result;

use crate::config::Config;

/// Print the configured vocabulary in lookup order.
pub fn list_scales(config: &Config) -> Result<()> {
    let vocabulary = config.vocabulary()?;

    println!("{:<20} {:<6} {:<16} QUALITY", "SCALE", "ROOT", "MODE");
    for entry in vocabulary.entries() {
        let quality = entry.quality.map(|q| q.as_str()).unwrap_or("-");
        println!(
            "{:<20} {:<6} {:<16} {}",
            entry.name, entry.root, entry.mode, quality
        );
    }
    if vocabulary.is_empty() {
        eprintln!("Vocabulary is empty: keys will be returned as written in the guidebook.");
    }
    Ok(())
}
