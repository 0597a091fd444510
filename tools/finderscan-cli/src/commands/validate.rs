//! Parse a detection stream and report its geometry.

use std::path::PathBuf;

use finderscan_scan_model::{parse_events, BoundsShape};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let events = parse_events(&content)?;

    let rects = events
        .iter()
        .filter(|e| e.bounds.shape() == BoundsShape::Rect)
        .count();
    let clouds = events.len() - rects;
    let malformed: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.bounds.is_well_formed())
        .map(|(i, _)| i)
        .collect();

    println!("Detection stream: {}", path.display());
    println!("  Events: {}", events.len());
    println!("  Rect bounds: {rects}");
    println!("  Point-cloud bounds: {clouds}");

    if rects > 0 && clouds > 0 {
        println!("[WARN] Stream mixes both bounds shapes; one filter will drop the other shape.");
    }

    if malformed.is_empty() {
        println!("[OK] All coordinates coerce to finite numbers.");
    } else {
        println!(
            "[WARN] {} event(s) carry coordinates that cannot be coerced and will never be accepted:",
            malformed.len()
        );
        for index in &malformed {
            let event = &events[*index];
            println!("     #{index} data={:?} type={:?}", event.data, event.symbology);
        }
    }

    Ok(())
}
