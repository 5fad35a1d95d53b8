//! Error handling example for gb2260-rs
//!
//! This example demonstrates invalid codes and missing hierarchy levels.

use gb2260_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== GB2260-RS Error Handling Example ===\n");

    // Example 1: Codes that do not resolve
    println!("--- Example 1: Invalid codes ---");
    for code in ["999999", "11010x", "", "110105"] {
        match get(code) {
            Ok(d) => println!("  Found: {d}"),
            Err(GbError::InvalidCode(c)) => println!("  Invalid: {c:?}"),
            Err(e) => return Err(e),
        }
    }
    println!();

    // Example 2: Search never fails
    println!("--- Example 2: Empty search ---");
    let hits = search("99999999", None);
    println!("  Matches for 99999999: {}", hits.len());
    println!();

    // Example 3: A dataset with a gap in the hierarchy
    println!("--- Example 3: Missing prefecture ---");
    let resolver = Resolver::new(Dataset::from_entries([(110000, "北京市"), (110105, "朝阳区")]));
    let d = resolver.get(110105)?;
    match d.prefecture() {
        Ok(p) => println!("  Prefecture: {p:?}"),
        Err(e) => println!("  Prefecture lookup failed: {e}"),
    }

    Ok(())
}
