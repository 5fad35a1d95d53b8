//! Basic usage example for gb2260-rs
//!
//! This example demonstrates how to:
//! - Resolve a division code
//! - Walk the province / prefecture / county hierarchy
//! - Search across revisions by prefix and name
//! - Run a resolver over your own dataset

use gb2260_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== GB2260-RS Basic Usage Example ===\n");

    // Example 1: Resolve a code with the bundled dataset
    println!("--- Example 1: Resolve a code ---");
    let chaoyang = get(110105)?;
    println!("{chaoyang}");
    println!("Code: {}", chaoyang.code());
    println!("Name: {}", chaoyang.name());
    println!("Level: {}", chaoyang.level());
    println!();

    // Example 2: Hierarchy
    println!("--- Example 2: Hierarchy ---");
    println!("Province: {}", chaoyang.province()?.name());
    if let Some(prefecture) = chaoyang.prefecture()? {
        println!("Prefecture: {}", prefecture.name());
    }
    for (depth, level) in chaoyang.stack().enumerate() {
        println!("{}{}", "  ".repeat(depth), level?.name());
    }
    println!();

    // Example 3: Search by prefix and name
    println!("--- Example 3: Search ---");
    for d in search("", Some("朝阳")) {
        println!("{d}");
    }
    println!("Divisions under Beijing: {}", search("11", None).len());
    println!();

    // Example 4: A resolver over your own table
    println!("--- Example 4: Custom dataset ---");
    let resolver = Resolver::with_config(
        Dataset::from_entries([(440000, "广东省"), (440300, "深圳市"), (440305, "南山区")]),
        ResolverConfig::default().with_cache(CacheMode::Strong),
    );
    let nanshan = resolver.get("440305")?;
    println!("{nanshan}");
    println!("Cached divisions: {}", resolver.cached_len());

    Ok(())
}
