use std::error::Error;

use fetch_page::Client;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    let terms: Vec<String> = std::env::args().skip(1).collect();
    if terms.is_empty() {
        println!("Usage: cargo run --example search_links <term>...");
        return Ok(());
    }

    let mut client = Client::new();
    let links = client.search(&terms)?;

    if links.is_empty() {
        println!("No results found.");
    }
    for (idx, link) in links.iter().enumerate() {
        println!("{}. {}", idx + 1, link);
    }

    Ok(())
}
