use std::error::Error;

use fetch_page::Client;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://example.com/".to_string());

    println!("Fetching: {url}");

    let mut client = Client::new();
    let text = client.fetch_page(&url)?;

    println!("{text}");

    // A second fetch of the same URL is served from the cache.
    let cached = client.fetch_page(&url)?;
    println!("\n(cached copy is {} characters)", cached.len());

    Ok(())
}
