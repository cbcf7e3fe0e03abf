use std::io::{self, BufRead, Write};

use clap::Parser;
use fetch_page::Client;

mod args;
use args::Args;

fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();
    let mut client = build_client(&args);

    // --url wins when both flags are given
    if let Some(url) = &args.url {
        print_page(&mut client, url);
    } else if let Some(terms) = &args.search {
        run_search(&mut client, terms);
    } else {
        println!("Please provide an option: '-u' to fetch a URL or '-s' to search.");
    }
}

/// Assemble the client from the optional config file and flag overrides.
fn build_client(args: &Args) -> Client {
    let client = match &args.config {
        Some(path) => match Client::with_config_file(path) {
            Ok(client) => client,
            Err(e) => {
                ::log::error!("failed to load config {}: {e}", path.display());
                std::process::exit(2);
            }
        },
        None => Client::new(),
    };

    match &args.cache_dir {
        Some(dir) => client.with_cache_dir(dir.clone()),
        None => client,
    }
}

/// Fetch a URL and print its text rendering. Any failure collapses to a
/// logged error plus the generic no-response notice.
fn print_page(client: &mut Client, url: &str) {
    match client.fetch_page(url) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            ::log::error!("request for {url} failed: {e}");
            println!("No response received.");
        }
    }
}

/// Run a search, list the result links, and follow the user's pick.
fn run_search(client: &mut Client, terms: &[String]) {
    let links = match client.search(terms) {
        Ok(links) => links,
        Err(e) => {
            ::log::error!("search failed: {e}");
            println!("No response received.");
            return;
        }
    };

    if links.is_empty() {
        println!("No results found.");
        return;
    }

    for (idx, link) in links.iter().enumerate() {
        println!("{}. {}", idx + 1, link);
    }

    if let Some(choice) = prompt_for_choice(links.len()) {
        print_page(client, &links[choice - 1]);
    }
}

/// Prompt until the user picks a listed result. Returns None when stdin
/// is exhausted.
fn prompt_for_choice(count: usize) -> Option<usize> {
    let stdin = io::stdin();
    loop {
        print!("Select a search result (1-{count}): ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(e) => {
                ::log::error!("failed to read selection: {e}");
                return None;
            }
        }

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Some(n),
            Ok(_) => println!("Invalid choice. Please select a number between 1 and {count}."),
            Err(_) => println!("Invalid input. Please enter a valid number."),
        }
    }
}
