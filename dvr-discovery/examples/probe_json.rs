//! Probe a recorder for its media server and print the result as JSON
//!
//! Usage: cargo run -p dvr-sdk-discovery --example probe_json -- 192.168.1.20

use dvr_discovery::{discover_content_endpoint, DiscoveryConfig};

fn main() {
    let host = std::env::args().nth(1).unwrap_or_else(|| "192.168.1.20".to_string());

    match discover_content_endpoint(&host, &DiscoveryConfig::default()) {
        Some(endpoint) => println!("{}", serde_json::to_string_pretty(&endpoint).unwrap()),
        None => {
            eprintln!("no media server found on {}", host);
            std::process::exit(1);
        }
    }
}
