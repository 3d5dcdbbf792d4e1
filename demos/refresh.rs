/* demos/refresh.rs */

//! Example: periodic refresh from a scope directory
//!
//! This example demonstrates:
//! - Loading two scopes (`item`, `shop`) from a directory of JSON files
//! - Refreshing them in the background every second
//! - Reacting to snapshot swaps through store events
//!
//! Edit `example_config/item.json` while it runs, then press Ctrl+C.
//!
//! Run with: cargo run --example refresh --features full

use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;

use livecfg::controller::{Client, ClientOptions};
use livecfg::holder::{HoldEvent, Typed};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use validator::Validate;

#[derive(Debug, Default, Deserialize)]
struct Item {
	name: String,
	price: u32,
}

#[derive(Debug, Default, Deserialize, Validate)]
struct Game {
	#[serde(default)]
	item: BTreeMap<String, Item>,
	#[serde(default)]
	shop: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_max_level(tracing::Level::DEBUG)
		.init();

	// 0. Prepare the scope directory
	let dir = "example_config";
	fs::create_dir_all(dir)?;
	fs::write(
		format!("{dir}/item.json"),
		r#"{"sword": {"name": "Sword", "price": 100}, "shield": {"name": "Shield", "price": 80}}"#,
	)?;
	fs::write(format!("{dir}/shop.json"), r#"["sword", "shield"]"#)?;

	// 1. Configure the client the way a host config file would
	let options: ClientOptions = serde_json::from_str(&format!(
		r#"{{"source": "{dir}", "scopes": ["shop", "item"], "refresh_interval": "1s"}}"#
	))?;
	let mut client = Client::new(options, Typed::<Game>::default);

	// 2. First load is synchronous and fatal on failure
	client.init().await?;
	let game = client.latest();
	println!("loaded: {} items, shop sells {:?}", game.item.len(), game.shop);

	// 3. Watch for swaps
	let mut events = client.subscribe();
	tokio::spawn(async move {
		while let Ok(event) = events.recv().await {
			if let HoldEvent::Updated { new, meta, .. } = event {
				for item in new.item.values() {
					println!("v{}: {} costs {}", meta.version, item.name, item.price);
				}
			}
		}
	});

	// 4. Refresh in the background until Ctrl+C
	let shutdown = CancellationToken::new();
	client.start(&shutdown)?;
	tokio::signal::ctrl_c().await?;

	let deadline = CancellationToken::new();
	let timer = deadline.clone();
	tokio::spawn(async move {
		tokio::time::sleep(Duration::from_secs(5)).await;
		timer.cancel();
	});
	shutdown.cancel();
	client.shutdown(&deadline).await;

	fs::remove_dir_all(dir)?;
	Ok(())
}
