/* tests/store_tests.rs */

#![cfg(all(feature = "holder", feature = "validate"))]

use std::sync::Arc;

use livecfg::format::AnyFormat;
use livecfg::holder::{HoldError, Store, Typed};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, PartialEq, Validate)]
struct Limits {
	#[validate(range(min = 1))]
	max_players: u32,
	motd: String,
}

fn store() -> Store<Typed<Limits>> {
	Store::default()
}

#[test]
fn test_parse_installs_snapshot() {
	let store = store();
	assert!(!store.is_loaded());
	assert_eq!(store.version(), 0);

	let hub = store
		.parse(br#"{"max_players": 8, "motd": "hi"}"#, AnyFormat::Json)
		.unwrap();
	assert_eq!(hub.max_players, 8);
	assert_eq!(store.latest().motd, "hi");
	assert_eq!(store.version(), 1);
	assert_eq!(store.checksum(), None);
}

#[test]
fn test_failed_parse_keeps_previous_snapshot() {
	let store = store();
	store
		.parse(br#"{"max_players": 8, "motd": "hi"}"#, AnyFormat::Json)
		.unwrap();

	let err = store.parse(b"{\"max_players\": ", AnyFormat::Json).unwrap_err();
	assert!(matches!(err, HoldError::Format(_)));
	assert_eq!(store.latest().max_players, 8);
	assert_eq!(store.version(), 1);
}

#[test]
fn test_validation_rejects_snapshot() {
	let store = store();
	let err = store
		.parse(br#"{"max_players": 0, "motd": ""}"#, AnyFormat::Json)
		.unwrap_err();
	assert!(matches!(err, HoldError::Validation(_)));
	assert!(store.try_latest().is_none());
}

#[test]
fn test_readers_keep_their_snapshot() {
	let store = store();
	store
		.parse(br#"{"max_players": 1, "motd": "old"}"#, AnyFormat::Json)
		.unwrap();
	let held = store.latest();

	store
		.parse(br#"{"max_players": 2, "motd": "new"}"#, AnyFormat::Json)
		.unwrap();
	assert_eq!(held.motd, "old");
	assert_eq!(store.latest().motd, "new");
	assert!(!Arc::ptr_eq(&held, &store.latest()));
	assert_eq!(store.meta().unwrap().version, 2);
}

#[test]
#[should_panic(expected = "before the first successful load")]
fn test_latest_panics_before_first_load() {
	let _ = store().latest();
}

#[cfg(feature = "events")]
#[tokio::test]
async fn test_swap_events() {
	use livecfg::holder::HoldEvent;

	let store = store();
	let mut events = store.subscribe();

	store
		.parse(br#"{"max_players": 1, "motd": "a"}"#, AnyFormat::Json)
		.unwrap();
	store
		.parse(br#"{"max_players": 2, "motd": "b"}"#, AnyFormat::Json)
		.unwrap();
	let _ = store.parse(b"garbage", AnyFormat::Json);

	match events.recv().await.unwrap() {
		HoldEvent::Loaded { hub, meta } => {
			assert_eq!(hub.motd, "a");
			assert_eq!(meta.version, 1);
		}
		other => panic!("expected Loaded, got {other:?}"),
	}
	match events.recv().await.unwrap() {
		HoldEvent::Updated { old, new, meta } => {
			assert_eq!(old.motd, "a");
			assert_eq!(new.motd, "b");
			assert_eq!(meta.version, 2);
		}
		other => panic!("expected Updated, got {other:?}"),
	}
	assert!(events.try_recv().is_err());
}
