/* tests/spawn_tests.rs */

#![cfg(feature = "spawn")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use livecfg::spawn::{self, ChanOptions};
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_run_signals_completion() {
	let parent = CancellationToken::new();
	let calls = Arc::new(AtomicUsize::new(0));

	let counter = Arc::clone(&calls);
	let handle = spawn::run(&parent, move |_token| async move {
		counter.fetch_add(1, Ordering::SeqCst);
	});
	handle.wait().await;

	assert!(handle.is_finished());
	assert!(handle.is_cancelled());
	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert!(!parent.is_cancelled());
}

#[tokio::test]
async fn test_cancel_stops_run() {
	let parent = CancellationToken::new();
	let handle = spawn::run(&parent, |token| async move {
		token.cancelled().await;
	});
	assert!(!handle.is_finished());

	handle.cancel();
	handle.cancel();
	assert!(handle.join_timeout(Duration::from_secs(5)).await);
}

#[tokio::test]
async fn test_parent_cancellation_propagates() {
	let parent = CancellationToken::new();
	let first = spawn::run(&parent, |token| async move { token.cancelled().await });
	let second = spawn::run(&parent, |token| async move { token.cancelled().await });

	parent.cancel();
	assert!(first.join_timeout(Duration::from_secs(5)).await);
	assert!(second.join_timeout(Duration::from_secs(5)).await);
}

#[tokio::test]
async fn test_join_is_bounded_by_context() {
	let parent = CancellationToken::new();
	// Ignores its token on purpose.
	let handle = spawn::run(&parent, |_token| std::future::pending::<()>());

	let ctx = CancellationToken::new();
	ctx.cancel();
	assert!(!handle.join(&ctx).await);
	assert!(!handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_tick_runs_on_period() {
	let parent = CancellationToken::new();
	let calls = Arc::new(AtomicUsize::new(0));

	let counter = Arc::clone(&calls);
	let handle = spawn::tick(
		&parent,
		move |_token| {
			let counter = Arc::clone(&counter);
			async move {
				counter.fetch_add(1, Ordering::SeqCst);
			}
		},
		Duration::from_millis(100),
	);

	tokio::time::sleep(Duration::from_millis(50)).await;
	assert_eq!(calls.load(Ordering::SeqCst), 0);

	tokio::time::sleep(Duration::from_millis(400)).await;
	parent.cancel();
	handle.wait().await;

	let n = calls.load(Ordering::SeqCst);
	assert!((3..=5).contains(&n), "expected about four ticks, got {n}");
}

#[test]
#[should_panic(expected = "non-zero")]
fn test_tick_rejects_zero_period() {
	let parent = CancellationToken::new();
	let _ = spawn::tick(&parent, |_token| async {}, Duration::ZERO);
}

#[tokio::test]
async fn test_chan_cleanup_drains_buffered_values() {
	let parent = CancellationToken::new();
	parent.cancel();

	let (tx, rx) = mpsc::channel(8);
	for i in 0..5 {
		tx.send(i).await.unwrap();
	}

	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&seen);
	let handle = spawn::chan(
		&parent,
		rx,
		move |_token, value: i32| {
			let sink = Arc::clone(&sink);
			async move { sink.lock().await.push(value) }
		},
		ChanOptions::new().with_cleanup(true),
	);
	handle.wait().await;

	assert_eq!(*seen.lock().await, [0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_chan2_dispatches_to_matching_handler() {
	let parent = CancellationToken::new();
	let (num_tx, num_rx) = mpsc::unbounded_channel();
	let (text_tx, text_rx) = mpsc::channel(4);

	let sum = Arc::new(AtomicUsize::new(0));
	let words = Arc::new(Mutex::new(Vec::new()));
	let (sum_ref, words_ref) = (Arc::clone(&sum), Arc::clone(&words));
	let handle = spawn::chan2(
		&parent,
		num_rx,
		move |_token, n: usize| {
			let sum = Arc::clone(&sum_ref);
			async move {
				sum.fetch_add(n, Ordering::SeqCst);
			}
		},
		text_rx,
		move |_token, word: String| {
			let words = Arc::clone(&words_ref);
			async move { words.lock().await.push(word) }
		},
		ChanOptions::new(),
	);

	num_tx.send(2).unwrap();
	num_tx.send(3).unwrap();
	text_tx.send("shop".to_string()).await.unwrap();

	tokio::time::timeout(Duration::from_secs(5), async {
		while sum.load(Ordering::SeqCst) < 5 || words.lock().await.is_empty() {
			tokio::task::yield_now().await;
		}
	})
	.await
	.unwrap();

	handle.cancel();
	handle.wait().await;
	assert_eq!(*words.lock().await, ["shop"]);
}

#[tokio::test(start_paused = true)]
async fn test_chan_ticker_option() {
	let parent = CancellationToken::new();
	let (_tx, rx) = mpsc::channel::<()>(1);
	let ticks = Arc::new(AtomicUsize::new(0));

	let counter = Arc::clone(&ticks);
	let handle = spawn::chan(
		&parent,
		rx,
		|_token, _: ()| async {},
		ChanOptions::new().with_ticker(Duration::from_millis(50), move |_token| {
			let counter = Arc::clone(&counter);
			async move {
				counter.fetch_add(1, Ordering::SeqCst);
			}
		}),
	);

	tokio::time::sleep(Duration::from_millis(175)).await;
	handle.cancel();
	handle.wait().await;
	assert_eq!(ticks.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_chan_keeps_running_after_inbox_closes() {
	let parent = CancellationToken::new();
	let (tx, rx) = mpsc::channel::<u8>(1);
	let handle = spawn::chan(&parent, rx, |_token, _: u8| async {}, ChanOptions::new());

	drop(tx);
	tokio::time::sleep(Duration::from_millis(20)).await;
	assert!(!handle.is_finished());

	parent.cancel();
	assert!(handle.join_timeout(Duration::from_secs(5)).await);
}

#[tokio::test(start_paused = true)]
async fn test_join_waits_for_function_exit_after_cancel() {
	let parent = CancellationToken::new();
	let cleaned = Arc::new(AtomicUsize::new(0));

	let flag = Arc::clone(&cleaned);
	let handle = spawn::run(&parent, move |token| async move {
		token.cancelled().await;
		tokio::time::sleep(Duration::from_millis(100)).await;
		flag.store(1, Ordering::SeqCst);
	});

	handle.cancel();
	assert!(!handle.is_finished());
	assert!(handle.join(&CancellationToken::new()).await);
	assert_eq!(cleaned.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_tick_never_overlaps_slow_calls() {
	let parent = CancellationToken::new();
	let calls = Arc::new(AtomicUsize::new(0));
	let in_flight = Arc::new(AtomicUsize::new(0));
	let max_in_flight = Arc::new(AtomicUsize::new(0));

	let (counter, current, max) = (
		Arc::clone(&calls),
		Arc::clone(&in_flight),
		Arc::clone(&max_in_flight),
	);
	let handle = spawn::tick(
		&parent,
		move |_token| {
			let (counter, current, max) =
				(Arc::clone(&counter), Arc::clone(&current), Arc::clone(&max));
			async move {
				let now = current.fetch_add(1, Ordering::SeqCst) + 1;
				max.fetch_max(now, Ordering::SeqCst);
				tokio::time::sleep(Duration::from_millis(250)).await;
				current.fetch_sub(1, Ordering::SeqCst);
				counter.fetch_add(1, Ordering::SeqCst);
			}
		},
		Duration::from_millis(100),
	);

	tokio::time::sleep(Duration::from_millis(1_200)).await;
	parent.cancel();
	handle.wait().await;

	assert!(calls.load(Ordering::SeqCst) >= 3);
	assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_chan3_cleanup_drains_every_inbox() {
	let parent = CancellationToken::new();
	parent.cancel();

	let (a_tx, a_rx) = mpsc::channel(8);
	let (b_tx, b_rx) = mpsc::unbounded_channel();
	let (c_tx, c_rx) = mpsc::channel(8);
	for i in 0..3 {
		a_tx.send(i).await.unwrap();
		b_tx.send(i + 10).unwrap();
		c_tx.send(i + 20).await.unwrap();
	}

	let seen = Arc::new(Mutex::new(Vec::new()));
	let (a_sink, b_sink, c_sink) = (Arc::clone(&seen), Arc::clone(&seen), Arc::clone(&seen));
	let handle = spawn::chan3(
		&parent,
		a_rx,
		move |_token, value: i32| {
			let sink = Arc::clone(&a_sink);
			async move { sink.lock().await.push(value) }
		},
		b_rx,
		move |_token, value: i32| {
			let sink = Arc::clone(&b_sink);
			async move { sink.lock().await.push(value) }
		},
		c_rx,
		move |_token, value: i32| {
			let sink = Arc::clone(&c_sink);
			async move { sink.lock().await.push(value) }
		},
		ChanOptions::new().with_cleanup(true),
	);
	handle.wait().await;

	let mut seen = seen.lock().await.clone();
	seen.sort_unstable();
	assert_eq!(seen, [0, 1, 2, 10, 11, 12, 20, 21, 22]);
}
