use crate::{BroadcastChannel, ReplayConfig, StreamError};

use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap()
}

/// Read until the channel closes, or until `limit` items when given.
async fn collect(
    mut handle: crate::SubscriptionHandle<u32>,
    limit: Option<usize>,
) -> Vec<u32> {
    let mut received = Vec::new();
    loop {
        if limit.is_some_and(|limit| received.len() >= limit) {
            handle.cancel();
            return received;
        }
        match handle.next_item().await {
            Ok(item) => received.push(item),
            Err(StreamError::Closed { .. }) => return received,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}

// =========================================================================
// Property-Based Tests - Ordering
// =========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn given_concurrent_subscribers_when_published_then_each_sees_full_sequence_in_order(
        items in prop::collection::vec(any::<u32>(), 0..64),
        join_points in prop::collection::vec(0usize..64, 1..6),
    ) {
        let received = runtime().block_on(async {
            let channel = BroadcastChannel::new("prop", ReplayConfig::all());
            let mut readers = Vec::new();

            for (index, item) in items.iter().enumerate() {
                for _ in join_points.iter().filter(|point| **point == index) {
                    readers.push(tokio::spawn(collect(channel.subscribe(), None)));
                }
                channel.publish(*item);
                tokio::task::yield_now().await;
            }
            // Join points past the end subscribe after the last publish.
            for _ in join_points.iter().filter(|point| **point >= items.len()) {
                readers.push(tokio::spawn(collect(channel.subscribe(), None)));
            }
            channel.close();

            let mut received = Vec::new();
            for reader in readers {
                received.push(reader.await.unwrap());
            }
            received
        });

        prop_assert_eq!(received.len(), join_points.len());
        for sequence in received {
            prop_assert_eq!(&sequence, &items);
        }
    }

    #[test]
    fn given_subscribers_cancelling_midway_when_published_then_each_sees_ordered_prefix(
        items in prop::collection::vec(any::<u32>(), 1..64),
        limits in prop::collection::vec(0usize..64, 1..6),
    ) {
        let received = runtime().block_on(async {
            let channel = BroadcastChannel::new("prop", ReplayConfig::all());
            let readers: Vec<_> = limits
                .iter()
                .map(|limit| tokio::spawn(collect(channel.subscribe(), Some(*limit))))
                .collect();

            for item in &items {
                channel.publish(*item);
                tokio::task::yield_now().await;
            }
            channel.close();

            let mut received = Vec::new();
            for reader in readers {
                received.push(reader.await.unwrap());
            }
            received
        });

        for (sequence, limit) in received.iter().zip(&limits) {
            let expected = &items[..(*limit).min(items.len())];
            prop_assert_eq!(sequence.as_slice(), expected);
        }
    }
}
