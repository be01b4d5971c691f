use crate::{ReplayConfig, ReplayMode};

use mv_config::{ReplayModeSetting, StreamConfig};

#[test]
fn given_latest_stream_config_when_converted_then_window_carried() {
    // Given
    let config = StreamConfig {
        mode: ReplayModeSetting::Latest,
        window: 5,
        require_subscriber: true,
    };

    // When
    let replay = ReplayConfig::from(&config);

    // Then
    assert_eq!(replay.mode, ReplayMode::Latest(5));
    assert!(replay.require_subscriber);
}

#[test]
fn given_all_stream_config_when_converted_then_window_ignored() {
    // Given
    let config = StreamConfig::default();

    // When
    let replay = ReplayConfig::from(&config);

    // Then
    assert_eq!(replay.mode, ReplayMode::All);
    assert!(!replay.require_subscriber);
}

#[test]
fn given_zero_window_when_latest_then_clamped_to_one() {
    let replay = ReplayConfig::latest(0);

    assert_eq!(replay.mode, ReplayMode::Latest(1));
}
