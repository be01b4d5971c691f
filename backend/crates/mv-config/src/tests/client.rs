use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Client
// =========================================================================

#[test]
#[serial]
fn given_non_http_url_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _url = EnvGuard::set("MV_CLIENT_MOVIES_INFO_URL", "ftp://movies/v1/moviesinfo");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_custom_urls_when_load_then_applied() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _info = EnvGuard::set("MV_CLIENT_MOVIES_INFO_URL", "http://info:8080/v1/moviesinfo");
    let _reviews = EnvGuard::set("MV_CLIENT_REVIEWS_URL", "https://reviews/v1/reviews");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(
        config.client.movies_info_url.as_str(),
        eq("http://info:8080/v1/moviesinfo")
    );
    assert_that!(config.client.reviews_url.as_str(), eq("https://reviews/v1/reviews"));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_zero_request_timeout_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _timeout = EnvGuard::set("MV_CLIENT_REQUEST_TIMEOUT_SECS", "0");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}
