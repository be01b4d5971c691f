mod property_tests;
mod replay_config;
