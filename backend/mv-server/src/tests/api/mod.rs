mod error;
mod ndjson;
