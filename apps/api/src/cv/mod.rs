// CV parsing and validation endpoints.
// Parsing is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod handlers;
