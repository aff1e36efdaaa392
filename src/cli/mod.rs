//! CLI module
//!
//! Command-line interface for the API client.
//!
//! # Commands
//!
//! - `root` - Fetch the API root
//! - `get` / `head` - Call a single path
//! - `paginate` - Fetch a collection across pages
//! - `rate-limit` - Show the current quota
//! - `status` - Run the status probes
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{parse_params, Runner};
pub use server::{router, serve, serve_on};
