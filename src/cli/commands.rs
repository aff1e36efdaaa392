//! CLI commands and argument parsing

use crate::auth::ApiToken;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ohana API command-line client
#[derive(Parser, Debug)]
#[command(name = "ohanakapa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client options file (YAML)
    #[arg(short = 'C', long, global = true, env = "OHANAKAPA_CONFIG")]
    pub config: Option<PathBuf>,

    /// API endpoint
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// API token
    #[arg(short, long, global = true)]
    pub token: Option<ApiToken>,

    /// Default media type for the Accept header
    #[arg(long, global = true)]
    pub media_type: Option<String>,

    /// User-Agent header
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Follow `next` links when paginating
    #[arg(long, global = true)]
    pub auto_paginate: Option<bool>,

    /// Page size hint
    #[arg(long, global = true)]
    pub per_page: Option<u32>,

    /// Proxy URL
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the API root
    Root,

    /// GET a path
    Get {
        /// Path relative to the endpoint, or an absolute URL
        path: String,

        /// Query parameter (key=value), repeatable
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Accept header for this call
        #[arg(long)]
        accept: Option<String>,
    },

    /// HEAD a path and print the status and headers
    Head {
        /// Path relative to the endpoint, or an absolute URL
        path: String,
    },

    /// GET a collection, following `next` links
    Paginate {
        /// Path relative to the endpoint
        path: String,

        /// Query parameter (key=value), repeatable
        #[arg(short, long = "param")]
        params: Vec<String>,
    },

    /// Show the current rate limit
    RateLimit,

    /// Run the status probes
    Status,

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
