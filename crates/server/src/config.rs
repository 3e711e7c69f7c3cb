// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line arguments and the runtime configuration built from them.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Procura Server - HTTP server for the Procura tender/bid service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to bind the server to
    #[arg(short, long, env = "SERVER_ADDRESS", default_value = "0.0.0.0:8080")]
    pub address: SocketAddr,

    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "DATABASE_PATH")]
    pub database: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Runtime configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The socket address to listen on.
    pub address: SocketAddr,
    /// The database file, or `None` for an in-memory database.
    pub database: Option<PathBuf>,
    /// The fallback tracing filter directive.
    pub log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            address: args.address,
            database: args.database,
            log_level: args.log_level,
        }
    }
}
