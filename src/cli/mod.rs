//! CLI module for the Norruva DPP service
//!
//! - `serve`: run the HTTP action API
//! - `digital-link`: build a GS1 Digital Link (and QR code) offline

pub mod link;
pub mod serve;

use clap::{Parser, Subcommand};

/// Norruva Digital Product Passport service
#[derive(Parser)]
#[command(name = "norruva-dpp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Print the GS1 Digital Link for a product
    DigitalLink(link::DigitalLinkArgs),
}
