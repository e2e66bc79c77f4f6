//! Command-line argument definitions for the confsched CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the conference directory, the program
//! document and output location, which documents to produce, and logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the confsched tool
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Conference directory holding the program and item documents
    #[arg(default_value = ".")]
    pub dir: String,

    /// Program document, relative to the conference directory
    /// [default: `program` from the configuration, `program.tex`]
    #[arg(short, long)]
    pub program: Option<String>,

    /// Output directory, recreated on every run [default: <DIR>/output]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Do not produce one document per item
    #[arg(long)]
    pub no_items: bool,

    /// Do not produce the master document of all items
    #[arg(long)]
    pub no_master: bool,

    /// Do not read the program nor produce room signage and chair packets
    #[arg(long)]
    pub no_rooms: bool,

    /// Publish the LaTeX sources instead of running the renderer
    #[arg(long)]
    pub tex_only: bool,

    /// Keep producing documents after a renderer failure
    #[arg(long)]
    pub keep_going: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
