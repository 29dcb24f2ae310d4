use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Validate SnippetsPolicy resources and render them into NGINX include files"
)]
pub struct Args {
    /// Path to configuration file (TOML) declaring gateways and policies
    #[arg(long = "config", value_name = "PATH")]
    pub config: PathBuf,

    /// Write include files under this directory instead of printing them
    #[arg(long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Only validate the policies, render nothing
    #[arg(long = "check")]
    pub check: bool,
}
