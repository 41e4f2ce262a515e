use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use seampack::entities::{Orientation, PaperSize};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Pattern documents to paginate (.svg or .json)
    #[arg(short, long, value_name = "FILE", num_args = 1.., required = true)]
    pub input_file: Vec<PathBuf>,
    #[arg(short, long, value_name = "FOLDER")]
    pub solution_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
    /// Overrides the paper size of the config [A4, A3, B4, B5]
    #[arg(short, long)]
    pub paper: Option<PaperSize>,
    /// Overrides the orientation of the config [portrait, landscape]
    #[arg(short, long)]
    pub orientation: Option<Orientation>,
    /// Overrides the seam allowance of the config (mm)
    #[arg(short, long, value_name = "MM")]
    pub allowance: Option<f64>,
}
