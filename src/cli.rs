use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "quiztake", version, about = "Take a timed quiz in the terminal")]
pub struct Cli {
    /// Quiz file (Markdown with YAML frontmatter)
    pub quiz: PathBuf,

    /// Override the quiz time limit, in minutes
    #[arg(long, value_name = "minutes", allow_negative_numbers = true)]
    pub minutes: Option<i64>,

    /// Directory for submitted attempts [default: platform data dir]
    #[arg(long, value_name = "dir")]
    pub results_dir: Option<PathBuf>,

    /// Submit by committing and pushing to the quiz's git repository
    #[arg(long, conflicts_with = "results_dir")]
    pub git: bool,

    /// Log file [default: platform data dir]
    #[arg(long, value_name = "path")]
    pub log_file: Option<PathBuf>,

    /// Validate the quiz file, print a summary and exit
    #[arg(long)]
    pub check: bool,
}
