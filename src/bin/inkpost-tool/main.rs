use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config_data::config_cmd;
use crate::post::post_cmd;

mod config_data;
mod post;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Creating post
    Post(PostArgs),
    /// Writes a sample configuration file
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct PostArgs {
    /// Name of the author. If empty, OS user real name is being used
    #[arg(short, long)]
    name: Option<String>,

    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Short summary shown in the post list
    #[arg(short, long, default_value_t = String::new())]
    excerpt: String,

    /// Comma separated tags
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Reading time in minutes
    #[arg(short, long, default_value_t = 1)]
    read_time: u32,

    /// Post generation options
    #[arg(short, long, default_value_t = PostOutput::Stdout)]
    output: PostOutput,

    /// Directory receiving the markdown body when writing files
    #[arg(long, default_value = ".")]
    content_dir: PathBuf,

    /// Content index the new entry is appended to when writing files
    #[arg(long)]
    index: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ConfigArgs {
    /// Where to write the sample. Defaults to the user config directory
    #[arg(short, long)]
    path: Option<PathBuf>,
}

#[derive(Clone, Debug, ValueEnum)]
enum PostOutput {
    /// Writes the index entry and the body to the stdout
    Stdout,
    /// Writes the body to the content dir and appends the entry to the index
    File,
}

impl Display for PostOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PostOutput::Stdout => write!(f, "stdout"),
            PostOutput::File => write!(f, "file"),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args {
        Args::Post(args) => post_cmd(args),
        Args::Config(args) => config_cmd(args),
    }
}
