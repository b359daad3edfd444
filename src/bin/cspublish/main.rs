use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spdlog::{error, info, warn};

use cspublish::bootstrap::bootstrap_site;
use cspublish::config::Config;
use cspublish::content::MarkerExtractor;
use cspublish::logger::configure_logger;
use cspublish::publisher::Publisher;
use cspublish::scaffold::{author_name, Scaffolder, Technology};
use cspublish::view::MustacheRenderer;

use crate::config::open_config;

mod config;

#[derive(Parser, Debug)]
#[command(version, about = "Automate cloud and software blog posts", long_about = None)]
struct Args {
    /// Config path. Defaults to cspublish.toml in the current directory,
    /// next to the executable or in the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new draft in the work-in-progress folder
    Generate(GenerateArgs),
    /// Publish a draft and rebuild the index
    Publish(PublishArgs),
    /// Rebuild the index from the published posts
    Reindex,
    /// Bootstrap a new blog
    Init(InitArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Subtitle of the post
    #[arg(short, long)]
    subtitle: String,

    /// Technology the post is about
    #[arg(short = 'c', long, ignore_case = true)]
    technology: Technology,

    /// Name of the author. If empty, OS user real name is being used
    #[arg(short, long)]
    name: Option<String>,
}

#[derive(Parser, Debug)]
struct PublishArgs {
    /// Draft to publish, it has to be in the work-in-progress folder
    #[arg(short, long)]
    file: PathBuf,
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Directory where the new blog will be generated
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

fn generate_cmd(config: &Config, args: GenerateArgs) -> Result<()> {
    let renderer = MustacheRenderer::new(&config.paths.tooling_dir, &config.templates);
    let scaffolder = Scaffolder { paths: &config.paths, renderer: &renderer };
    let author = args.name.unwrap_or_else(author_name);
    scaffolder.generate(&args.title, &args.subtitle, args.technology, &author)?;
    Ok(())
}

fn publish_cmd(config: &Config, args: PublishArgs) -> Result<()> {
    let renderer = MustacheRenderer::new(&config.paths.tooling_dir, &config.templates);
    let extractor = MarkerExtractor {};
    let report = Publisher::new(config, &renderer, &extractor).publish(&args.file)?;
    info!("Published {} ({} posts in the index)", report.post_path.display(), report.index_entries);
    Ok(())
}

fn reindex_cmd(config: &Config) -> Result<()> {
    let renderer = MustacheRenderer::new(&config.paths.tooling_dir, &config.templates);
    let extractor = MarkerExtractor {};
    Publisher::new(config, &renderer, &extractor).index_builder().rebuild()?;
    Ok(())
}

fn init_cmd(args: InitArgs) -> Result<()> {
    let config = bootstrap_site(&args.out_dir)?;
    info!("Site ready. Drafts go to {}", config.paths.wip_dir.display());
    Ok(())
}

fn load_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config = match open_config(cfg_path) {
        Ok(config) => config,
        Err(err) => {
            anyhow::bail!("{}\nPlease run cspublish --help", err);
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    // init creates the config, every other command needs one
    match args.command {
        Command::Init(init_args) => init_cmd(init_args),
        Command::Generate(gen_args) => generate_cmd(&load_config(args.config)?, gen_args),
        Command::Publish(publish_args) => publish_cmd(&load_config(args.config)?, publish_args),
        Command::Reindex => reindex_cmd(&load_config(args.config)?),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
