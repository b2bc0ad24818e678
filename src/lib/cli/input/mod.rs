use clap::{Parser, Subcommand, ValueEnum};

use crate::project_model::platform::{Configuration, Platform};

/// [`CliArgs`] is the command line arguments parser
///
/// #Test
/// ```rust
/// use clap::Parser;
/// use forge::cli::input::{CliArgs, Command, PlatformArg};
///
/// let parser = CliArgs::parse_from(["", "-vv", "build"]);
/// assert_eq!(2, parser.verbose);
/// assert_eq!(parser.command, Command::Build);
///
/// let parser = CliArgs::parse_from(["", "--release", "--platform", "windows", "deploy"]);
/// assert!(parser.release);
/// assert_eq!(parser.platform, Some(PlatformArg::Windows));
/// assert_eq!(parser.command, Command::Deploy);
///
/// let parser = CliArgs::parse_from(["", "--targets", "vulkan,tools", "build"]);
/// assert_eq!(parser.targets, Some(vec![String::from("vulkan"), String::from("tools")]));
/// ```
#[derive(Parser, Debug, Default)]
#[command(name = "forge")]
#[command(author = "Forge Developers")]
#[command(version = "0.3.1")]
#[command(
    about = "forge is a declarative build and deployment orchestrator for native applications",
    long_about = "forge reads the targets, libraries, data directories and deploy manifest declared \
    in the forge*.toml files of a project, drives the native toolchain to build them and assembles \
    a deployable directory"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, help = "forge maximum allowed verbosity level is: '-vv'")]
    pub verbose: u8,

    #[arg(short, long, help = "Absolute or relative path to the project root")]
    pub root: Option<String>,

    #[arg(
        short,
        long,
        help = "Only the configuration files whose name contains this value are processed"
    )]
    pub match_files: Option<String>,

    #[arg(long, value_enum, help = "The platform to build for. Defaults to the host one")]
    pub platform: Option<PlatformArg>,

    #[arg(long, help = "Builds with the release configuration instead of the debug one")]
    pub release: bool,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Only the declared targets with these names are built"
    )]
    pub targets: Option<Vec<String>>,
}

impl CliArgs {
    pub fn configuration(&self) -> Configuration {
        if self.release {
            Configuration::Release
        } else {
            Configuration::Debug
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform.map(Platform::from).unwrap_or_else(Platform::host)
    }
}

/// [`Command`] -  The core enum commands
#[derive(Subcommand, Debug, PartialEq, Eq, Default)]
pub enum Command {
    /// Compiles the targets, stages the data directories and runs the post-compile hook
    #[default]
    Build,
    /// Performs a build and then assembles the deployable directory
    Deploy,
    /// Removes the output and the deploy directories
    Clean,
}

/// [`PlatformArg`] The platforms that can be selected from the command line
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlatformArg {
    Windows,
    Linux,
    Macos,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Windows => Platform::Windows,
            PlatformArg::Linux => Platform::Linux,
            PlatformArg::Macos => Platform::MacOs,
        }
    }
}
