use clap::{CommandFactory, Parser};

/// Configure, list and verify the deployment secrets of the CI/CD pipeline.
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = "pipeline-secrets", version, about, disable_help_flag = true)]
pub struct Cli {
    /// Print this help text
    #[arg(short = 'h', long)]
    pub help: bool,

    /// List the names of the secrets configured in the repository
    #[arg(short, long)]
    pub list: bool,

    /// Prompt for each deployment secret and store it
    #[arg(short, long)]
    pub interactive: bool,

    /// Commit and push a timestamped marker file to trigger the pipeline
    #[arg(short, long)]
    pub test: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// The single action an invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Help,
    List,
    Interactive,
    Test,
    Default,
}

impl Mode {
    /// Whether the mode needs an authenticated `gh`.
    pub fn requires_auth(self) -> bool {
        !matches!(self, Mode::Help)
    }
}

impl Cli {
    /// Resolve the flags into one mode. When several are given the first in
    /// help, list, interactive, test order wins.
    pub fn mode(&self) -> Mode {
        if self.help {
            Mode::Help
        } else if self.list {
            Mode::List
        } else if self.interactive {
            Mode::Interactive
        } else if self.test {
            Mode::Test
        } else {
            Mode::Default
        }
    }

    pub fn usage() -> String {
        Cli::command().render_help().to_string()
    }
}
