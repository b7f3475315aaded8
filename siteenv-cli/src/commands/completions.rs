//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

const BIN_NAME: &str = "siteenv";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            print_instructions(self.shell);
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

fn print_instructions(shell: Shell) {
    let hint = match shell {
        Shell::Bash => Some((
            "siteenv completions bash > ~/.local/share/bash-completion/completions/siteenv",
            "eval \"$(siteenv completions bash)\"",
        )),
        Shell::Zsh => Some((
            "siteenv completions zsh > ~/.zsh/completions/_siteenv",
            "eval \"$(siteenv completions zsh)\"",
        )),
        Shell::Fish => Some((
            "siteenv completions fish > ~/.config/fish/completions/siteenv.fish",
            "siteenv completions fish | source",
        )),
        Shell::PowerShell => Some((
            "siteenv completions powershell > $PROFILE",
            "siteenv completions powershell | Out-String | Invoke-Expression",
        )),
        _ => None,
    };

    eprintln!("# Generating {shell} completion script");
    if let Some((install, inline)) = hint {
        eprintln!("# Install with:");
        eprintln!("#   {install}");
        eprintln!("# Or load it in the current shell:");
        eprintln!("#   {inline}");
    }
    eprintln!();
}
