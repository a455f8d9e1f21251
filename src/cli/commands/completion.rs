//! completion command - Generate shell completion scripts

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::args::{Cli, Shell};
use crate::engine::Streams;

/// Generate shell completion scripts.
pub fn completion(shell: Shell, streams: &mut Streams) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    let mut buffer: Vec<u8> = Vec::new();
    match shell {
        Shell::Bash => {
            generate(shells::Bash, &mut cmd, &name, &mut buffer);
        }
        Shell::Zsh => {
            generate(shells::Zsh, &mut cmd, &name, &mut buffer);
        }
        Shell::Fish => {
            generate(shells::Fish, &mut cmd, &name, &mut buffer);
        }
        Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, &name, &mut buffer);
        }
    }

    streams.out.push_str(&String::from_utf8_lossy(&buffer));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_completion_mentions_the_binary() {
        let mut streams = Streams::new();
        completion(Shell::Bash, &mut streams).unwrap();

        assert!(streams.out.contains("qd"));
        assert!(streams.err.is_empty());
    }
}
