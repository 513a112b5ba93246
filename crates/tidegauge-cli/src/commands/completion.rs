use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

const BIN_NAME: &str = "tidegauge";

/// Print the completion script for `shell` to stdout
pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    tracing::debug!("Generating {} completion script", shell);
    let mut stdout = io::stdout().lock();
    write_script(shell, cmd, &mut stdout)?;
    Ok(())
}

pub fn write_script<W: Write>(shell: Shell, cmd: &mut Command, out: &mut W) -> Result<()> {
    generate(shell, cmd, BIN_NAME, out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    #[test]
    fn test_bash_script_uses_binary_name() {
        let mut cmd = Command::new(BIN_NAME).subcommand(
            Command::new("workers").arg(Arg::new("files").num_args(1..)),
        );
        let mut out = Vec::new();

        write_script(Shell::Bash, &mut cmd, &mut out).unwrap();

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("_tidegauge()"));
        assert!(script.contains("workers"));
    }
}
