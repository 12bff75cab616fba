use crate::error::CliError;
use std::ffi::OsStr;
use std::process::Command;
use tailpod_generate::AUTHKEY_MISSING_STATUS;

/// Output of a finished child process.
#[derive(Debug)]
pub struct Captured {
    pub program: String,
    /// `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Maps a failed run to the matching error.
    pub fn check(self) -> Result<Self, CliError> {
        match self.status {
            Some(0) => Ok(self),
            Some(AUTHKEY_MISSING_STATUS) => Err(CliError::AuthKeyMissing),
            Some(status) => Err(CliError::CommandFailed {
                program: self.program,
                status,
                stderr: self.stderr.trim().to_string(),
            }),
            None => Err(CliError::Killed(self.program)),
        }
    }
}

/// Runs `program` to completion, capturing stdout and stderr.
pub fn run_with_output<P, A>(program: P, args: &[A]) -> Result<Captured, CliError>
where
    P: AsRef<OsStr>,
    A: AsRef<OsStr>,
{
    let program_name = program.as_ref().to_string_lossy().to_string();
    tracing::debug!(program = %program_name, "Running command");

    let output = Command::new(program.as_ref()).args(args).output()?;

    let captured = Captured {
        program: program_name,
        status: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };
    tracing::debug!(program = %captured.program, status = ?captured.status, "Command finished");
    Ok(captured)
}

/// Runs `program` and fails unless it exits successfully.
pub fn run_checked<P, A>(program: P, args: &[A]) -> Result<Captured, CliError>
where
    P: AsRef<OsStr>,
    A: AsRef<OsStr>,
{
    run_with_output(program, args)?.check()
}
