use std::fmt;

/// An error that knows how to present itself to the person running the harness.
///
/// Errors of this kind are caught at the process entry point, displayed, and turned into a
/// non-zero exit. Everything else is treated as fatal and surfaced with its full error chain.
pub trait DisplayableError {
    fn display(&self);
}

/// The benchmark child process protocol was violated, or a child could not be started at all.
///
/// This is fatal to the run. It carries the exact command line that was executed and any
/// diagnostic output captured from the child so that the failure can be reproduced by hand.
#[derive(derive_more::Error, Debug)]
pub struct ConfigurationError {
    msg: String,
    command: Option<Vec<String>>,
    diagnostic: Option<String>,
}

impl ConfigurationError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            command: None,
            diagnostic: None,
        }
    }

    /// Attach the command line of the child process that triggered this error.
    pub fn with_command(mut self, command: &[String]) -> Self {
        self.command = Some(command.to_vec());
        self
    }

    /// Attach the combined output captured from the child process.
    pub fn with_diagnostic(mut self, diagnostic: impl Into<String>) -> Self {
        self.diagnostic = Some(diagnostic.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.msg
    }

    pub fn command(&self) -> Option<&[String]> {
        self.command.as_deref()
    }

    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)?;
        if let Some(command) = &self.command {
            write!(f, "\n  command: {}", command.join(" "))?;
        }
        if let Some(diagnostic) = &self.diagnostic {
            for line in diagnostic.lines() {
                write!(f, "\n  {}", line)?;
            }
        }
        Ok(())
    }
}

impl DisplayableError for ConfigurationError {
    fn display(&self) {
        eprintln!("{}", self);
    }
}

/// A failure raised by benchmark-author code rather than by the harness itself.
///
/// Wrapping keeps the attribution intact: when this reaches the top level it is reported as a
/// problem with the benchmark under test, not with the orchestration layer.
#[derive(derive_more::Error, Debug)]
pub struct UserCodeError {
    #[error(not(source))]
    source: anyhow::Error,
}

impl UserCodeError {
    pub fn new(source: anyhow::Error) -> Self {
        Self { source }
    }

    pub fn source_error(&self) -> &anyhow::Error {
        &self.source
    }
}

impl fmt::Display for UserCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "An error was raised by the benchmark code: {:#}",
            self.source
        )
    }
}

impl DisplayableError for UserCodeError {
    fn display(&self) {
        eprintln!("An error was raised by the benchmark code:");
        eprintln!("{:?}", self.source);
    }
}
