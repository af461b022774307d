use snafu::Snafu;

use crate::tree::{PrintError, TreeError};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReplError {
    #[snafu(display("repl error(1): path is needed but was not found"))]
    NoPath,
    #[snafu(display("repl error(2): there are missing parameters"))]
    MissingParams,
    #[snafu(display("repl error(3): wrong parameter count"))]
    WrongParamCount,
    #[snafu(display("repl error(4): the current search yielded no results"))]
    NoResults,
    #[snafu(display("repl error(5): unknown flag '{}'", flag))]
    UnknownFlag { flag: String },
    #[snafu(display("repl error(6): could not split the input line"))]
    TokenizeError { source: shell_words::ParseError },
    #[snafu(context(false), display("error({}): {}", source.code(), source))]
    TreeFailure { source: TreeError },
    #[snafu(display("Failed to read input"))]
    InputError { source: std::io::Error },
    #[snafu(display("Failed to write output"))]
    OutputError { source: std::io::Error },
}

impl ReplError {
    /// I/O failures end the session; everything else is reported and the
    /// loop goes on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ReplError::InputError { .. } | ReplError::OutputError { .. }
        )
    }
}

impl From<PrintError> for ReplError {
    fn from(error: PrintError) -> Self {
        match error {
            PrintError::Lookup { source } => ReplError::TreeFailure { source },
            PrintError::Output { source } => ReplError::OutputError { source },
        }
    }
}
