use std::io::{BufRead, Write};

use colored::Colorize;
use snafu::ResultExt;
use tracing::{debug, info};

use crate::config::ShellConfig;
use crate::repl::command::{CommandContext, CommandRegistry, Flow};
use crate::repl::commands::standard_commands;
use crate::repl::error::{InputSnafu, OutputSnafu, ReplError, TokenizeSnafu};
use crate::tree::Tree;

const QUIT: &str = "q";

/// Interactive shell over a [`Tree`].
pub struct Repl {
    tree: Tree,
    commands: CommandRegistry,
    prompt: String,
    lowercase_input: bool,
}

impl Repl {
    pub fn new(tree: Tree, config: &ShellConfig) -> Self {
        Repl {
            tree,
            commands: standard_commands(),
            prompt: config.prompt.clone(),
            lowercase_input: config.lowercase_input,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Reads lines from `input` until `exit`, `q` or end of input. Bytes
    /// that are not valid UTF-8 are replaced, never fatal.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
    ) -> Result<(), ReplError> {
        writeln!(out, "Welcome to the vtree (R)ead-(E)val-(P)rint (L)oop").context(OutputSnafu)?;
        writeln!(out, "Remember: all paths are relative to root (./)").context(OutputSnafu)?;

        let mut buffer = Vec::new();
        loop {
            write!(out, "{}", self.prompt).context(OutputSnafu)?;
            out.flush().context(OutputSnafu)?;

            buffer.clear();
            if input.read_until(b'\n', &mut buffer).context(InputSnafu)? == 0 {
                writeln!(out).context(OutputSnafu)?;
                break;
            }
            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim_end_matches(['\n', '\r']);

            if self.eval(line, out)? == Flow::Exit {
                break;
            }
        }

        info!("Leaving the shell with {} nodes", self.tree.len());
        Ok(())
    }

    /// Runs one input line. Only I/O failures are returned; command errors
    /// are printed to `out`.
    pub fn eval<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow, ReplError> {
        let line = if self.lowercase_input {
            line.to_lowercase()
        } else {
            line.to_string()
        };

        let tokens = match shell_words::split(&line).context(TokenizeSnafu) {
            Ok(tokens) => tokens,
            Err(e) => {
                report(&e, out)?;
                return Ok(Flow::Continue);
            }
        };
        let Some((name, args)) = tokens.split_first() else {
            return Ok(Flow::Continue);
        };
        if name == QUIT {
            return Ok(Flow::Exit);
        }

        let Some(command) = self.commands.get(name) else {
            writeln!(out, "Command '{}' does not exist.", name).context(OutputSnafu)?;
            return Ok(Flow::Continue);
        };
        debug!("Running '{}' with {:?}", name, args);

        let mut ctx = CommandContext {
            tree: &mut self.tree,
            out: &mut *out,
            commands: &self.commands,
        };
        match (command.callback)(&mut ctx, args) {
            Ok(flow) => Ok(flow),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                report(&e, out)?;
                Ok(Flow::Continue)
            }
        }
    }
}

fn report<W: Write>(error: &ReplError, out: &mut W) -> Result<(), ReplError> {
    debug!("Command failed: {:?}", error);
    writeln!(out, "{}\n{}", "An error happened:".red(), error).context(OutputSnafu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(config: &ShellConfig, input: &str) -> (Repl, String) {
        let mut repl = Repl::new(Tree::new(), config);
        let mut out = Vec::new();
        repl.run(Cursor::new(input), &mut out).unwrap();
        (repl, String::from_utf8(out).unwrap())
    }

    #[test]
    fn session_builds_a_tree() {
        let (repl, out) = session(
            &ShellConfig::default(),
            "mkdir docs\ntouch docs/readme.txt\nls docs\nexit\n",
        );

        assert!(out.starts_with("Welcome to the vtree"));
        assert!(out.contains("Files and folders in docs/\n\treadme.txt\n"));
        assert!(repl.tree().follow_path("docs/readme.txt").is_ok());
    }

    #[test]
    fn quit_alias_stops_before_the_rest() {
        let (repl, _) = session(&ShellConfig::default(), "q\nmkdir docs\n");
        assert_eq!(repl.tree().len(), 1);
    }

    #[test]
    fn end_of_input_ends_the_session() {
        let (repl, out) = session(&ShellConfig::default(), "mkdir docs");
        assert!(out.ends_with("> path 'docs' created.\n> \n"));
        assert_eq!(repl.tree().len(), 2);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let (_, out) = session(&ShellConfig::default(), "\n   \nping\n");
        assert_eq!(out.matches("pong").count(), 1);
        assert!(!out.contains("does not exist"));
    }

    #[test]
    fn unknown_command_is_reported() {
        let (_, out) = session(&ShellConfig::default(), "frobnicate\n");
        assert!(out.contains("Command 'frobnicate' does not exist."));
        assert!(!out.contains("An error happened:"));
    }

    #[test]
    fn command_errors_keep_the_loop_alive() {
        let (repl, out) = session(
            &ShellConfig::default(),
            "rm docs\nmkdir docs\n",
        );

        assert!(out.contains("An error happened:"));
        assert!(out.contains("error(12): path not found at 'docs'"));
        assert!(repl.tree().follow_path("docs").is_ok());
    }

    #[test]
    fn quotes_keep_spaces_in_names() {
        let (repl, _) = session(&ShellConfig::default(), "touch \"my notes.txt\"\n");
        assert!(repl.tree().follow_path("my notes.txt").is_ok());
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        let (_, out) = session(&ShellConfig::default(), "touch \"oops\nping\n");
        assert!(out.contains("could not split the input line"));
        assert!(out.contains("pong"));
    }

    #[test]
    fn input_case_follows_the_config() {
        let (repl, _) = session(&ShellConfig::default(), "MKDIR Docs\n");
        assert!(repl.tree().follow_path("docs").is_ok());

        let config = ShellConfig {
            lowercase_input: false,
            ..ShellConfig::default()
        };
        let (repl, out) = session(&config, "mkdir Docs\nMKDIR x\n");
        assert!(repl.tree().follow_path("Docs").is_ok());
        assert!(out.contains("Command 'MKDIR' does not exist."));
    }

    #[test]
    fn custom_prompt_is_printed() {
        let config = ShellConfig {
            prompt: "vt$ ".to_string(),
            ..ShellConfig::default()
        };
        let (_, out) = session(&config, "exit\n");
        assert!(out.contains("vt$ "));
    }

    #[test]
    fn invalid_utf8_line_does_not_end_the_session() {
        let mut repl = Repl::new(Tree::new(), &ShellConfig::default());
        let mut out = Vec::new();

        repl.run(Cursor::new(&b"mkdir caf\xe9\nmkdir docs\nping\n"[..]), &mut out)
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("pong"));
        assert!(repl.tree().follow_path("caf\u{FFFD}").is_ok());
        assert!(repl.tree().follow_path("docs").is_ok());
    }

    #[test]
    fn windows_line_endings_are_stripped() {
        let (repl, _) = session(&ShellConfig::default(), "mkdir docs\r\nexit\r\n");
        assert!(repl.tree().follow_path("docs").is_ok());
    }
}
