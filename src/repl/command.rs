use std::fmt::Display;
use std::io::Write;

use hashlink::LinkedHashMap;
use snafu::ResultExt;

use crate::repl::error::{OutputSnafu, ReplError};
use crate::tree::Tree;

/// What the loop should do once a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub type CommandCallback = fn(&mut CommandContext<'_>, &[String]) -> Result<Flow, ReplError>;

#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub usage: &'static str,
    pub help_text: &'static str,
    pub callback: CommandCallback,
}

/// Everything a command may touch while it runs.
pub struct CommandContext<'a> {
    pub tree: &'a mut Tree,
    pub out: &'a mut dyn Write,
    pub commands: &'a CommandRegistry,
}

impl CommandContext<'_> {
    pub fn line(&mut self, text: impl Display) -> Result<(), ReplError> {
        writeln!(self.out, "{text}").context(OutputSnafu)
    }
}

/// Commands by name, kept in registration order so `help` lists them the
/// way they were declared.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: LinkedHashMap<String, Command>,
}

impl CommandRegistry {
    pub fn register(&mut self, name: impl Into<String>, command: Command) {
        self.commands.insert(name.into(), command);
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Command)> {
        self.commands
            .iter()
            .map(|(name, command)| (name.as_str(), command))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut CommandContext<'_>, _: &[String]) -> Result<Flow, ReplError> {
        Ok(Flow::Continue)
    }

    fn command(usage: &'static str) -> Command {
        Command {
            usage,
            help_text: "",
            callback: noop,
        }
    }

    #[test]
    fn registry_keeps_registration_order() {
        let mut registry = CommandRegistry::default();
        registry.register("zeta", command("z"));
        registry.register("alpha", command("a"));
        registry.register("mid", command("m"));

        let names = registry.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn registering_twice_replaces() {
        let mut registry = CommandRegistry::default();
        registry.register("x", command("first"));
        registry.register("x", command("second"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("x").unwrap().usage, "second");
    }
}
