use snafu::ensure;
use tracing::debug;

use crate::repl::command::{Command, CommandContext, CommandRegistry, Flow};
use crate::repl::error::{
    MissingParamsSnafu, NoPathSnafu, NoResultsSnafu, ReplError, UnknownFlagSnafu, WrongParamCountSnafu,
};
use crate::tree::{NodeId, SEPARATOR, TreeError, write_structure};

/// The built-in command table, in the order `help` lists it.
pub fn standard_commands() -> CommandRegistry {
    let mut registry = CommandRegistry::default();
    registry.register(
        "ping",
        Command {
            usage: "ping",
            help_text: "answers with pong",
            callback: ping,
        },
    );
    registry.register(
        "exit",
        Command {
            usage: "exit",
            help_text: "leaves the shell (q works too)",
            callback: exit,
        },
    );
    registry.register(
        "ls",
        Command {
            usage: "ls [-d|-f] [PATH]",
            help_text: "lists the content of a folder, only folders with -d, only files with -f",
            callback: list,
        },
    );
    registry.register(
        "mkdir",
        Command {
            usage: "mkdir [-r] PATH",
            help_text: "creates a folder, and the missing ones on the way with -r",
            callback: make_folder,
        },
    );
    registry.register(
        "rm",
        Command {
            usage: "rm [-r] PATH",
            help_text: "removes a file or an empty folder, any folder with -r",
            callback: remove,
        },
    );
    registry.register(
        "touch",
        Command {
            usage: "touch PATH",
            help_text: "creates an empty file",
            callback: touch,
        },
    );
    registry.register(
        "find",
        Command {
            usage: "find [-s] NAME",
            help_text: "finds every node called NAME, only among root children with -s",
            callback: find,
        },
    );
    registry.register(
        "strp",
        Command {
            usage: "strp [PATH]",
            help_text: "prints the structure below a folder",
            callback: structure,
        },
    );
    registry.register(
        "help",
        Command {
            usage: "help",
            help_text: "shows this list",
            callback: help,
        },
    );
    registry
}

/// Arguments of one command line, flags apart from positionals.
struct Arguments<'a> {
    flags: Vec<&'a str>,
    positional: Vec<&'a str>,
}

impl<'a> Arguments<'a> {
    fn parse(args: &'a [String], allowed: &[&str]) -> Result<Self, ReplError> {
        let mut flags = Vec::new();
        let mut positional = Vec::new();
        for arg in args {
            if arg.len() > 1 && arg.starts_with('-') {
                ensure!(
                    allowed.contains(&arg.as_str()),
                    UnknownFlagSnafu { flag: arg.as_str() }
                );
                flags.push(arg.as_str());
            } else {
                positional.push(arg.as_str());
            }
        }
        Ok(Arguments { flags, positional })
    }

    fn has(&self, flag: &str) -> bool {
        self.flags.contains(&flag)
    }

    fn optional_path(&self) -> Result<Option<&'a str>, ReplError> {
        match self.positional.as_slice() {
            [] => Ok(None),
            [path] => Ok(Some(*path)),
            _ => WrongParamCountSnafu.fail(),
        }
    }

    fn single(&self, missing: ReplError) -> Result<&'a str, ReplError> {
        match self.positional.as_slice() {
            [] => Err(missing),
            [value] => Ok(*value),
            _ => WrongParamCountSnafu.fail(),
        }
    }
}

/// Splits a path into the folder part and the last name:
/// `docs` is `(".", "docs")`, `/docs` is `("/", "docs")`.
fn split_parent(path: &str) -> (String, String) {
    let normalized = path.replace('\\', "/");
    let trimmed = normalized.trim_end_matches(SEPARATOR);
    match trimmed.rsplit_once(SEPARATOR) {
        None => (".".to_string(), trimmed.to_string()),
        Some(("", name)) => ("/".to_string(), name.to_string()),
        Some((parent, name)) => (parent.to_string(), name.to_string()),
    }
}

/// Filtered listings of an empty folder are empty, not errors.
fn or_empty(result: Result<Vec<NodeId>, TreeError>) -> Result<Vec<NodeId>, ReplError> {
    match result {
        Ok(nodes) => Ok(nodes),
        Err(e) if e.is_empty_result() => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn ping(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Flow, ReplError> {
    ctx.line("pong")?;
    Ok(Flow::Continue)
}

fn exit(_ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Flow, ReplError> {
    Ok(Flow::Exit)
}

fn list(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Flow, ReplError> {
    let args = Arguments::parse(args, &["-d", "-f"])?;
    let path = args.optional_path()?.unwrap_or(".");

    let folder = ctx.tree.follow_path(path)?;
    if ctx.tree.node(folder)?.is_file() {
        return Err(TreeError::ExpectedFolderFoundFile {
            path: path.to_string(),
        }
        .into());
    }

    let children = match (args.has("-d"), args.has("-f")) {
        (true, false) => or_empty(ctx.tree.folder_children(folder))?,
        (false, true) => or_empty(ctx.tree.file_children(folder))?,
        _ => ctx.tree.children(folder)?,
    };
    debug!("Listing {} entries of '{}'", children.len(), path);

    let header = ctx.tree.node(folder)?.display_name();
    ctx.line(format_args!("Files and folders in {header}"))?;
    for child in children {
        let name = ctx.tree.node(child)?.display_name();
        ctx.line(format_args!("\t{name}"))?;
    }
    Ok(Flow::Continue)
}

fn make_folder(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Flow, ReplError> {
    let args = Arguments::parse(args, &["-r"])?;
    let path = args.single(NoPathSnafu.build())?;
    let (parent, name) = split_parent(path);

    ctx.tree.create_folder(&parent, &name, args.has("-r"))?;
    ctx.line(format_args!("path '{path}' created."))?;
    Ok(Flow::Continue)
}

fn remove(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Flow, ReplError> {
    let args = Arguments::parse(args, &["-r"])?;
    let path = args.single(NoPathSnafu.build())?;

    let target = ctx.tree.follow_path(path)?;
    if ctx.tree.node(target)?.is_file() {
        ctx.tree.remove_file(path)?;
    } else {
        ctx.tree.remove_folder(path, args.has("-r"))?;
    }
    Ok(Flow::Continue)
}

fn touch(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Flow, ReplError> {
    let args = Arguments::parse(args, &[])?;
    let path = args.single(NoPathSnafu.build())?;
    let (parent, name) = split_parent(path);

    ctx.tree.create_file(&parent, &name)?;
    ctx.line(format_args!("file '{name}' created at '{parent}'"))?;
    Ok(Flow::Continue)
}

fn find(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Flow, ReplError> {
    let args = Arguments::parse(args, &["-s"])?;
    let name = args.single(MissingParamsSnafu.build())?;

    let found = if args.has("-s") {
        let root = ctx.tree.root();
        or_empty(ctx.tree.search_child(root, name).map(|id| vec![id]))?
    } else {
        ctx.tree.search_all(name)?
    };
    ensure!(!found.is_empty(), NoResultsSnafu);

    for id in found {
        let path = ctx.tree.evaluate_node_path(id)?;
        ctx.line(path)?;
    }
    Ok(Flow::Continue)
}

fn structure(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<Flow, ReplError> {
    let args = Arguments::parse(args, &[])?;
    let node = match args.optional_path()? {
        Some(path) => ctx.tree.follow_path(path)?,
        None => ctx.tree.root(),
    };
    write_structure(ctx.tree, node, 0, &mut *ctx.out)?;
    Ok(Flow::Continue)
}

fn help(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<Flow, ReplError> {
    let commands = ctx.commands;
    for (name, command) in commands.iter() {
        ctx.line(format_args!(
            "{name} - [{}] {}",
            command.usage, command.help_text
        ))?;
    }
    Ok(Flow::Continue)
}
