//! CLI command definitions and handlers.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

use crate::dispatch::{Dispatcher, GuardScope, Request};
use crate::exec::host::DEFAULT_SHELL;
use crate::exec::{HostFs, Sh};
use crate::virsh::{DEFAULT_CONNECT_URI, DEFAULT_PROGRAM, Virsh};

/// virtcmd - Idempotent command execution in libvirt LXC containers
#[derive(Parser)]
#[command(name = "virtcmd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Libvirt client binary to drive containers with
    #[arg(long, global = true, env = "VIRTCMD_VIRSH", default_value = DEFAULT_PROGRAM)]
    pub virsh: String,

    /// Shell used for the command and for guard evaluation
    #[arg(long, global = true, env = "VIRTCMD_SHELL", default_value = DEFAULT_SHELL)]
    pub shell: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// virtcmd commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a command in a running container
    Run {
        /// Name of the target container
        #[arg(short, long)]
        container: String,

        /// Libvirt connection URI
        #[arg(long, env = "VIRTCMD_CONNECT", default_value = DEFAULT_CONNECT_URI)]
        connect: String,

        /// Skip execution when this path exists
        #[arg(long)]
        creates: Option<PathBuf>,

        /// Run only when this command exits zero
        #[arg(long, conflicts_with_all = ["creates", "unless"])]
        onlyif: Option<String>,

        /// Skip execution when this command exits zero
        #[arg(long, conflicts_with = "creates")]
        unless: Option<String>,

        /// Where guard conditions are evaluated
        #[arg(long, value_enum, default_value = "host")]
        guard_scope: GuardScope,

        /// Command to run inside the container
        cmd: String,
    },

    /// Read an args JSON document and emit a report
    ///
    /// This is the machine interface: parameters come from a file (or
    /// stdin), the report goes to stdout, logs go to stderr.
    Module {
        /// Path to the args file, or - for stdin
        args_file: Option<PathBuf>,
    },
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// A report is always emitted once a request parses, even when the
    /// request itself fails; only unreadable input or an unwritable
    /// stdout surface as process errors.
    pub fn execute(self) -> Result<()> {
        let request = match self.command {
            Commands::Run {
                container,
                connect,
                creates,
                onlyif,
                unless,
                guard_scope,
                cmd,
            } => Request {
                cmd,
                container,
                connect,
                creates,
                onlyif,
                unless,
                guard_scope,
            },
            Commands::Module { args_file } => {
                let raw = read_args(args_file.as_deref())?;
                serde_json::from_str(&raw).wrap_err("invalid args JSON")?
            }
        };

        let dispatcher = Dispatcher::new(
            Sh::new(&self.shell),
            Virsh::new(&self.virsh, &request.connect, &self.shell),
            HostFs,
        );

        let report = dispatcher.dispatch(&request);
        let json = serde_json::to_string_pretty(&report).wrap_err("failed to encode report")?;
        println!("{json}");

        Ok(())
    }
}

/// Read the args document from a file, or stdin when the path is absent
/// or `-`.
fn read_args(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read args file {}", path.display())),
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .wrap_err("failed to read args from stdin")?;
            Ok(raw)
        }
    }
}
