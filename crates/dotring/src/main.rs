use clap::{Parser, Subcommand};
use dotring::ipc::{ControlCommand, SocketPath};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "dotring", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control socket of the running dotloader (defaults to $DOTLOADER_SOCKET or /tmp/dotloader.sock)
    #[arg(short = 's', long)]
    socket: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Start the animation clocks.
    Start,
    /// Stop all clocks and reset the animation.
    Stop,
    /// Restart the animation from its first frame
    Restart,
}

impl From<Commands> for ControlCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Start => ControlCommand::Start,
            Commands::Stop => ControlCommand::Stop,
            Commands::Restart => ControlCommand::Restart,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let socket = cli
        .socket
        .map(SocketPath::new)
        .unwrap_or_else(SocketPath::resolve);

    send_command(&socket, cli.command.into())
}

fn send_command(socket: &SocketPath, command: ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket.as_str()).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to dotloader at {}: {}. Is dotloader running?",
            socket,
            e
        )
    })?;

    log::debug!("Sending '{}' to {}", command, socket);
    writeln!(stream, "{}", command)?;
    Ok(())
}
