use crate::events::AppEvent;
use async_channel::Sender;
use dotring::ipc::{ControlCommand, SocketPath};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(socket: SocketPath, tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(socket.as_str()).is_ok() {
        let _ = std::fs::remove_file(socket.as_str());
    }

    let listener = match UnixListener::bind(socket.as_str()) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", socket, e);
            return;
        }
    };
    log::info!("Listening for control commands on {}", socket);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    forward_commands(BufReader::new(stream), tx).await;
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Forwards each recognised line as an event until the reader is exhausted
/// or the UI side has gone away.
pub async fn forward_commands<R>(reader: R, tx: Sender<AppEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match ControlCommand::parse_line(&line) {
            Ok(command) => {
                log::info!("Control command: {}", command);
                if tx.send(AppEvent::from(command)).await.is_err() {
                    break;
                }
            }
            Err(e) => log::warn!("{}", e),
        }
    }
}
