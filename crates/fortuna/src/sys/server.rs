use crate::events::AppEvent;
use async_channel::Sender;
use fortuna_core::control::{self, Command};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

impl From<Command> for AppEvent {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Spin(impulse) => AppEvent::Spin(impulse),
            Command::Stop => AppEvent::Stop,
            Command::Reload => AppEvent::ConfigReload,
        }
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    let socket_path = control::socket_path();

    // Cleanup old socket if it exists
    if std::fs::metadata(&socket_path).is_ok() {
        let _ = std::fs::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::info!("Listening for commands on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match line.parse::<Command>() {
                            Ok(cmd) => {
                                if tx.send(AppEvent::from(cmd)).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => log::warn!("Ignoring command {:?}: {}", line, e),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_map_to_events() {
        assert_eq!(AppEvent::from(Command::Spin(-3.0)), AppEvent::Spin(-3.0));
        assert_eq!(AppEvent::from(Command::Stop), AppEvent::Stop);
        assert_eq!(AppEvent::from(Command::Reload), AppEvent::ConfigReload);
    }
}
