use crate::events::AppEvent;
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub const SOCKET_PATH: &str = "/tmp/colorwheel.sock";

/// Parses one control line: `select <index>`, `next` or `prev`.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let mut words = line.split_whitespace();
    let event = match words.next()? {
        "select" => AppEvent::Select(words.next()?.parse().ok()?),
        "next" => AppEvent::Next,
        "prev" | "previous" => AppEvent::Previous,
        _ => return None,
    };
    words.next().is_none().then_some(event)
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Some(event) => {
                                let _ = tx.send(event).await;
                            }
                            None => log::warn!("Ignoring control command '{}'", line.trim()),
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
    fn test_parse_command() {
        let cases = vec![
            ("select 3", Some(AppEvent::Select(3))),
            ("  select   0 ", Some(AppEvent::Select(0))),
            ("next", Some(AppEvent::Next)),
            ("prev", Some(AppEvent::Previous)),
            ("previous", Some(AppEvent::Previous)),
            ("select", None),
            ("select -1", None),
            ("select 2 4", None),
            ("spin", None),
            ("", None),
        ];

        for (line, expected) in cases {
            assert_eq!(parse_command(line), expected, "line {line:?}");
        }
    }
}
