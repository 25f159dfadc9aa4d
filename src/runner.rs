use std::future::Future;
use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, instrument};

use crate::service::QueueService;

/// Opens a command script for [`run`].
pub async fn open_script(path: impl AsRef<Path>) -> io::Result<BufReader<File>> {
    let file = File::open(path).await?;
    Ok(BufReader::new(file))
}

/// Feeds every command line from `reader` to `service` and writes one reply
/// line per command to `writer`.
///
/// Blank lines and lines starting with `#` are skipped. A failed command is
/// answered with `ERR <reason>` and does not stop the loop, and neither does a
/// line that is not valid UTF-8. Returns the number
/// of commands processed once the input ends or `shutdown` completes.
#[instrument(skip_all)]
pub async fn run<R, W>(
    mut reader: R,
    mut writer: W,
    service: &mut QueueService,
    shutdown: impl Future,
) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    tokio::pin!(shutdown);
    let mut buf = Vec::new();
    let mut processed = 0;

    loop {
        buf.clear();
        let read = tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("shutting down");
                break;
            }
            read = reader.read_until(b'\n', &mut buf) => read,
        };

        match read {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error!(cause = %err, "failed to read command");
                writer.flush().await?;
                return Err(err.into());
            }
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(text) => {
                let line = text.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                match service.process_cmd(line) {
                    Ok(reply) => reply,
                    Err(err) => {
                        error!(cause = %err, command = line, "command failed");
                        format!("ERR {}", err)
                    }
                }
            }
            Err(err) => {
                error!(cause = %err, "command is not valid UTF-8");
                "ERR invalid UTF-8".to_string()
            }
        };

        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        processed += 1;
    }

    writer.flush().await?;
    Ok(processed)
}
