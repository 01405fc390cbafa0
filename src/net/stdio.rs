use color_eyre::eyre::{Result, WrapErr};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use super::rpc::handle_message;
use crate::clients::AppState;

/// Newline-delimited JSON-RPC: one message per input line, one reply per line.
/// Returns when the input closes.
pub async fn serve<R, W>(state: &AppState, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.wrap_err("Failed to read from stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(response) = handle_message(state, line.as_bytes()).await else {
            continue;
        };
        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        output
            .write_all(&encoded)
            .await
            .wrap_err("Failed to write to stdout")?;
        output.flush().await?;
    }
    info!("input closed, stopping");
    Ok(())
}
