//! Line-oriented request loop.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::handlers;
use crate::state::AppState;

/// Read requests from `reader` until EOF, writing one JSON response line per
/// non-blank request line to `writer`.
///
/// Returns the number of requests handled.
///
/// # Errors
///
/// Returns an error only for I/O failures on either stream; per-request
/// failures are reported in-band.
pub async fn run<R, W>(state: &AppState, reader: R, mut writer: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0;

    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read request line")?
    {
        if line.trim().is_empty() {
            continue;
        }

        let response = handlers::handle_line(state, &line);
        let mut out =
            serde_json::to_vec(&response).context("failed to serialise response")?;
        out.push(b'\n');
        writer
            .write_all(&out)
            .await
            .context("failed to write response")?;
        writer.flush().await.context("failed to flush output")?;
        handled += 1;
    }

    Ok(handled)
}
