//! Interactive prompt loop
//!
//! Reads queries line by line, prints each answer and always releases the
//! tool provider afterwards, however the loop ended.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::chat::{ChatResult, Session};

/// Run the prompt loop over `reader`/`writer`, then close the session
///
/// Per-query failures are printed and the loop moves on. An error from the
/// loop itself wins over an error from closing.
pub async fn run_shell<R, W>(session: &mut Session, reader: R, writer: W) -> ChatResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let result = prompt_loop(session, reader, writer).await;
    let closed = session.close().await;

    if let Err(e) = &closed {
        crate::log_error!(session.logger(), "[Session] Failed to close tool provider: {}", e);
    }

    result.and(closed)
}

async fn prompt_loop<R, W>(session: &mut Session, mut reader: R, mut writer: W) -> ChatResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let banner = format!(
        "\nMCP Client Started!\nConnected to server with tools: {}\nType your queries or '{}' to exit.\n",
        session.catalog().names().join(", "),
        session.config().exit_command,
    );
    writer.write_all(banner.as_bytes()).await?;

    let mut line = Vec::new();
    loop {
        writer.write_all(b"\nQuery: ").await?;
        writer.flush().await?;

        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        // Undecodable bytes are replaced rather than ending the session
        let decoded = String::from_utf8_lossy(&line);
        let query = decoded.trim();
        if query.is_empty() {
            continue;
        }
        if session.is_exit_command(query) {
            break;
        }

        let outcome = session.answer_query(query).await;
        match outcome {
            Ok(answer) => writer.write_all(format!("\n{}\n", answer).as_bytes()).await?,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                crate::log_warn!(session.logger(), "[Session] Query failed: {}", e);
                writer.write_all(format!("\nError: {}\n", e).as_bytes()).await?;
            }
        }
    }

    writer.flush().await?;
    Ok(())
}
