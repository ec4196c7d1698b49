use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Line-oriented terminal surface the interactive views talk to. Input
/// ends on EOF or when the view's cancellation token fires.
pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
    cancel: CancellationToken,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, out: W) -> Self {
        Self::with_cancel(input, out, CancellationToken::new())
    }

    pub fn with_cancel(input: R, out: W, cancel: CancellationToken) -> Self {
        Self {
            lines: input.lines(),
            out,
            cancel,
        }
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub async fn say(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    /// Prompts and reads one trimmed line; `None` once input is over.
    pub async fn ask(&mut self, label: &str) -> Result<Option<String>> {
        self.out.write_all(label.as_bytes()).await?;
        self.out.write_all(b" ").await?;
        self.out.flush().await?;

        let line = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            line = self.lines.next_line() => line?,
        };
        Ok(line.map(|l| l.trim().to_string()))
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
