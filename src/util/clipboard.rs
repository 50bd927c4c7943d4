use std::io::Write;

use anyhow::{bail, Context, Result};
use base64::Engine;

/// Many terminals drop OSC 52 payloads beyond this size.
const MAX_ENCODED_LEN: usize = 100_000;

pub trait Clipboard: Send {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Copies through the terminal with an OSC 52 escape sequence, so it works
/// over SSH and needs no display server.
pub struct Osc52Clipboard<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<()> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        if encoded.len() > MAX_ENCODED_LEN {
            bail!("Export too large for the terminal clipboard ({} bytes)", text.len());
        }
        write!(self.out, "\x1b]52;c;{encoded}\x07").context("Failed to write to terminal")?;
        self.out.flush().context("Failed to flush terminal")?;
        Ok(())
    }
}
