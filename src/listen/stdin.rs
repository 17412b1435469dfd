//! Line-based listener reading transcripts from an async reader

use super::{clean_transcript, Listener};
use crate::error::{UnisonError, UnisonResult};
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

/// Treats each input line as one utterance
pub struct StdinListener<R = BufReader<Stdin>> {
    lines: Lines<R>,
}

impl StdinListener {
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl Default for StdinListener {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncBufRead + Unpin> StdinListener<R> {
    /// Listen to any buffered reader instead of stdin
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> Listener for StdinListener<R> {
    async fn listen(&mut self) -> UnisonResult<Option<String>> {
        match self.lines.next_line().await? {
            Some(line) => {
                debug!("Heard line: '{}'", line);
                Ok(clean_transcript(&line))
            }
            None => Err(UnisonError::InputClosed),
        }
    }

    fn name(&self) -> &str {
        "stdin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lines_become_utterances() {
        let input: &[u8] = b"computer internet\n\n   \ncomputer google cats\n";
        let mut listener = StdinListener::from_reader(input);

        assert_eq!(
            listener.listen().await.unwrap(),
            Some("computer internet".to_string())
        );
        assert_eq!(listener.listen().await.unwrap(), None);
        assert_eq!(listener.listen().await.unwrap(), None);
        assert_eq!(
            listener.listen().await.unwrap(),
            Some("computer google cats".to_string())
        );
        assert!(matches!(
            listener.listen().await,
            Err(UnisonError::InputClosed)
        ));
    }
}
