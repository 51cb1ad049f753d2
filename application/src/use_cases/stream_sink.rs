//! Streaming response sink.
//!
//! Buffers text deltas from a model stream and flushes them into the
//! editor on a fixed cadence, so each document mutation batches many
//! small deltas. Cancellation stops flushing immediately: text already
//! in the document stays, buffered text is dropped.

use crate::config::{InsertMode, TurnConfig};
use crate::ports::editor::EditorPort;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// What one stream consumption amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkReport {
    /// Characters actually written into the editor.
    pub chars_flushed: usize,
    /// Whether consumption stopped on cancellation (with buffered text
    /// discarded) rather than on stream end.
    pub cancelled: bool,
}

/// Flushes one response stream into the editor.
pub struct StreamingResponseSink {
    editor: Arc<dyn EditorPort>,
    mode: InsertMode,
    interval: Duration,
    cancellation: CancellationToken,
}

impl StreamingResponseSink {
    pub fn new(editor: Arc<dyn EditorPort>, config: &TurnConfig) -> Self {
        Self {
            editor,
            mode: config.insert_mode,
            interval: config.flush_interval,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Consume text deltas until the channel closes, flushing on the
    /// configured cadence and once more at the end. Returns early on
    /// cancellation without a final flush.
    pub async fn consume(&self, mut deltas: mpsc::Receiver<String>) -> SinkReport {
        let mut buffer = String::new();
        let mut chars_flushed = 0usize;
        // Tracked-offset streaming anchors at the cursor position when
        // the stream starts, then chains off each flush.
        let mut insert_at = match self.mode {
            InsertMode::TrackedOffset => Some(self.editor.cursor()),
            InsertMode::AtCursor => None,
        };

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancellation.cancelled() => {
                    return SinkReport {
                        chars_flushed,
                        cancelled: true,
                    };
                }
                delta = deltas.recv() => match delta {
                    Some(text) => buffer.push_str(&text),
                    None => break,
                },
                _ = ticker.tick() => {
                    chars_flushed += self.flush(&mut buffer, &mut insert_at);
                }
            }
        }

        // Stream ended; flush the remainder unless cancellation raced
        // the channel close.
        if self.cancellation.is_cancelled() {
            return SinkReport {
                chars_flushed,
                cancelled: true,
            };
        }
        chars_flushed += self.flush(&mut buffer, &mut insert_at);
        SinkReport {
            chars_flushed,
            cancelled: false,
        }
    }

    fn flush(&self, buffer: &mut String, insert_at: &mut Option<usize>) -> usize {
        if buffer.is_empty() {
            return 0;
        }
        let position = match insert_at {
            Some(position) => *position,
            // Live cursor: the text follows the user around the document.
            None => self.editor.cursor(),
        };
        let after = self.editor.insert_text_at(position, buffer);
        if self.mode == InsertMode::TrackedOffset {
            *insert_at = Some(after);
        }
        let count = buffer.chars().count();
        trace!(chars = count, position, "flushed stream buffer");
        buffer.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::editor::MemoryEditor;

    fn sink(editor: &Arc<MemoryEditor>, mode: InsertMode) -> StreamingResponseSink {
        let config = TurnConfig::default()
            .with_insert_mode(mode)
            .with_flush_interval(Duration::from_millis(50));
        StreamingResponseSink::new(editor.clone(), &config)
    }

    #[tokio::test]
    async fn test_final_flush_on_stream_end() {
        let editor = Arc::new(MemoryEditor::new());
        let (tx, rx) = mpsc::channel(8);
        tx.send("hello".to_string()).await.unwrap();
        drop(tx);

        let report = sink(&editor, InsertMode::AtCursor).consume(rx).await;

        assert_eq!(editor.content(), "hello");
        assert_eq!(report.chars_flushed, 5);
        assert!(!report.cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_stream_drops_unflushed_text() {
        let editor = Arc::new(MemoryEditor::new());
        let token = CancellationToken::new();
        let sink = sink(&editor, InsertMode::AtCursor).with_cancellation(token.clone());
        let (tx, rx) = mpsc::channel(8);
        let consumer = tokio::spawn(async move { sink.consume(rx).await });

        tx.send("first ".to_string()).await.unwrap();
        // Let one flush cadence elapse.
        tokio::time::sleep(Duration::from_millis(60)).await;
        tx.send("second".to_string()).await.unwrap();
        token.cancel();

        let report = consumer.await.unwrap();
        assert!(report.cancelled);
        assert_eq!(editor.content(), "first ");
        assert_eq!(report.chars_flushed, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracked_offset_survives_cursor_moves() {
        let editor = Arc::new(MemoryEditor::with_content("AB", 1));
        let sink = sink(&editor, InsertMode::TrackedOffset);
        let (tx, rx) = mpsc::channel(8);
        let consumer = tokio::spawn(async move { sink.consume(rx).await });

        tx.send("xx".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        // User clicks back to the start; the stream must not follow.
        editor.set_cursor(0);
        tx.send("yy".to_string()).await.unwrap();
        drop(tx);

        let report = consumer.await.unwrap();
        assert_eq!(editor.content(), "AxxyyB");
        assert_eq!(report.chars_flushed, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_at_cursor_follows_cursor_moves() {
        let editor = Arc::new(MemoryEditor::with_content("AB", 1));
        let sink = sink(&editor, InsertMode::AtCursor);
        let (tx, rx) = mpsc::channel(8);
        let consumer = tokio::spawn(async move { sink.consume(rx).await });

        tx.send("xx".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(editor.content(), "AxxB");
        editor.set_cursor(0);
        tx.send("yy".to_string()).await.unwrap();
        drop(tx);

        let report = consumer.await.unwrap();
        assert_eq!(editor.content(), "yyAxxB");
        assert_eq!(report.chars_flushed, 4);
    }

    #[tokio::test]
    async fn test_empty_stream_writes_nothing() {
        let editor = Arc::new(MemoryEditor::new());
        let (tx, rx) = mpsc::channel::<String>(1);
        drop(tx);

        let report = sink(&editor, InsertMode::AtCursor).consume(rx).await;

        assert_eq!(editor.content(), "");
        assert_eq!(report.chars_flushed, 0);
    }
}
