//! Progress bridge between background workers and a live caller.
//!
//! Multiple workers push [`ProgressEvent`]s through a [`ProgressSink`];
//! one consumer drains a [`ProgressStream`]. The stream carries ordinary
//! progress items followed by exactly one terminal item holding either
//! the completed [`RequestOutcome`] or an error. The terminal item is
//! the close signal, so the consumer never polls on an interval and never misses
//! events queued before termination.
//!
//! The channel is unbounded: a producer can never be blocked by a slow
//! consumer. There is no cancellation primitive anywhere in this core:
//! once calls are launched the request runs to completion.

use council_domain::{ProgressEvent, RequestOutcome};
use serde::Serialize;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Receiver of progress updates during pipeline execution.
///
/// Implementations must be cheap and non-blocking; emission happens on
/// the coordinator's hot path.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// No-op sink for when progress reporting is not needed
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: ProgressEvent) {}
}

/// Fan-out sink: forwards every event to each inner sink in order.
/// Lets a caller combine, say, a console reporter with a transcript
/// logger.
#[derive(Default)]
pub struct CompositeSink {
    sinks: Vec<Arc<dyn ProgressSink>>,
}

impl CompositeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl ProgressSink for CompositeSink {
    fn emit(&self, event: ProgressEvent) {
        for sink in &self.sinks {
            sink.emit(event.clone());
        }
    }
}

/// One item of the streaming surface: progress, or the single terminal
/// result/error.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestEvent {
    Progress(ProgressEvent),
    Completed(RequestOutcome),
    Failed { message: String },
}

impl RequestEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestEvent::Completed(_) | RequestEvent::Failed { .. })
    }
}

/// Create a connected sink/stream pair for one streaming request.
pub fn progress_channel() -> (ChannelSink, ProgressStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        ChannelSink { tx },
        ProgressStream {
            rx,
            finished: false,
        },
    )
}

/// Producer half: clonable across worker tasks. Sending never blocks;
/// events pushed after the consumer hung up are silently dropped.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RequestEvent>,
}

impl ChannelSink {
    /// Emit the terminal success event.
    pub fn finish(&self, outcome: RequestOutcome) {
        let _ = self.tx.send(RequestEvent::Completed(outcome));
    }

    /// Emit the terminal error event.
    pub fn fail(&self, message: impl Into<String>) {
        let _ = self.tx.send(RequestEvent::Failed {
            message: message.into(),
        });
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ProgressEvent) {
        let _ = self.tx.send(RequestEvent::Progress(event));
    }
}

/// Consumer half: yields every queued event in order, then ends after
/// the first terminal event (or after all producers dropped).
pub struct ProgressStream {
    rx: mpsc::UnboundedReceiver<RequestEvent>,
    finished: bool,
}

impl ProgressStream {
    /// Receive the next event, or `None` once the stream has ended.
    pub async fn next_event(&mut self) -> Option<RequestEvent> {
        if self.finished {
            return None;
        }
        match self.rx.recv().await {
            Some(event) => {
                if event.is_terminal() {
                    self.finished = true;
                }
                Some(event)
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl futures::Stream for ProgressStream {
    type Item = RequestEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }
        match this.rx.poll_recv(cx) {
            Poll::Ready(Some(event)) => {
                if event.is_terminal() {
                    this.finished = true;
                }
                Poll::Ready(Some(event))
            }
            Poll::Ready(None) => {
                this.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{Actor, Stage};
    use futures::StreamExt;

    fn event(stage: Stage) -> ProgressEvent {
        ProgressEvent::started(stage, Actor::System)
    }

    #[tokio::test]
    async fn events_arrive_in_emission_order() {
        let (sink, mut stream) = progress_channel();
        sink.emit(event(Stage::Retrieve));
        sink.emit(event(Stage::Generate));
        sink.finish(RequestOutcome::completed("answer", "critique"));

        let first = stream.next_event().await.unwrap();
        assert!(matches!(
            first,
            RequestEvent::Progress(ProgressEvent { stage: Stage::Retrieve, .. })
        ));
        let second = stream.next_event().await.unwrap();
        assert!(matches!(second, RequestEvent::Progress(_)));
        let terminal = stream.next_event().await.unwrap();
        assert!(terminal.is_terminal());
        assert!(stream.next_event().await.is_none());
    }

    #[tokio::test]
    async fn events_queued_before_terminal_are_drained() {
        let (sink, mut stream) = progress_channel();
        // Producer finishes before the consumer reads anything.
        sink.emit(event(Stage::Generate));
        sink.fail("chair call failed");
        drop(sink);

        assert!(matches!(
            stream.next_event().await,
            Some(RequestEvent::Progress(_))
        ));
        assert!(matches!(
            stream.next_event().await,
            Some(RequestEvent::Failed { .. })
        ));
        assert!(stream.next_event().await.is_none());
    }

    #[tokio::test]
    async fn stream_impl_ends_after_terminal() {
        let (sink, stream) = progress_channel();
        sink.emit(event(Stage::Rank));
        sink.finish(RequestOutcome::completed("a", "c"));
        sink.emit(event(Stage::Critique)); // after terminal: never observed

        let collected: Vec<RequestEvent> = stream.collect().await;
        assert_eq!(collected.len(), 2);
        assert!(collected[1].is_terminal());
    }

    #[tokio::test]
    async fn producers_never_block_on_slow_consumer() {
        let (sink, mut stream) = progress_channel();
        for _ in 0..10_000 {
            sink.emit(event(Stage::Generate));
        }
        sink.finish(RequestOutcome::completed("a", "c"));

        let mut count = 0;
        while let Some(event) = stream.next_event().await {
            if event.is_terminal() {
                break;
            }
            count += 1;
        }
        assert_eq!(count, 10_000);
    }

    #[test]
    fn composite_sink_fans_out() {
        use std::sync::Mutex;

        struct Collect(Mutex<Vec<ProgressEvent>>);
        impl ProgressSink for Collect {
            fn emit(&self, event: ProgressEvent) {
                self.0.lock().unwrap().push(event);
            }
        }

        let a = Arc::new(Collect(Mutex::new(Vec::new())));
        let b = Arc::new(Collect(Mutex::new(Vec::new())));
        let composite = CompositeSink::new()
            .push(a.clone() as Arc<dyn ProgressSink>)
            .push(b.clone() as Arc<dyn ProgressSink>);

        composite.emit(event(Stage::Generate));
        assert_eq!(a.0.lock().unwrap().len(), 1);
        assert_eq!(b.0.lock().unwrap().len(), 1);
    }
}
