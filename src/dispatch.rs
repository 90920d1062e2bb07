//! Fire-and-forget printing.
//!
//! `print`/`print_batch` return immediately; encoding and the sink run on a
//! worker thread and the outcome arrives as a [`PrintEvent`] on the receiver
//! handed out by [`PrintDispatcher::new`].

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, error};

use crate::consts::{DEFAULT_BATCH_TITLE, DEFAULT_PRINT_TITLE};
use crate::epl::JobEncoder;
use crate::printer::PrintSink;
use crate::render::{PrintDocument, RenderedLabel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintEvent {
    Completed { title: String },
    /// For a transient notification; nothing else is rolled back.
    Failed { title: String, error: String },
}

#[derive(Clone)]
pub struct PrintDispatcher {
    encoder: Arc<dyn JobEncoder>,
    sink: Arc<dyn PrintSink>,
    events: Sender<PrintEvent>,
}

impl PrintDispatcher {
    pub fn new(
        encoder: Arc<dyn JobEncoder>,
        sink: Arc<dyn PrintSink>,
    ) -> (Self, Receiver<PrintEvent>) {
        let (events, rx) = channel();
        (PrintDispatcher { encoder, sink, events }, rx)
    }

    /// Print one label. `title` falls back to [`DEFAULT_PRINT_TITLE`].
    pub fn print(&self, label: &RenderedLabel, title: Option<&str>) {
        let title = pick_title(title, DEFAULT_PRINT_TITLE);
        self.dispatch(PrintDocument::single(label.clone()), title);
    }

    /// All labels in one job, one per page. An empty batch does nothing.
    pub fn print_batch(&self, labels: Vec<RenderedLabel>, title: Option<&str>) {
        if labels.is_empty() {
            return;
        }
        let title = pick_title(title, DEFAULT_BATCH_TITLE);
        self.dispatch(PrintDocument::compose(labels), title);
    }

    fn dispatch(&self, doc: PrintDocument, title: String) {
        let encoder = Arc::clone(&self.encoder);
        let sink = Arc::clone(&self.sink);
        let events = self.events.clone();
        thread::spawn(move || {
            let outcome = encoder.encode(&doc).and_then(|job| sink.send(&title, &job));
            let event = match outcome {
                Ok(()) => {
                    debug!(title = %title, labels = doc.labels().count(), "print job sent");
                    PrintEvent::Completed { title }
                }
                Err(e) => {
                    error!(title = %title, error = %e, "print job failed");
                    PrintEvent::Failed { title, error: e.to_string() }
                }
            };
            // Receiver gone means nobody is listening any more.
            let _ = events.send(event);
        });
    }
}

fn pick_title(title: Option<&str>, fallback: &str) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => fallback.to_string(),
    }
}
