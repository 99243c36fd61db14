use std::sync::{Arc, Mutex};

/// Output sink for rendered statements.
pub trait StringPrinter: Send + Sync {
    fn print(&self, text: &str);
}

/// Writes to stdout.
pub struct ConsolePrinter;

impl StringPrinter for ConsolePrinter {
    fn print(&self, text: &str) {
        println!("{text}");
    }
}

/// Captures printed text instead of writing it anywhere. Clones share the
/// same buffer, so tests can keep a handle after handing the printer to a
/// service.
#[derive(Clone, Default)]
pub struct RecordingPrinter {
    printed: Arc<Mutex<Vec<String>>>,
}

impl RecordingPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn printed(&self) -> Vec<String> {
        self.printed.lock().unwrap().clone()
    }
}

impl StringPrinter for RecordingPrinter {
    fn print(&self, text: &str) {
        self.printed.lock().unwrap().push(text.to_string());
    }
}
