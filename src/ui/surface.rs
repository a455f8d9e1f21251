//! ui::surface
//!
//! The render contract between the shell core and whatever paints it.
//!
//! # Design
//!
//! The interactive core never prints directly. Everything it wants shown
//! goes through a single `render(text)` call on an [`OutputSurface`], so
//! the painting layer (a terminal, a scrollback widget, a test buffer) can
//! be swapped without touching the controller. Text is plain; styling and
//! markup belong to the implementor.

use std::sync::Mutex;

/// Receives plain text from the shell core for display.
///
/// Implementations must be callable from the controller's single thread
/// but are `Send + Sync` so the surface can be shared with dispatch
/// completions.
pub trait OutputSurface: Send + Sync {
    /// Display one block of text. A block may span multiple lines.
    fn render(&self, text: &str);
}

/// Surface that writes to the process stdout, one block per line.
#[derive(Debug, Default)]
pub struct ConsoleSurface;

impl OutputSurface for ConsoleSurface {
    fn render(&self, text: &str) {
        println!("{}", text);
    }
}

/// Surface that records rendered blocks for inspection in tests.
///
/// Thread-safe via an internal mutex so it can be shared with the
/// dispatch side the same way a real surface would be.
#[derive(Debug, Default)]
pub struct MockSurface {
    rendered: Mutex<Vec<String>>,
}

impl MockSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// All blocks rendered so far, in order.
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().expect("surface lock poisoned").clone()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.rendered.lock().expect("surface lock poisoned").clear();
    }
}

impl OutputSurface for MockSurface {
    fn render(&self, text: &str) {
        self.rendered
            .lock()
            .expect("surface lock poisoned")
            .push(text.to_string());
    }
}
