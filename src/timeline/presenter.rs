/// Consumer of the current stop's text (the on-screen info panel).
pub trait InfoPanel {
    /// Display `title` and `description`, replacing whatever was shown.
    fn show(&mut self, title: &str, description: &str);
}

/// Panel that writes each stop to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPanel;

impl InfoPanel for LogPanel {
    fn show(&mut self, title: &str, description: &str) {
        log::info!("[{title}] {description}");
    }
}

/// Panel that remembers everything it was asked to show.
#[derive(Debug, Default, Clone)]
pub struct RecordingPanel {
    shown: Vec<(String, String)>,
}

impl RecordingPanel {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(title, description)` pair, oldest first.
    #[must_use]
    pub fn shown(&self) -> &[(String, String)] {
        &self.shown
    }

    /// Title currently on display.
    #[must_use]
    pub fn current_title(&self) -> Option<&str> {
        self.shown.last().map(|(title, _)| title.as_str())
    }
}

impl InfoPanel for RecordingPanel {
    fn show(&mut self, title: &str, description: &str) {
        self.shown.push((title.to_owned(), description.to_owned()));
    }
}

impl<P: InfoPanel + ?Sized> InfoPanel for &mut P {
    fn show(&mut self, title: &str, description: &str) {
        (**self).show(title, description);
    }
}
