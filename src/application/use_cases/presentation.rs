use std::time::Duration;

/// Shown before the first rotation tick.
pub const INITIAL_LOADING_TEXT: &str = "Thinking...";

pub const LOADING_MESSAGES: &[&str] = &[
    "Analyzing topic...",
    "Structuring logic...",
    "Creating analogies...",
    "Almost there...",
];

pub const LOADING_TICK: Duration = Duration::from_millis(1500);

/// Cycling status text displayed while a response is awaited. Display only.
#[derive(Debug, Clone, Default)]
pub struct LoadingStatus {
    ticks: usize,
}

impl LoadingStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &'static str {
        match self.ticks {
            0 => INITIAL_LOADING_TEXT,
            n => LOADING_MESSAGES[(n - 1) % LOADING_MESSAGES.len()],
        }
    }

    /// Advances one tick and returns the new text.
    pub fn advance(&mut self) -> &'static str {
        self.ticks += 1;
        self.current()
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 18 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

/// A preset topic offered on the home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickStart {
    pub label: &'static str,
    pub topic: &'static str,
}

pub const QUICK_STARTS: &[QuickStart] = &[
    QuickStart {
        label: "Feynman Explain",
        topic: "Explain photosynthesis using the Feynman technique",
    },
    QuickStart {
        label: "Quick Summary",
        topic: "Summarize the main points of World War 2",
    },
    QuickStart {
        label: "Test My Knowledge",
        topic: "Quiz me on basic chemistry",
    },
];
