use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Fixed-capacity queue of recently served activity ids.
///
/// Pushing onto a full window evicts the oldest id. Re-serving an id that is
/// already present moves it to the back, so the window never holds
/// duplicates and `len() <= capacity()` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWindow")]
pub struct RecencyWindow {
    capacity: usize,
    ids: VecDeque<String>,
}

#[derive(Deserialize)]
struct RawWindow {
    capacity: usize,
    #[serde(default)]
    ids: VecDeque<String>,
}

impl From<RawWindow> for RecencyWindow {
    fn from(raw: RawWindow) -> Self {
        let mut w = RecencyWindow::new(raw.capacity);
        for id in raw.ids {
            w.push(&id);
        }
        w
    }
}

impl RecencyWindow {
    pub fn new(capacity: usize) -> Self {
        RecencyWindow { capacity, ids: VecDeque::with_capacity(capacity) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    /// Age rank of an id: 0 is the oldest entry.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|x| x == id)
    }

    pub fn push(&mut self, id: &str) {
        if self.capacity == 0 {
            return;
        }
        if let Some(pos) = self.position(id) {
            self.ids.remove(pos);
        }
        while self.ids.len() >= self.capacity {
            self.ids.pop_front();
        }
        self.ids.push_back(id.to_string());
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.ids.len() > capacity {
            self.ids.pop_front();
        }
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }
}
