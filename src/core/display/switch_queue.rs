//=========================================================================
// Switch Queue
//=========================================================================
//
// Display switches requested from inside a hook.
//
// A display cannot switch itself out while the manager is still calling
// into it, so requests land here and the manager applies them in FIFO
// order once the tick's render has returned.
//
//=========================================================================

/// FIFO of display names to switch to.
#[derive(Debug, Default)]
pub struct SwitchQueue {
    queue: Vec<String>,
}

impl SwitchQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a switch to `name` for the end of the tick.
    pub fn request(&mut self, name: impl Into<String>) {
        self.queue.push(name.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes every queued request, leaving the queue empty.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_preserves_order_and_empties() {
        let mut queue = SwitchQueue::new();
        queue.request("a");
        queue.request(String::from("b"));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.take(), vec!["a".to_owned(), "b".to_owned()]);
        assert!(queue.is_empty());
    }
}
