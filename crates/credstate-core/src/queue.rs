// Rust guideline compliant 2026-02-06

//! FIFO queue of pending operations.
//!
//! Nodes are kept in a slot arena and linked by index, so the queue can hold
//! both a head and a tail link without shared ownership. Freed slots are
//! reused by later enqueues.

/// One queued operation and the slot of its successor.
#[derive(Debug, Clone)]
struct QueueNode {
    operation: String,
    next: Option<usize>,
}

/// Strict first-in, first-out buffer of operation descriptions.
#[derive(Debug, Clone, Default)]
pub struct OperationQueue {
    slots: Vec<Option<QueueNode>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl OperationQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation at the tail in O(1).
    pub fn enqueue(&mut self, operation: impl Into<String>) {
        let node = QueueNode {
            operation: operation.into(),
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(tail_node) = self.slots[tail].as_mut() {
                    tail_node.next = Some(slot);
                }
            }
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Removes and returns the operation at the head in O(1).
    pub fn dequeue(&mut self) -> Option<String> {
        let head = self.head?;
        let node = self.slots[head].take()?;
        self.free.push(head);

        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Some(node.operation)
    }

    /// Returns the operation at the head without removing it.
    pub fn peek(&self) -> Option<&str> {
        let head = self.head?;
        self.slots[head]
            .as_ref()
            .map(|node| node.operation.as_str())
    }

    /// Drains every queued operation in FIFO order, leaving the queue empty.
    pub fn process_all(&mut self) -> Vec<String> {
        let mut drained = Vec::with_capacity(self.len);
        while let Some(operation) = self.dequeue() {
            drained.push(operation);
        }
        drained
    }

    /// Returns the number of queued operations.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discards every queued operation.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns a FIFO-ordered snapshot without consuming the queue.
    pub fn to_list(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    /// Iterates over queued operations from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.slots[cursor?].as_ref()?;
            cursor = node.next;
            Some(node.operation.as_str())
        })
    }
}
