use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::modules;
use masterror::AppError;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum BusEvent {
    Redraw,
    Module(ModuleEvent),
}

impl BusEvent {
    fn is_coalescable_with(&self, other: &Self) -> bool {
        matches!((self, other), (BusEvent::Redraw, BusEvent::Redraw))
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ModuleEvent {
    Clock(modules::clock::Message),
}

#[derive(Debug)]
struct Queue {
    events: VecDeque<BusEvent>,
    /// A module event left the queue after the last redraw was enqueued.
    taken_since_redraw: bool,
}

impl Queue {
    fn pop(&mut self) -> Option<BusEvent> {
        let event = self.events.pop_front()?;

        if matches!(event, BusEvent::Module(_)) {
            self.taken_since_redraw = true;
        }

        Some(event)
    }
}

#[derive(Debug)]
struct EventBusInner {
    queue: Mutex<Queue>,
    capacity: usize,
}

impl EventBusInner {
    fn new(capacity: NonZeroUsize) -> Self {
        Self {
            queue: Mutex::new(Queue {
                events: VecDeque::with_capacity(capacity.get()),
                taken_since_redraw: false,
            }),
            capacity: capacity.get(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Queue>, EventBusError> {
        self.queue.lock().map_err(|_| EventBusError::Poisoned)
    }

    /// Redraws only merge when no module event was consumed in between, so every
    /// applied state change keeps its own render.
    fn push(&self, event: BusEvent) -> Result<(), EventBusError> {
        let mut queue = self.lock()?;

        if let Some(last) = queue.events.back()
            && event.is_coalescable_with(last)
            && !queue.taken_since_redraw
        {
            return Ok(());
        }

        if queue.events.len() >= self.capacity {
            return Err(EventBusError::QueueFull {
                capacity: self.capacity,
            });
        }

        if matches!(event, BusEvent::Redraw) {
            queue.taken_since_redraw = false;
        }

        queue.events.push_back(event);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventBusError {
    QueueFull { capacity: usize },
    Poisoned,
}

impl std::fmt::Display for EventBusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueueFull { capacity } => {
                write!(f, "Event queue is full (capacity: {})", capacity)
            }
            Self::Poisoned => write!(f, "Event queue state is poisoned"),
        }
    }
}

impl std::error::Error for EventBusError {}

impl From<EventBusError> for AppError {
    fn from(err: EventBusError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Bounded queue carrying module events and redraw requests to the host loop.
#[derive(Debug, Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl EventBus {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(EventBusInner::new(capacity)),
        }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn publish(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }

    pub fn drain(&self) -> Result<Vec<BusEvent>, EventBusError> {
        let mut queue = self.inner.lock()?;

        Ok(std::iter::from_fn(|| queue.pop()).collect())
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    inner: Arc<EventBusInner>,
}

impl EventSender {
    pub fn try_send(&self, event: BusEvent) -> Result<(), EventBusError> {
        self.inner.push(event)
    }
}

#[derive(Debug)]
pub struct EventReceiver {
    inner: Arc<EventBusInner>,
}

impl EventReceiver {
    pub fn try_recv(&mut self) -> Result<Option<BusEvent>, EventBusError> {
        Ok(self.inner.lock()?.pop())
    }
}
