use std::sync::Arc;

use tokio::runtime::Handle;

use crate::event_bus::{BusEvent, EventBusError, EventSender, ModuleEvent};

/// Shared utilities exposed to modules when they need to interact with the host
/// event loop.
///
/// The context owns an [`EventSender`] used to push [`BusEvent`] values into the UI
/// queue and a [`Handle`] tied to the runtime powering background tasks. Tasks
/// spawned through the handle are aborted by their owning module; because event
/// publication is synchronous, an aborted task never leaves a half-published event
/// behind.
#[derive(Debug, Clone)]
pub struct ModuleContext {
    event_sender: EventSender,
    runtime_handle: Handle,
}

impl ModuleContext {
    /// Create a new context bound to the provided event sender and runtime handle.
    ///
    /// # Examples
    ///
    /// ```
    /// # use clockface_core::{event_bus::EventBus, module_context::ModuleContext};
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));
    /// let context = ModuleContext::new(bus.sender(), runtime.handle().clone());
    /// # drop(context);
    /// ```
    pub fn new(event_sender: EventSender, runtime_handle: Handle) -> Self {
        Self {
            event_sender,
            runtime_handle,
        }
    }

    /// Access the runtime handle used for spawning background tasks.
    pub fn runtime_handle(&self) -> &Handle {
        &self.runtime_handle
    }

    /// Ask the host to re-render.
    ///
    /// # Postconditions
    ///
    /// - Enqueues a [`BusEvent::Redraw`] if the bus has remaining capacity, otherwise
    ///   returns [`EventBusError::QueueFull`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use clockface_core::{event_bus::EventBus, module_context::ModuleContext};
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(1).expect("capacity"));
    /// let context = ModuleContext::new(bus.sender(), runtime.handle().clone());
    /// context.request_redraw().expect("queued");
    /// ```
    pub fn request_redraw(&self) -> Result<(), EventBusError> {
        self.event_sender.try_send(BusEvent::Redraw)
    }

    fn publish_module_event(&self, event: ModuleEvent) -> Result<(), EventBusError> {
        self.event_sender.try_send(BusEvent::Module(event))
    }

    /// Build a type-safe module event sender from the provided conversion function.
    ///
    /// # Examples
    ///
    /// ```
    /// # use clockface_core::{event_bus::EventBus, module_context::ModuleContext};
    /// # use clockface_core::event_bus::ModuleEvent;
    /// # use clockface_core::modules::clock::Message;
    /// # use std::num::NonZeroUsize;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let bus = EventBus::new(NonZeroUsize::new(2).expect("capacity"));
    /// let context = ModuleContext::new(bus.sender(), runtime.handle().clone());
    /// let sender = context.module_sender(ModuleEvent::Clock);
    /// sender
    ///     .try_send(Message::Tick(chrono::Local::now()))
    ///     .expect("queued");
    /// ```
    pub fn module_sender<T, F>(&self, convert: F) -> ModuleEventSender<T>
    where
        T: Send + 'static,
        F: Fn(T) -> ModuleEvent + Send + Sync + 'static,
    {
        ModuleEventSender {
            context: self.clone(),
            convert: Arc::new(convert),
        }
    }
}

/// Strongly-typed wrapper around [`ModuleContext::publish_module_event`].
#[derive(Clone)]
pub struct ModuleEventSender<T> {
    context: ModuleContext,
    convert: Arc<dyn Fn(T) -> ModuleEvent + Send + Sync>,
}

impl<T> std::fmt::Debug for ModuleEventSender<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEventSender")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl<T> ModuleEventSender<T>
where
    T: Send + 'static,
{
    /// Convert the payload into a [`ModuleEvent`] and enqueue it on the bus.
    ///
    /// # Postconditions
    ///
    /// - Returns [`Ok`] if the event is successfully queued, otherwise propagates
    ///   [`EventBusError`] from the underlying [`EventSender`].
    pub fn try_send(&self, payload: T) -> Result<(), EventBusError> {
        let event = (self.convert)(payload);
        self.context.publish_module_event(event)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use chrono::Local;
    use tokio::runtime::Runtime;

    use crate::event_bus::{BusEvent, EventBus, EventBusError, ModuleEvent};
    use crate::modules::clock::Message;

    use super::ModuleContext;

    #[test]
    fn request_redraw_enqueues_event() {
        let runtime = Runtime::new().expect("runtime");
        let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));
        let mut receiver = bus.receiver();
        let context = ModuleContext::new(bus.sender(), runtime.handle().clone());

        context.request_redraw().expect("redraw enqueued");

        let event = receiver.try_recv().expect("receive");
        assert!(matches!(event, Some(BusEvent::Redraw)));
    }

    #[test]
    fn module_sender_enqueues_module_event() {
        let runtime = Runtime::new().expect("runtime");
        let bus = EventBus::new(NonZeroUsize::new(4).expect("capacity"));
        let mut receiver = bus.receiver();
        let context = ModuleContext::new(bus.sender(), runtime.handle().clone());
        let now = Local::now();

        let clock_sender = context.module_sender(ModuleEvent::Clock);
        clock_sender
            .try_send(Message::Tick(now))
            .expect("module enqueued");

        let event = receiver.try_recv().expect("receive");
        assert!(matches!(
            event,
            Some(BusEvent::Module(ModuleEvent::Clock(Message::Tick(time)))) if time == now
        ));
    }

    #[test]
    fn module_sender_surfaces_full_queue() {
        let runtime = Runtime::new().expect("runtime");
        let bus = EventBus::new(NonZeroUsize::new(1).expect("capacity"));
        let context = ModuleContext::new(bus.sender(), runtime.handle().clone());
        let clock_sender = context.module_sender(ModuleEvent::Clock);

        clock_sender
            .try_send(Message::Tick(Local::now()))
            .expect("first");

        assert_eq!(
            clock_sender.try_send(Message::Tick(Local::now())),
            Err(EventBusError::QueueFull { capacity: 1 })
        );
    }
}
