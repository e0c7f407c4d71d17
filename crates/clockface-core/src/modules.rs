use std::borrow::Cow;

use thiserror::Error;

use crate::module_context::ModuleContext;

pub mod clock;

/// Errors that can occur while registering a module.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// Domain-specific registration failures surfaced by the module.
    #[error("module registration failed: {reason}")]
    Registration { reason: Cow<'static, str> },
}

impl ModuleError {
    /// Construct a registration error with the provided reason.
    pub fn registration(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Registration {
            reason: reason.into(),
        }
    }
}

/// Lifecycle contract between a module and the host that displays it.
///
/// The host calls [`register`](Module::register) once when the module enters the
/// display tree and [`unregister`](Module::unregister) once when it leaves.
/// [`view`](Module::view) is re-invoked whenever the module asks for a redraw
/// through its [`ModuleContext`] and must not mutate state.
///
/// ```no_run
/// use clockface_core::event_bus::ModuleEvent;
/// use clockface_core::modules::{Module, ModuleError, clock::Message};
/// use clockface_core::{ModuleContext, ModuleEventSender};
///
/// #[derive(Default)]
/// struct ExampleModule {
///     sender: Option<ModuleEventSender<Message>>,
/// }
///
/// impl Module for ExampleModule {
///     type ViewData<'a> = ();
///     type RegistrationData<'a> = ();
///     type Rendered = ();
///
///     fn register(
///         &mut self,
///         ctx: &ModuleContext,
///         _data: Self::RegistrationData<'_>,
///     ) -> Result<(), ModuleError> {
///         self.sender = Some(ctx.module_sender(ModuleEvent::Clock));
///         Ok(())
///     }
///
///     fn view(&self, _data: Self::ViewData<'_>) -> Self::Rendered {}
/// }
/// ```
pub trait Module {
    type ViewData<'a>;
    type RegistrationData<'a>;
    type Rendered;

    /// Attach the module to the host. The default implementation performs no work.
    fn register(
        &mut self,
        ctx: &ModuleContext,
        data: Self::RegistrationData<'_>,
    ) -> Result<(), ModuleError> {
        let _ = (ctx, data);
        Ok(())
    }

    /// Detach the module and release everything acquired in `register`.
    fn unregister(&mut self) {}

    fn view(&self, data: Self::ViewData<'_>) -> Self::Rendered;
}
