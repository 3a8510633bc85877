//! Host adapters that mount the webhook handler in specific runtimes.
//!
//! Web framework hosts mount [`Webhook::handle`] behind a route; with the
//! `axum` feature enabled, `adapter::axum::router` does this for an axum
//! application.
//!
//! Worker-style hosts that suspend as soon as the response is returned
//! should call [`Webhook::handle_with_completion`] instead and register
//! the returned [`Completion`] as pending work (for example, await it
//! from the task the runtime keeps alive). The response is still produced
//! immediately; the completion resolves once every handler in the batch
//! has finished.
//!
//! [`Webhook::handle`]: crate::webhook::Webhook::handle
//! [`Webhook::handle_with_completion`]: crate::webhook::Webhook::handle_with_completion
//! [`Completion`]: crate::webhook::Completion

#[cfg(feature = "axum")]
pub mod axum;
