//! The webhook protocol state machine and event dispatcher.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use futures::future::BoxFuture;
use tokio::sync::oneshot;

use crate::api::{BotApi, HttpClient, ReqwestClient};
use crate::event::{Event, EventType, MessageEventData, parse_events};
use crate::headers;
use crate::options::BotOptions;
use crate::signature::Signer;

use super::{ErrorBody, WebhookRequest, WebhookResponse};

/// Error type handlers may return. Failures are logged and isolated; they
/// never affect the HTTP response or sibling handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

type Handler<H> = Arc<
    dyn Fn(MessageEventData, BotApi<H>) -> BoxFuture<'static, Result<(), HandlerError>>
        + Send
        + Sync,
>;
type HandlerMap<H> = HashMap<EventType, Vec<Handler<H>>>;

/// Correlation record for one inbound delivery.
///
/// Carries the `X-Chat-Request-ID` header value (possibly empty) so API
/// calls made while handling the batch can be traced back to the delivery
/// that triggered them. Created per POST, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookContext {
    /// Value of the delivery's `X-Chat-Request-ID` header.
    pub request_id: String,
}

/// Resolves once a dispatched batch has fully finished.
///
/// Returned by [`Webhook::handle_with_completion`] for hosts that suspend
/// after responding (worker runtimes): await it before yielding control.
/// Resolves immediately when the request was rejected and no dispatch was
/// scheduled.
#[derive(Debug)]
pub struct Completion {
    receiver: oneshot::Receiver<()>,
}

impl Completion {
    /// Waits until background dispatch has finished.
    pub async fn wait(self) {
        // A dropped sender means nothing was dispatched.
        let _ = self.receiver.await;
    }
}

/// The webhook endpoint: verification handshake, signature authentication,
/// batch validation, and background dispatch to registered handlers.
///
/// `handle` always produces an HTTP response. Accepted deliveries are
/// answered with 202 *before* any handler runs; the validated events are
/// dispatched on a background task. Within one batch, handlers run
/// strictly one after another; separate deliveries overlap freely.
///
/// The type parameter is the HTTP transport used by the [`BotApi`] handed
/// to handlers; it defaults to the production client.
pub struct Webhook<H = ReqwestClient> {
    options: Arc<BotOptions>,
    client: H,
    signer: Option<Signer>,
    handlers: RwLock<HandlerMap<H>>,
}

impl Webhook<ReqwestClient> {
    /// Creates a webhook endpoint with the default HTTP transport.
    #[must_use]
    pub fn new(options: BotOptions) -> Self {
        Self::with_client(options, ReqwestClient::new())
    }
}

impl<H> Webhook<H> {
    /// Creates a webhook endpoint with a custom HTTP transport.
    #[must_use]
    pub fn with_client(options: BotOptions, client: H) -> Self {
        Self::from_shared(Arc::new(options), client)
    }

    pub(crate) fn from_shared(options: Arc<BotOptions>, client: H) -> Self {
        // Signature verification is opt-in: active only when a secret is
        // configured.
        let signer = options.webhook_secret().map(Signer::new);
        Self {
            options,
            client,
            signer,
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a handler for an event type.
    ///
    /// Multiple handlers may be registered per type; the order they run in
    /// is not guaranteed. Registration is expected at setup time, before
    /// traffic arrives.
    pub fn on<F, Fut>(&self, event_type: EventType, handler: F) -> &Self
    where
        F: Fn(MessageEventData, BotApi<H>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        let handler: Handler<H> = Arc::new(move |data, api| Box::pin(handler(data, api)));
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event_type)
            .or_default()
            .push(handler);
        self
    }

    fn snapshot(&self) -> HandlerMap<H> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<H> Webhook<H>
where
    H: HttpClient + Clone + Send + Sync + 'static,
{
    /// Handles one inbound webhook request.
    ///
    /// Never fails: validation and authentication problems map to 400
    /// responses with a structured JSON body. Must be called from within a
    /// tokio runtime, which the dispatch task is spawned onto.
    pub async fn handle(&self, request: WebhookRequest) -> WebhookResponse {
        self.route(request, None)
    }

    /// Like [`Webhook::handle`], additionally returning a [`Completion`]
    /// that resolves once background dispatch has finished.
    pub async fn handle_with_completion(
        &self,
        request: WebhookRequest,
    ) -> (WebhookResponse, Completion) {
        let (sender, receiver) = oneshot::channel();
        let response = self.route(request, Some(sender));
        (response, Completion { receiver })
    }

    fn route(&self, request: WebhookRequest, done: Option<oneshot::Sender<()>>) -> WebhookResponse {
        if request.method == http::Method::GET {
            Self::handle_challenge(&request)
        } else if request.method == http::Method::POST {
            self.handle_delivery(&request, done)
        } else {
            let method = request.method.as_str().to_uppercase();
            WebhookResponse::bad_request(&ErrorBody::message(format!(
                "Unsupported method '{method}'."
            )))
        }
    }

    /// The verification dance: echo the `challenge` query parameter back.
    fn handle_challenge(request: &WebhookRequest) -> WebhookResponse {
        match request.query_param("challenge").filter(|c| !c.is_empty()) {
            Some(challenge) => WebhookResponse::challenge(&challenge),
            None => WebhookResponse::bad_request(&ErrorBody::message(
                "Missing 'challenge' query parameter.",
            )),
        }
    }

    fn handle_delivery(
        &self,
        request: &WebhookRequest,
        done: Option<oneshot::Sender<()>>,
    ) -> WebhookResponse {
        let request_id = request
            .header_str(headers::REQUEST_ID)
            .unwrap_or_default()
            .to_string();

        if let Some(signer) = &self.signer {
            let Some(signature) = request.header_str(headers::SIGNATURE) else {
                return WebhookResponse::bad_request(&ErrorBody::message(
                    "Missing 'X-Hub-Signature-256' header.",
                ));
            };
            if !signer.verify(signature, &request.body) {
                return WebhookResponse::bad_request(&ErrorBody::message(
                    "Request signature mismatch.",
                ));
            }
        }

        // Parse the exact bytes the signature covered.
        let json: serde_json::Value = match serde_json::from_slice(&request.body) {
            Ok(json) => json,
            Err(error) => {
                return WebhookResponse::bad_request(&ErrorBody::with_error(
                    "Failed to parse request body.",
                    error.to_string(),
                ));
            }
        };

        let events = match parse_events(&json) {
            Ok(events) => events,
            Err(error) => {
                return WebhookResponse::bad_request(&ErrorBody::with_error(
                    "Failed to parse request body.",
                    error.to_string(),
                ));
            }
        };

        // Everything checks out. Respond 202 now; handlers run as
        // background work the platform does not wait for.
        let api = BotApi::from_shared(
            Arc::clone(&self.options),
            self.client.clone(),
            Some(WebhookContext { request_id }),
        );
        let handlers = self.snapshot();
        tokio::spawn(async move {
            dispatch(events, &handlers, api).await;
            if let Some(done) = done {
                let _ = done.send(());
            }
        });

        WebhookResponse::accepted()
    }
}

impl<H> std::fmt::Debug for Webhook<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Webhook")
            .field("options", &self.options)
            .field("verifies_signatures", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

/// Runs every handler for every event in the batch, in order, isolating
/// failures so one bad handler cannot stop the rest.
async fn dispatch<H>(events: Vec<Event>, handlers: &HandlerMap<H>, api: BotApi<H>)
where
    H: Clone + Send + Sync + 'static,
{
    let mut warned: HashSet<EventType> = HashSet::new();

    for event in events {
        let event_type = event.event_type();
        let Some(registered) = handlers.get(&event_type) else {
            // Once per type per batch.
            if warned.insert(event_type) {
                tracing::warn!("No handlers registered for '{event_type}' events");
            }
            continue;
        };

        for handler in registered {
            let future = handler.as_ref()(event.data().clone(), api.clone());
            // Each invocation gets its own task so both Err returns and
            // panics are contained; awaiting it keeps handlers sequential.
            match tokio::spawn(future).await {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    tracing::error!("Handler for '{event_type}' failed: {error}");
                }
                Err(error) => {
                    tracing::error!("Handler for '{event_type}' panicked: {error}");
                }
            }
        }
    }
}
