//! Request capabilities.
//!
//! A request declares whether it produces a response value. The two families
//! are kept apart: a type must not be both a [`Request`] and a
//! [`VoidRequest`], and discovery rejects declarations that claim both.

/// A request that produces a response of type [`Request::Response`].
///
/// Handler-level failures travel inside the response. Commands and queries
/// implement [`Contract`](super::Contract) instead, which sets
/// `Response = Outcome<Output>` (see [`crate::outcome`]).
///
/// # Examples
///
/// ```
/// use switchboard::mediator::domain::Request;
///
/// struct Ping;
/// struct Pong;
///
/// impl Request for Ping {
///     type Response = Pong;
/// }
/// ```
pub trait Request: Send + 'static {
    /// Value produced by the handler bound to this request.
    type Response: Send + 'static;
}

/// A fire-and-forget request whose handler signals completion only.
pub trait VoidRequest: Send + 'static {}
