//! Redirect resolution for the Linkstash URL shortener.
//!
//! A resolution attempt classifies a shortcode as not-found, expired,
//! or ready, recording exactly one click on success. The [`Countdown`]
//! drives the delayed-navigation flow: a cancellable ticking task that
//! signals "navigate now" when it reaches zero or is skipped.

pub mod countdown;
pub mod error;
pub mod resolver;

pub use countdown::{Countdown, DEFAULT_COUNTDOWN_SECONDS};
pub use error::ResolveError;
pub use resolver::{ReadyRedirect, Resolution, ResolverService};
