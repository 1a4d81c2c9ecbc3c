//! Client-side state of the back office screens.
//!
//! Everything here runs against the HTTP API through the [`ListSource`] and
//! [`FormSink`] seams, so the state machines are tested without a browser.
//!
//! - [`query`]: debounced search / filter / pagination state, last request wins
//! - [`list_view`]: paginated list snapshot, empty states, pagination controls
//! - [`cascade`]: province → municipality → barangay selector and address mirroring
//! - [`form`]: create / edit form submission with server field errors
//! - [`wizard`]: two-step farmer + farm registration
//! - [`api`]: reqwest adapters for the sources and sinks

pub mod api;
pub mod cascade;
pub mod error;
pub mod form;
pub mod list_view;
pub mod query;
pub mod timer;
pub mod wizard;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use form::FormSink;
pub use query::ListSource;
