//! Request dispatch: address building, transport, response interpretation
//! and stale-response tracking.

mod error;
mod loader;
mod query;
mod transport;

pub use error::FetchError;
pub use loader::{GraphLoader, RequestTicket, RequestTracker, dispatch, interpret};
pub use query::{PathQuery, encode_component};
pub use transport::{GlooTransport, Method, RawResponse, Transport};
