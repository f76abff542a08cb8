//! NGAP Procedures
//!
//! PDU builders for the messages a gNB sends, as defined in 3GPP TS 38.413.
//! Builders are infallible; the `encode_*` helpers add APER encoding.

pub mod initial_context_setup;
pub mod initial_ue_message;
pub mod nas_transport;
pub mod ng_setup;
pub mod pdu_session_resource;
pub mod ue_context_release;

pub use initial_context_setup::*;
pub use initial_ue_message::*;
pub use nas_transport::*;
pub use ng_setup::*;
pub use pdu_session_resource::*;
pub use ue_context_release::*;
