//! Codecs for the persisted resolution-result format.
//!
//! Every codec follows the same two-operation shape: `write` to an
//! [`Encoder`](crate::rw::Encoder), `read` from a
//! [`Decoder`](crate::rw::Decoder), exact inverses of each other.
//!
//! [`ComponentResultCodec`] orchestrates the sub-codecs for one record;
//! [`VariantCodec`] is the only stateful one (stream-scoped
//! de-duplication, explicit `reset`).

mod component;
mod coordinate;
mod identifier;
mod reason;
mod variant;

pub use component::ComponentResultCodec;
pub use variant::VariantCodec;
