//! Concrete command codecs, one module per payload shape.

pub mod ack;
pub mod control;
pub mod publish;
pub mod suback;
pub mod subscribe;
pub mod unsubscribe;

pub use ack::{Puback, Pubcomp, Pubrec, Pubrel, Unsuback};
pub use control::{Disconnect, Pingreq, Pingresp};
pub use publish::Publish;
pub use suback::Suback;
pub use subscribe::{Subscribe, Topic};
pub use unsubscribe::Unsubscribe;
