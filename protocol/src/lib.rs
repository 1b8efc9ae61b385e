//! The Dynamic Host Configuration Protocol wire codec (RFC 2131 and
//! RFC 2132): the [`Packet`] model, its binary encoder and decoder, and
//! typed option access.

pub mod constants;
pub mod options;

mod deserializer;
mod error;
mod hardware_type;
mod operation_code;
mod packet;
mod serializer;

pub use self::constants::*;
pub use self::error::Error;
pub use self::hardware_type::HardwareType;
pub use self::operation_code::OperationCode;
pub use self::options::{format_of, DhcpOption, MessageType, OptionFormat, OptionTag};
pub use self::packet::Packet;
