//! Protocol error types.
//!
//! Variants fall into two classes: malformed wire data (the datagram is
//! corrupt and should be dropped) and invalid arguments (the caller
//! misused the API). [`Error::is_malformed`] tells them apart so a server
//! loop can drop bad datagrams without masking programming errors.

/// Errors produced by the packet codec and option accessors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Shorter than the 236 byte fixed BOOTP header.
    #[error("packet too small ({0} bytes), absolute minimum is 236")]
    PacketTooSmall(usize),
    /// Longer than the 1500 byte MTU bound, or serialization exceeded
    /// the requested maximum size.
    #[error("packet too big ({0} bytes)")]
    PacketTooBig(usize),
    /// Option parsing reached the end of the buffer without an END marker.
    #[error("options are truncated")]
    TruncatedOptions,
    /// A stored option value has the wrong length for its registered format.
    #[error("option {code} has {len} value bytes, expected {expected}")]
    BadOptionSize {
        code: u8,
        len: usize,
        expected: &'static str,
    },
    /// An option value longer than 255 bytes cannot be carried by the
    /// one-byte length prefix.
    #[error("option {0} is larger than 255 bytes")]
    OptionTooLong(u8),

    /// A typed accessor or constructor was used for an option code not
    /// registered under that format.
    #[error("option {code} is not of format {requested}")]
    WrongOptionFormat {
        code: u8,
        requested: &'static str,
    },
    /// Codes 0 (PAD) and 255 (END) are reserved and cannot carry a value.
    #[error("option code {0} is reserved")]
    ReservedOptionCode(u8),
    /// Catch-all for caller misuse of the packet API.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl Error {
    /// `true` for errors reflecting corrupt wire data, `false` for
    /// programmer errors.
    pub fn is_malformed(&self) -> bool {
        use self::Error::*;
        matches!(
            self,
            PacketTooSmall(_)
                | PacketTooBig(_)
                | TruncatedOptions
                | BadOptionSize { .. }
                | OptionTooLong(_)
        )
    }
}
