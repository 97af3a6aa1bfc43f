//! Query flags passed to the identity-reporting service

use bitflags::bitflags;

bitflags! {
    /// Sections a caller asks the identity-reporting service to fill.
    ///
    /// Numeric values follow the host. Bits this crate does not name are kept
    /// as-is and passed through to the base producer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct QueryFlags: u64 {
        /// Legacy signature array
        const GET_SIGNATURES = 0x40;
        /// Requested and defined capability sections
        const GET_PERMISSIONS = 0x1000;
        /// Rich signing information
        const GET_SIGNING_CERTIFICATES = 0x0800_0000;
    }
}

impl QueryFlags {
    /// Flags from a raw host value, unknown bits retained
    pub fn from_raw(bits: u64) -> Self {
        Self::from_bits_retain(bits)
    }

    /// Whether the caller asked for either form of the signing identity
    pub fn requests_signing_identity(self) -> bool {
        self.intersects(Self::GET_SIGNATURES | Self::GET_SIGNING_CERTIFICATES)
    }

    /// Whether the caller asked for the capability sections
    pub fn requests_capabilities(self) -> bool {
        self.contains(Self::GET_PERMISSIONS)
    }
}

impl Default for QueryFlags {
    fn default() -> Self {
        Self::empty()
    }
}
