//! Well-known values used across contract test scenarios

/// The zero address, `0x` followed by 40 hex zeros
pub const ADDRESS_ZERO: &str = "0x0000000000000000000000000000000000000000";

/// The zero 32-byte word, `0x` followed by 64 hex zeros
pub const BYTES32_ZERO: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Loan status reported while a debt is being serviced
pub const STATUS_ONGOING: &str = "1";

/// Loan status reported once a debt is fully paid
pub const STATUS_PAID: &str = "2";

/// Loan status reported when a debt entered an error state
pub const STATUS_ERROR: &str = "4";
