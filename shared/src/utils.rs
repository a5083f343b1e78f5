//! # Shared Utility Functions
//!
//! Common helpers used by the contract layer and the web front end.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `0x1234...abcd` style used in toasts and the wallet badge
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::truncate_address;
//!
//! let address = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
//! assert_eq!(truncate_address(address), "0x8335...2913");
//! ```

/// Format an address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is not longer than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
/// assert_eq!(format_address(addr, 6, 4), "0x8335...2913");
/// assert_eq!(format_address(addr, 4, 4), "0x83...2913");
/// assert_eq!(format_address("0xabc", 6, 4), "0xabc");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len || !address.is_ascii() {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Shorten a hex address or transaction hash to `0x1234...abcd`.
///
/// Strings of ten characters or fewer are returned unchanged.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}
