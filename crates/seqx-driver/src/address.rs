//! Element address formatting and parsing.
//!
//! Element addresses use the driver's `"<base>[<index>]"` syntax.

/// Format the address of one array element.
pub fn element_address(base: &str, index: usize) -> String {
    format!("{base}[{index}]")
}

/// Parse the element index out of a trailing `[N]` suffix.
///
/// Returns `None` when the address has no parseable numeric suffix.
pub fn parse_element_index(address: &str) -> Option<usize> {
    let (_, index) = split_element(address)?;
    Some(index)
}

/// Split an element address into its base tag name and element index.
pub fn split_element(address: &str) -> Option<(&str, usize)> {
    let open = address.rfind('[')?;
    let rest = &address[open + 1..];
    let close = rest.find(']')?;
    let index = rest[..close].parse().ok()?;
    Some((&address[..open], index))
}
