//! Tag filter for the required SEQ shape.

use seqx_driver::TagDescriptor;

/// UDT name of exportable tags.
pub const REQUIRED_UDT_NAME: &str = "SEQ";

/// Required leading array dimension.
pub const REQUIRED_ARRAY_LEN: usize = 100;

/// Exportable tags are exactly rank-1 arrays of length 100.
const REQUIRED_DIMS: [u32; 3] = [REQUIRED_ARRAY_LEN as u32, 0, 0];

/// Human-readable description of the required shape, embedded in every
/// export record.
pub fn required_definition() -> String {
    format!("{REQUIRED_UDT_NAME} dims [{REQUIRED_ARRAY_LEN},0,0]")
}

/// Whether a catalog entry matches the required shape.
pub fn matches_required_shape(tag: &TagDescriptor) -> bool {
    tag.data_type == REQUIRED_UDT_NAME && tag.normalized_dims() == REQUIRED_DIMS
}

/// Base names of the matching catalog entries, sorted case-insensitively
/// ascending (ties by natural string order). Entries with empty names are
/// dropped. An empty catalog yields an empty result.
pub fn matching_tag_names(catalog: &[TagDescriptor]) -> Vec<String> {
    let mut names: Vec<String> = catalog
        .iter()
        .filter(|tag| !tag.name.is_empty() && matches_required_shape(tag))
        .map(|tag| tag.name.clone())
        .collect();
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    names
}
