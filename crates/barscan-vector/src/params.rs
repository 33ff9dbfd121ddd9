use serde::{Deserialize, Serialize};

/// Parameters for the vector pipeline.
///
/// Like the raster calendar spec, these are facts about one chart export
/// (fill color of the bars, the footnote marker its renderer emits, how far
/// above the bar paths the axis-label group sits) and are injectable so a
/// different export calibrates without code change.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VectorParams {
    /// Exact token the bar paths' `style` attribute must contain.
    pub fill_token: String,

    /// Labels containing this phrase are footnotes, not dates.
    pub footnote_marker: String,

    /// How many ancestors above the first bar path scope the label search.
    pub label_ancestor_depth: usize,
}

impl Default for VectorParams {
    fn default() -> Self {
        Self {
            fill_token: "fill:#808080".to_owned(),
            footnote_marker: "(*)".to_owned(),
            label_ancestor_depth: 2,
        }
    }
}
