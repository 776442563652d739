use oric_hires::{codec, OricColour, PictureDocument};
use serde::Serialize;

/// Summary of a picture for `info` output
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PictureInfo {
    pub label: String,
    pub width: usize,
    pub height: usize,
    /// Pixel count per colour, in palette order
    pub colours: Vec<ColourCount>,
    /// `[row, cell]` of every cell with more than two colours
    pub non_conformant_cells: Vec<[usize; 2]>,
    /// Whether the picture can be saved as it is
    pub encodable: bool,
    /// Why saving would fail, if it would
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode_error: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ColourCount {
    pub index: u8,
    pub name: &'static str,
    pub pixels: usize,
}

impl PictureInfo {
    pub fn from_document(document: &PictureDocument) -> Self {
        let canvas = document.canvas();
        let histogram = canvas.histogram();
        let colours = OricColour::ALL
            .into_iter()
            .map(|c| ColourCount {
                index: c.index(),
                name: c.name(),
                pixels: histogram[c.index() as usize],
            })
            .collect();
        let encode_error = codec::encode(document).err().map(|e| e.to_string());

        Self {
            label: document.label().to_string(),
            width: canvas.width(),
            height: canvas.height(),
            colours,
            non_conformant_cells: canvas
                .non_conformant_cells()
                .into_iter()
                .map(|(row, cell)| [row, cell])
                .collect(),
            encodable: encode_error.is_none(),
            encode_error,
        }
    }
}
