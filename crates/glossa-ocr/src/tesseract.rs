use anyhow::{Context, Result};
use glossa_core::TextRecognizer;
use glossa_types::{CapturedImage, OcrToken};
use rusty_tesseract::{Args, Image};
use xcap::image::RgbaImage;

use crate::lines::{LineBox, Word, group_words};

/// Word level in tesseract's TSV output
const WORD_LEVEL: i32 = 5;

/// Tesseract CLI behind [`TextRecognizer`]
pub struct TesseractOcr {
    args: Args,
}

impl TesseractOcr {
    /// `language` is a tesseract traineddata name such as "eng"
    pub fn new(language: &str) -> Result<Self> {
        let version = rusty_tesseract::get_tesseract_version()
            .context("tesseract is not installed or not on PATH")?;
        tracing::debug!("Using tesseract {}", version.trim());

        Ok(Self {
            args: Args {
                lang: language.to_string(),
                ..Args::default()
            },
        })
    }
}

impl TextRecognizer for TesseractOcr {
    fn recognize(&self, image: &CapturedImage) -> Result<Vec<OcrToken>> {
        let buffer = RgbaImage::from_raw(image.width, image.height, image.rgba.clone())
            .context("Captured pixels do not match the image size")?;

        let file = tempfile::Builder::new()
            .prefix("glossa-capture-")
            .suffix(".png")
            .tempfile()
            .context("Failed to create temporary image file")?;
        buffer
            .save(file.path())
            .context("Failed to write temporary image file")?;

        let input = Image::from_path(file.path().to_path_buf())
            .context("Failed to load image for tesseract")?;
        let output = rusty_tesseract::image_to_data(&input, &self.args)
            .context("tesseract failed")?;

        let words: Vec<Word> = output
            .data
            .into_iter()
            .filter(|d| d.level == WORD_LEVEL)
            .map(|d| Word {
                line: (d.block_num, d.par_num, d.line_num),
                bounds: LineBox::new(d.left as f32, d.top as f32, d.width as f32, d.height as f32),
                conf: d.conf as f32,
                text: d.text,
            })
            .collect();

        Ok(group_words(&words))
    }
}
