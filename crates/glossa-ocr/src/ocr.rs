use anyhow::{Context, Result};
use glossa_core::TextRecognizer;
use glossa_types::{CapturedImage, OcrToken};
use windows::{
    Globalization::Language,
    Graphics::Imaging::BitmapDecoder,
    Media::Ocr::{OcrEngine as WinOcrEngine, OcrLine},
    Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
    core::HSTRING,
};

use crate::com::ComGuard;
use crate::lines::LineBox;

/// Windows.Media.Ocr behind [`TextRecognizer`]; one token per recognised line
pub struct WindowsOcr {
    engine: WinOcrEngine,
}

impl WindowsOcr {
    /// Create an engine for a BCP-47 language tag (e.g. "en", "ja")
    pub fn new(language_code: &str) -> Result<Self> {
        let _com = ComGuard::initialize()?;

        let language = Language::CreateLanguage(&HSTRING::from(language_code))
            .context("Failed to create language")?;

        let engine = WinOcrEngine::TryCreateFromLanguage(&language)
            .with_context(|| format!("No OCR language pack installed for '{}'", language_code))?;

        Ok(Self { engine })
    }

    pub fn recognizer_language(&self) -> Result<String> {
        self.engine
            .RecognizerLanguage()
            .context("Failed to get recognizer language")?
            .LanguageTag()
            .map(|tag| tag.to_string())
            .context("Failed to get language tag")
    }

    fn recognize_png(&self, png: &[u8]) -> Result<Vec<OcrToken>> {
        let stream = InMemoryRandomAccessStream::new().context("Failed to create stream")?;
        let writer = DataWriter::CreateDataWriter(&stream).context("Failed to create writer")?;

        writer.WriteBytes(png).context("Failed to write image bytes")?;
        writer
            .StoreAsync()
            .context("Failed to store async")?
            .get()
            .context("Failed to store data")?;
        writer.FlushAsync().context("Failed to flush")?.get()?;

        stream.Seek(0).context("Failed to seek")?;

        let decoder = BitmapDecoder::CreateAsync(&stream)
            .context("Failed to create decoder async")?
            .get()
            .context("Failed to get decoder")?;

        let bitmap = decoder
            .GetSoftwareBitmapAsync()
            .context("Failed to get bitmap async")?
            .get()
            .context("Failed to get software bitmap")?;

        let result = self
            .engine
            .RecognizeAsync(&bitmap)
            .context("Failed to recognize async")?
            .get()
            .context("Failed to get OCR result")?;

        let mut tokens = Vec::new();
        for line in result.Lines().context("Failed to get OCR lines")? {
            if let Some(token) = line_token(&line)? {
                tokens.push(token);
            }
        }
        Ok(tokens)
    }
}

/// Windows OCR reports no confidence, so every line scores 1.0
fn line_token(line: &OcrLine) -> Result<Option<OcrToken>> {
    let text = line.Text().context("Failed to get line text")?.to_string();

    let mut bounds: Option<LineBox> = None;
    for word in line.Words().context("Failed to get line words")? {
        let rect = word.BoundingRect().context("Failed to get word bounds")?;
        let word_box = LineBox::new(rect.X, rect.Y, rect.Width, rect.Height);
        bounds = Some(match bounds {
            Some(b) => b.union(&word_box),
            None => word_box,
        });
    }

    Ok(bounds.map(|b| OcrToken {
        quad: b.quad(),
        text,
        confidence: 1.0,
    }))
}

impl TextRecognizer for WindowsOcr {
    fn recognize(&self, image: &CapturedImage) -> Result<Vec<OcrToken>> {
        let _com = ComGuard::initialize()?;
        let png = encode_png(image)?;
        self.recognize_png(&png)
    }
}

fn encode_png(image: &CapturedImage) -> Result<Vec<u8>> {
    use xcap::image::ImageEncoder;
    let mut buffer = Vec::new();
    xcap::image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(
            &image.rgba,
            image.width,
            image.height,
            xcap::image::ExtendedColorType::Rgba8,
        )
        .context("Failed to encode PNG")?;
    Ok(buffer)
}
