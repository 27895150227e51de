// Certificate PDF generation
// Uses genpdf - requires Liberation, DejaVu or Arial fonts in standard paths
pub mod layout;

use genpdf::{elements, fonts, render, style, Element, Mm, Position, RenderResult, Scale, Size};
use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::certificate::{CertificateBody, CertificateRequest};
use crate::errors::CompositionError;
use crate::storage::certificate_filename;
use layout::{TextMeasure, TextStyle, PAGE_HEIGHT, PAGE_WIDTH};

const MM_PER_POINT: f64 = 25.4 / 72.0;
// At 72 dpi one image pixel is one point before scaling.
const BACKGROUND_DPI: f64 = 72.0;

static FONT_PATHS: [&str; 5] = [
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/TTF",
    "/System/Library/Fonts/Supplemental",
    "/Library/Fonts",
];

/// File names of one family's faces, in regular/bold/italic/bold-italic order.
/// Families name their slanted faces differently, so each is spelled out.
struct FamilyFiles {
    name: &'static str,
    faces: [&'static str; 4],
}

static FONT_FAMILIES: [FamilyFiles; 3] = [
    FamilyFiles {
        name: "LiberationSans",
        faces: [
            "LiberationSans-Regular.ttf",
            "LiberationSans-Bold.ttf",
            "LiberationSans-Italic.ttf",
            "LiberationSans-BoldItalic.ttf",
        ],
    },
    FamilyFiles {
        name: "DejaVuSans",
        faces: [
            "DejaVuSans.ttf",
            "DejaVuSans-Bold.ttf",
            "DejaVuSans-Oblique.ttf",
            "DejaVuSans-BoldOblique.ttf",
        ],
    },
    FamilyFiles {
        name: "Arial",
        faces: [
            "Arial.ttf",
            "Arial Bold.ttf",
            "Arial Italic.ttf",
            "Arial Bold Italic.ttf",
        ],
    },
];

impl FamilyFiles {
    fn load_from(&self, dir: &Path) -> Option<fonts::FontFamily<fonts::FontData>> {
        let [regular, bold, italic, bold_italic] = self.faces;
        let face = |file: &str| -> Option<fonts::FontData> {
            let path = dir.join(file);
            let data = std::fs::read(&path).ok()?;
            match fonts::FontData::new(data, None) {
                Ok(font) => Some(font),
                Err(e) => {
                    warn!("Unusable font file {}: {}", path.display(), e);
                    None
                }
            }
        };
        let family = fonts::FontFamily {
            regular: face(regular)?,
            bold: face(bold)?,
            italic: face(italic)?,
            bold_italic: face(bold_italic)?,
        };
        debug!("Loaded font family {} from {}", self.name, dir.display());
        Some(family)
    }
}

fn mm(points: f64) -> Mm {
    Mm::from(points * MM_PER_POINT)
}

/// Template artwork drawn full-bleed behind the text.
#[derive(Clone)]
pub struct Background {
    image: DynamicImage,
}

impl Background {
    pub fn open(path: &Path) -> Result<Self, CompositionError> {
        let image = image::open(path).map_err(|source| CompositionError::Background {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(image))
    }

    /// The renderer rejects alpha channels, so the image is flattened to RGB.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: DynamicImage::ImageRgb8(image.to_rgb8()),
        }
    }

    fn page_scale(&self) -> Scale {
        let (width, height) = self.image.dimensions();
        Scale::new(
            PAGE_WIDTH / f64::from(width.max(1)),
            PAGE_HEIGHT / f64::from(height.max(1)),
        )
    }
}

/// Locates a sans-serif family with regular and bold faces.
#[derive(Clone, Debug, Default)]
pub struct FontSource {
    dir: Option<PathBuf>,
}

impl FontSource {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn load(&self) -> Result<fonts::FontFamily<fonts::FontData>, CompositionError> {
        // genpdf needs actual font files for metrics
        let configured = self.dir.iter().map(PathBuf::as_path);
        let system = FONT_PATHS.iter().map(Path::new);

        configured
            .chain(system)
            .filter(|dir| dir.is_dir())
            .find_map(|dir| FONT_FAMILIES.iter().find_map(|family| family.load_from(dir)))
            .ok_or(CompositionError::FontsUnavailable)
    }
}

struct FontCacheMeasure<'a>(&'a fonts::FontCache);

impl TextMeasure for FontCacheMeasure<'_> {
    fn fits(&self, text: &str, style: &TextStyle, max_width: f64) -> bool {
        pdf_style(style).str_width(self.0, text) <= mm(max_width)
    }
}

fn pdf_style(text_style: &TextStyle) -> style::Style {
    let (r, g, b) = text_style.color;
    let style = style::Style::new()
        .with_font_size(text_style.size)
        .with_color(style::Color::Rgb(r, g, b));
    if text_style.bold {
        style.bold()
    } else {
        style
    }
}

/// genpdf places a text cursor one glyph height below the given top, so the
/// top sits that far above the wanted baseline.
fn line_top(baseline: f64, glyph_height: Mm) -> Mm {
    mm(baseline) - glyph_height
}

/// The whole certificate as a single element: background first, then every
/// placed line on top of it.
struct CertificatePage {
    background: elements::Image,
    request: CertificateRequest,
    body: CertificateBody,
    formatted_date: String,
}

impl Element for CertificatePage {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: style::Style,
    ) -> Result<RenderResult, genpdf::error::Error> {
        self.background.render(context, area.clone(), style)?;

        let measure = FontCacheMeasure(&context.font_cache);
        let lines = layout::lay_out(&self.request, &self.body, &self.formatted_date, &measure);
        for line in lines {
            let line_style = pdf_style(&line.style);
            let width = line_style.str_width(&context.font_cache, &line.text);
            let x = mm(line.center_x) - width / 2.0;
            if x < Mm::from(0.0) || x + width > mm(PAGE_WIDTH) {
                warn!("Line {:?} runs past the page edges", line.text);
            }
            let glyph_height = line_style.font(&context.font_cache).glyph_height(line.style.size);
            let top = line_top(line.baseline, glyph_height);
            if !area.print_str(&context.font_cache, Position::new(x, top), line_style, &line.text)? {
                warn!("Line {:?} did not fit on the certificate page", line.text);
            }
        }

        Ok(RenderResult {
            size: area.size(),
            has_more: false,
        })
    }
}

/// Renders one landscape A4 certificate and returns the PDF bytes.
/// `formatted_date` is the long form produced by
/// [`CertificateRequest::formatted_date`].
pub fn render_certificate(
    request: &CertificateRequest,
    body: &CertificateBody,
    formatted_date: &str,
    background: &Background,
    font_family: fonts::FontFamily<fonts::FontData>,
) -> Result<Vec<u8>, CompositionError> {
    let image = elements::Image::from_dynamic_image(background.image.clone())
        .map_err(CompositionError::BackgroundFormat)?
        .with_position(Position::new(0.0, 0.0))
        .with_scale(background.page_scale())
        .with_dpi(BACKGROUND_DPI);

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Certificate of Completion - {}", request.name));
    doc.set_paper_size(Size::new(mm(PAGE_WIDTH), mm(PAGE_HEIGHT)));
    doc.push(CertificatePage {
        background: image,
        request: request.clone(),
        body: body.clone(),
        formatted_date: formatted_date.to_string(),
    });

    let mut bytes = Vec::new();
    doc.render(&mut bytes)?;
    Ok(bytes)
}

/// A finished certificate, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct RenderedCertificate {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Loads the template and fonts for each composition, then renders.
#[derive(Clone, Debug)]
pub struct Composer {
    template_path: PathBuf,
    fonts: FontSource,
}

impl Composer {
    pub fn new(template_path: PathBuf, font_dir: Option<PathBuf>) -> Self {
        Self {
            template_path,
            fonts: FontSource::new(font_dir),
        }
    }

    pub fn compose(
        &self,
        request: &CertificateRequest,
        body: &CertificateBody,
    ) -> Result<RenderedCertificate, CompositionError> {
        let formatted_date = request.formatted_date()?;
        let background = Background::open(&self.template_path)?;
        let font_family = self.fonts.load()?;
        let bytes = render_certificate(request, body, &formatted_date, &background, font_family)?;
        let filename = certificate_filename(&request.name);
        info!("Composed {} ({} bytes)", filename, bytes.len());
        Ok(RenderedCertificate { filename, bytes })
    }
}
