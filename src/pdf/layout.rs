// Fixed certificate layout, in PDF points on a landscape A4 page.
// Vertical positions are text baselines measured from the top edge.
use crate::certificate::{CertificateBody, CertificateRequest};

pub const PAGE_WIDTH: f64 = 841.89;
pub const PAGE_HEIGHT: f64 = 595.28;

const NAME_BASELINE: f64 = 320.0;
const BODY_BASELINE: f64 = 380.0;
const FOOTER_BASELINE: f64 = 495.0;
const FOOTER_INSET: f64 = 180.0;

pub const BODY_MAX_WIDTH: f64 = 600.0;
/// Long names are set smaller until they fit inside the page margins.
pub const NAME_MAX_WIDTH: f64 = PAGE_WIDTH - 2.0 * 72.0;
const MIN_NAME_SIZE: u8 = 18;
pub const LINE_HEIGHT_FACTOR: f64 = 1.5;

const DARK_BLUE: (u8, u8, u8) = (0x24, 0x2a, 0x45);
const BODY_GRAY: (u8, u8, u8) = (0x5f, 0x63, 0x68);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size: u8,
    pub bold: bool,
    pub color: (u8, u8, u8),
}

pub const NAME_STYLE: TextStyle = TextStyle {
    size: 42,
    bold: true,
    color: DARK_BLUE,
};

pub const BODY_STYLE: TextStyle = TextStyle {
    size: 12,
    bold: false,
    color: BODY_GRAY,
};

pub const FOOTER_STYLE: TextStyle = TextStyle {
    size: 14,
    bold: true,
    color: DARK_BLUE,
};

/// One line of text, horizontally centered on `center_x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub center_x: f64,
    pub baseline: f64,
    pub style: TextStyle,
}

/// Font metrics needed for line breaking.
pub trait TextMeasure {
    /// Whether `text` set in `style` is at most `max_width` points wide.
    fn fits(&self, text: &str, style: &TextStyle, max_width: f64) -> bool;
}

/// Greedy word wrap. Words wider than the budget on their own are split
/// between characters so no line ever exceeds `max_width`.
pub fn wrap(
    text: &str,
    style: &TextStyle,
    max_width: f64,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure.fits(&candidate, style, max_width) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if measure.fits(word, style, max_width) {
            current = word.to_string();
            continue;
        }

        for c in word.chars() {
            let mut extended = current.clone();
            extended.push(c);
            if current.is_empty() || measure.fits(&extended, style, max_width) {
                current = extended;
            } else {
                lines.push(std::mem::replace(&mut current, c.to_string()));
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// The name style, shrunk one point at a time until `name` fits the margins.
/// Stops at `MIN_NAME_SIZE`; the renderer warns if it still overflows.
pub fn fit_name_style(name: &str, measure: &dyn TextMeasure) -> TextStyle {
    let mut style = NAME_STYLE;
    while style.size > MIN_NAME_SIZE && !measure.fits(name, &style, NAME_MAX_WIDTH) {
        style.size -= 1;
    }
    style
}

/// Places every piece of text on the page. Pure and deterministic: identical
/// inputs always give identical lines.
pub fn lay_out(
    request: &CertificateRequest,
    body: &CertificateBody,
    formatted_date: &str,
    measure: &dyn TextMeasure,
) -> Vec<PlacedLine> {
    let center = PAGE_WIDTH / 2.0;
    let name = request.display_name();
    let name_style = fit_name_style(&name, measure);
    let mut lines = vec![PlacedLine {
        text: name,
        center_x: center,
        baseline: NAME_BASELINE,
        style: name_style,
    }];

    let line_height = f64::from(BODY_STYLE.size) * LINE_HEIGHT_FACTOR;
    for (i, text) in wrap(body.as_str(), &BODY_STYLE, BODY_MAX_WIDTH, measure)
        .into_iter()
        .enumerate()
    {
        lines.push(PlacedLine {
            text,
            center_x: center,
            baseline: BODY_BASELINE + i as f64 * line_height,
            style: BODY_STYLE,
        });
    }

    lines.push(PlacedLine {
        text: request.manager_name.clone(),
        center_x: FOOTER_INSET,
        baseline: FOOTER_BASELINE,
        style: FOOTER_STYLE,
    });
    lines.push(PlacedLine {
        text: formatted_date.to_string(),
        center_x: PAGE_WIDTH - FOOTER_INSET,
        baseline: FOOTER_BASELINE,
        style: FOOTER_STYLE,
    });

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is half an em wide.
    struct HalfEm;

    impl TextMeasure for HalfEm {
        fn fits(&self, text: &str, style: &TextStyle, max_width: f64) -> bool {
            width(text, style) <= max_width
        }
    }

    fn width(text: &str, style: &TextStyle) -> f64 {
        text.chars().count() as f64 * f64::from(style.size) * 0.5
    }

    fn request() -> CertificateRequest {
        CertificateRequest {
            name: "Ada Lovelace".into(),
            institution_name: "MIT".into(),
            institution_course: "CS101".into(),
            platform_course: "Intro to Algorithms".into(),
            manager_name: "J. Smith".into(),
            completion_date: "2025-12-27".into(),
        }
    }

    const LONG_BODY: &str = "Ada Lovelace has shown remarkable dedication and insight while \
        completing Intro to Algorithms alongside her studies in CS101 at MIT, and we warmly \
        recognise her commitment to rigorous thinking and continued professional growth.";

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap("Certificate of completion.", &BODY_STYLE, BODY_MAX_WIDTH, &HalfEm);
        assert_eq!(lines, vec!["Certificate of completion.".to_string()]);
    }

    #[test]
    fn long_text_wraps_within_budget() {
        let lines = wrap(LONG_BODY, &BODY_STYLE, BODY_MAX_WIDTH, &HalfEm);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(width(line, &BODY_STYLE) <= BODY_MAX_WIDTH, "{line:?} overflows");
        }
        assert_eq!(lines.join(" "), LONG_BODY.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn oversized_word_is_split() {
        let word = "x".repeat(150);
        let lines = wrap(&word, &BODY_STYLE, BODY_MAX_WIDTH, &HalfEm);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 100);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn name_is_upper_cased_and_centered() {
        let body = CertificateBody::fallback();
        let lines = lay_out(&request(), &body, "December 27, 2025", &HalfEm);
        let name = &lines[0];
        assert_eq!(name.text, "ADA LOVELACE");
        assert_eq!(name.center_x, PAGE_WIDTH / 2.0);
        assert_eq!(name.style, NAME_STYLE);
        assert!((name.baseline / PAGE_HEIGHT - 0.54).abs() < 0.01);
    }

    #[test]
    fn body_lines_use_line_spacing() {
        let body = CertificateBody::new(LONG_BODY);
        let lines = lay_out(&request(), &body, "December 27, 2025", &HalfEm);
        let body_lines: Vec<_> = lines.iter().filter(|l| l.style == BODY_STYLE).collect();
        assert!(body_lines.len() > 1);
        assert_eq!(body_lines[1].baseline - body_lines[0].baseline, 18.0);
        assert!((body_lines[0].baseline / PAGE_HEIGHT - 0.64).abs() < 0.01);
    }

    #[test]
    fn footer_places_manager_left_and_date_right() {
        let body = CertificateBody::fallback();
        let lines = lay_out(&request(), &body, "December 27, 2025", &HalfEm);
        let footer: Vec<_> = lines.iter().filter(|l| l.style == FOOTER_STYLE).collect();
        assert_eq!(footer.len(), 2);
        assert_eq!(footer[0].text, "J. Smith");
        assert!(footer[0].center_x < PAGE_WIDTH / 3.0);
        assert_eq!(footer[1].text, "December 27, 2025");
        assert!(footer[1].center_x > PAGE_WIDTH * 2.0 / 3.0);
        assert_eq!(footer[0].baseline, footer[1].baseline);
    }

    #[test]
    fn layout_is_deterministic() {
        let body = CertificateBody::new(LONG_BODY);
        let first = lay_out(&request(), &body, "December 27, 2025", &HalfEm);
        let second = lay_out(&request(), &body, "December 27, 2025", &HalfEm);
        assert_eq!(first, second);
    }

    #[test]
    fn long_name_shrinks_to_page_margins() {
        let mut req = request();
        req.name = "Maria Magdalena Theresia Alexandrina von Hohenberg-Wittelsbach".into();
        let body = CertificateBody::fallback();
        let lines = lay_out(&req, &body, "December 27, 2025", &HalfEm);
        let name = &lines[0];

        assert!(name.style.size < NAME_STYLE.size);
        assert!(name.style.bold);
        assert!(width(&name.text, &name.style) <= NAME_MAX_WIDTH);
        assert!(name.center_x - width(&name.text, &name.style) / 2.0 >= 0.0);
    }

    #[test]
    fn name_shrinking_stops_at_minimum_size() {
        let style = fit_name_style(&"W".repeat(400), &HalfEm);
        assert_eq!(style.size, MIN_NAME_SIZE);
    }
}
