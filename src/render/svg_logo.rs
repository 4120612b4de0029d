//! SVG logos: scrubbing uploads before they are stored, and rasterizing them for PNG/PDF.

use image::{Rgba, RgbaImage};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use resvg::{tiny_skia, usvg};

use crate::error::{RenderError, ResourceError};

pub const SVG_MIME: &str = "image/svg+xml";
/// Longest edge an SVG logo is rasterized at before it is scaled into the logo box.
pub const SVG_RASTER_EDGE: f32 = 512.0;

/// UTF-8 text that starts with markup and mentions an `<svg` element.
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with('<') && text.contains("<svg")
}

fn is_script(element: &BytesStart) -> bool {
    element.local_name().as_ref().eq_ignore_ascii_case(b"script")
}

fn is_svg(element: &BytesStart) -> bool {
    element.local_name().as_ref().eq_ignore_ascii_case(b"svg")
}

fn is_event_handler(key: &[u8]) -> bool {
    key.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"on"))
}

fn is_script_href(key: &[u8], value: &[u8]) -> bool {
    let is_href = key.eq_ignore_ascii_case(b"href") || key.eq_ignore_ascii_case(b"xlink:href");
    is_href
        && value
            .trim_ascii_start()
            .get(..11)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case(b"javascript:"))
}

fn xml_error(err: impl std::fmt::Display) -> ResourceError {
    ResourceError::InvalidSvg(err.to_string())
}

/// Copy of `element` without event handler attributes and `javascript:` links.
fn clean_element(element: &BytesStart) -> Result<BytesStart<'static>, ResourceError> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    let mut clean = BytesStart::new(name);
    for attr in element.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = attr.key.as_ref();
        if is_event_handler(key) || is_script_href(key, &attr.value) {
            continue;
        }
        clean.push_attribute((key, attr.value.as_ref()));
    }
    Ok(clean)
}

/// Re-serialize an uploaded SVG with `<script>` elements, `on*` attributes and
/// `javascript:` hrefs removed. Doctypes, processing instructions and comments are dropped.
/// The document element must be `<svg>`.
pub fn sanitize_svg(bytes: &[u8]) -> Result<String, ResourceError> {
    let text = std::str::from_utf8(bytes).map_err(xml_error)?;
    let mut reader = Reader::from_str(text.trim_start_matches('\u{feff}'));
    let mut writer = Writer::new(Vec::new());

    let mut depth = 0usize;
    let mut skip_depth = 0usize;
    let mut saw_root = false;

    loop {
        let event = reader.read_event().map_err(xml_error)?;
        let out = match event {
            Event::Eof => break,
            Event::Start(e) => {
                if skip_depth > 0 || is_script(&e) {
                    skip_depth += 1;
                    continue;
                }
                if depth == 0 {
                    if !is_svg(&e) {
                        return Err(ResourceError::UnsupportedType);
                    }
                    saw_root = true;
                }
                depth += 1;
                Event::Start(clean_element(&e)?)
            }
            Event::End(e) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                    continue;
                }
                depth = depth.saturating_sub(1);
                Event::End(e)
            }
            Event::Empty(e) => {
                if skip_depth > 0 || is_script(&e) {
                    continue;
                }
                if depth == 0 {
                    if !is_svg(&e) {
                        return Err(ResourceError::UnsupportedType);
                    }
                    saw_root = true;
                }
                Event::Empty(clean_element(&e)?)
            }
            Event::Decl(_) | Event::DocType(_) | Event::PI(_) | Event::Comment(_) => continue,
            _ if skip_depth > 0 => continue,
            other => other,
        };
        writer.write_event(out).map_err(xml_error)?;
    }

    if !saw_root {
        return Err(ResourceError::UnsupportedType);
    }
    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

fn parse_tree(bytes: &[u8]) -> Result<usvg::Tree, usvg::Error> {
    usvg::Tree::from_data(bytes, &usvg::Options::default())
}

/// The cleaned SVG must still be something we can draw.
pub fn check_svg(bytes: &[u8]) -> Result<(), ResourceError> {
    parse_tree(bytes).map(|_| ()).map_err(xml_error)
}

/// Draw an SVG logo into a raster whose longest edge is [`SVG_RASTER_EDGE`].
pub fn rasterize_svg(bytes: &[u8]) -> Result<RgbaImage, RenderError> {
    let tree = parse_tree(bytes).map_err(|e| RenderError::Logo(e.to_string()))?;
    let size = tree.size();
    let scale = SVG_RASTER_EDGE / size.width().max(size.height());
    let width = (size.width() * scale).round().max(1.0) as u32;
    let height = (size.height() * scale).round().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| RenderError::Logo("SVG logo has no drawable area".to_string()))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied alpha
    let mut image = RgbaImage::new(width, height);
    for (src, dst) in pixmap.pixels().iter().zip(image.pixels_mut()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    Ok(image)
}
