use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use log::debug;

use super::{LabelLayout, PageSize, placements};
use crate::error::RenderError;

const IMAGE_NAME: &str = "Im1";

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Compose a one-page PDF carrying one or more copies of `image`.
///
/// The raster is embedded once as an RGB XObject and referenced by every placement.
/// Transparency is flattened onto `background`.
pub fn render_pdf(
    image: &RgbaImage,
    background: [u8; 3],
    page: PageSize,
    layout: LabelLayout,
) -> Result<Vec<u8>, RenderError> {
    let (width, height) = page.dimensions();

    let mut rgb = Vec::with_capacity((image.width() * image.height() * 3) as usize);
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        for (channel, bg) in [r, g, b].into_iter().zip(background) {
            rgb.push(((channel as u32 * alpha + bg as u32 * (255 - alpha)) / 255) as u8);
        }
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width() as i64,
            "Height" => image.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb,
    );
    image_stream.compress()?;
    let image_id = doc.add_object(image_stream);

    let mut operations = Vec::new();
    for placement in placements(page, layout, image.width()) {
        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![
                real(placement.size),
                real(0.0),
                real(0.0),
                real(placement.size),
                real(placement.x),
                real(placement.y),
            ],
        ));
        operations.push(Operation::new(
            "Do",
            vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())],
        ));
        operations.push(Operation::new("Q", vec![]));
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! {
            IMAGE_NAME => image_id,
        },
    });
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![real(0.0), real(0.0), real(width), real(height)],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    debug!(
        "Composed {} PDF ({}) with {}x{} image, {} bytes",
        page.as_str(),
        layout,
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(bytes)
}
