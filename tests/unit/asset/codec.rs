use std::io::Cursor;

use super::*;

fn png_resource(width: u32, height: u32) -> MediaResource {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    MediaResource::new("img.png", MediaType::new("image/png"), bytes)
}

#[test]
fn decodes_valid_image_bytes() {
    let img = decode_image(&png_resource(3, 2)).unwrap();
    assert_eq!((img.width(), img.height()), (3, 2));
}

#[test]
fn decode_failure_names_the_resource() {
    let junk = MediaResource::new("broken.png", MediaType::new("image/png"), b"junk".to_vec());
    let err = decode_image(&junk).unwrap_err();
    assert!(err.to_string().contains("broken.png"));
}

#[test]
fn encodes_in_the_source_format() {
    let img = decode_image(&png_resource(2, 2)).unwrap();
    let encoded = encode_image(&img, &MediaType::new("image/png")).unwrap();
    assert_eq!(encoded.media_type.as_str(), "image/png");
    assert_eq!(encoded.extension, "png");
    assert!(image::load_from_memory(&encoded.bytes).is_ok());
}

#[test]
fn jpeg_output_is_flattened_to_rgb() {
    let img = decode_image(&png_resource(2, 2)).unwrap();
    let encoded = encode_image(&img, &MediaType::new("image/jpeg")).unwrap();
    assert_eq!(encoded.media_type.as_str(), "image/jpeg");
    let decoded = image::load_from_memory(&encoded.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (2, 2));
}

#[test]
fn unknown_source_format_falls_back_to_png() {
    let img = decode_image(&png_resource(2, 2)).unwrap();
    let encoded = encode_image(&img, &MediaType::new("application/octet-stream")).unwrap();
    assert_eq!(encoded.media_type.as_str(), "image/png");
    assert_eq!(encoded.extension, "png");
}
