// Image decoding and half-block rendering for the terminal image window

use crate::error::{ImgSortError, Result};
use image::{DynamicImage, GenericImageView, ImageError, ImageReader, Pixel};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound on the rendered image width in terminal cells
pub const MAX_IMAGE_WIDTH: u32 = 160;
/// Upper bound on the rendered image height in pixels; rows are halved
/// because two pixels share one terminal cell
pub const MAX_IMAGE_HEIGHT: u32 = 100;

/// An image file together with what the window header shows about it
#[derive(Debug, Clone)]
pub struct ImageView {
    pub path: PathBuf,
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// `None` when no decoder exists for the file's format
    pub image: Option<DynamicImage>,
}

impl ImageView {
    pub fn new(path: &Path, image: Option<DynamicImage>) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Self {
            path: path.to_path_buf(),
            name,
            size,
            image,
        }
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| img.dimensions())
    }

    /// Rasterises the image to fit inside `cols` x `rows` terminal cells.
    pub fn to_lines(&self, cols: u16, rows: u16) -> Vec<Line<'static>> {
        if cols == 0 || rows == 0 {
            return Vec::new();
        }

        let Some(image) = self.image.as_ref() else {
            return vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No preview available for this format",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "m, c and s still work",
                    Style::default().fg(Color::Gray),
                )),
            ];
        };

        let (width, height) = image.dimensions();
        let max_width = u32::from(cols).min(MAX_IMAGE_WIDTH);
        let max_height = (u32::from(rows) * 2).min(MAX_IMAGE_HEIGHT);

        let (new_width, new_height) =
            calculate_resize_dimensions(width, height, max_width, max_height);
        if new_width == 0 || new_height == 0 {
            return Vec::new();
        }

        image_to_halfblock_lines(image, new_width, new_height)
    }
}

/// Decodes the image at `path`.
///
/// The format is sniffed from the file contents first and only falls back to
/// the extension, so a PNG saved as `photo.jpg` still decodes. Formats with no
/// decoder (e.g. JPEG 2000) yield [`ImgSortError::UnsupportedFormat`].
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let decoded = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.decode());

    decoded.map_err(|e| match e {
        ImageError::Unsupported(_) => ImgSortError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
        _ => ImgSortError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })
}

/// Calculates new dimensions to fit image within max width and height while preserving aspect ratio
pub fn calculate_resize_dimensions(
    original_width: u32,
    original_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if original_width == 0 || original_height == 0 {
        return (0, 0);
    }

    let width_ratio = max_width as f64 / original_width as f64;
    let height_ratio = max_height as f64 / original_height as f64;

    let ratio = width_ratio.min(height_ratio);

    if ratio >= 1.0 {
        // Never upscale
        (original_width, original_height)
    } else {
        let new_width = ((original_width as f64 * ratio) as u32).max(1);
        let new_height = ((original_height as f64 * ratio) as u32).max(1);
        (new_width, new_height)
    }
}

/// Converts an image to styled lines using half-block characters.
///
/// Each cell is an upper half block (▀) whose foreground is the upper pixel
/// and whose background is the lower pixel, so one line carries two pixel rows.
pub fn image_to_halfblock_lines(img: &DynamicImage, width: u32, height: u32) -> Vec<Line<'static>> {
    let height = if height % 2 == 0 { height } else { height + 1 };

    // Triangle keeps large photos fast to scale
    let img = img.resize_exact(width, height, image::imageops::FilterType::Triangle);
    let img = img.to_rgb8();

    let term_height = height / 2;
    let mut lines = Vec::with_capacity(term_height as usize);

    for y in 0..term_height {
        let upper_y = y * 2;
        let lower_y = upper_y + 1;

        let spans: Vec<Span<'static>> = (0..width)
            .map(|x| {
                let upper = img.get_pixel(x, upper_y).to_rgb();
                let lower = img.get_pixel(x, lower_y).to_rgb();

                let style = Style::default()
                    .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                    .bg(Color::Rgb(lower[0], lower[1], lower[2]));

                Span::styled("▀", style)
            })
            .collect();

        lines.push(Line::from(spans));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    mod resize_tests {
        use super::*;

        #[test]
        fn test_calculate_resize_dimensions_scale_down() {
            let (width, height) = calculate_resize_dimensions(1600, 1200, 80, 40);
            assert!(width <= 80);
            assert!(height <= 40);
            // 4:3 within rounding
            let ratio_diff = (width * 3).abs_diff(height * 4);
            assert!(
                ratio_diff <= 4,
                "Aspect ratio not preserved: {}x{}",
                width,
                height
            );
        }

        #[test]
        fn test_calculate_resize_dimensions_no_upscale() {
            let (width, height) = calculate_resize_dimensions(40, 30, 80, 40);
            assert_eq!(width, 40);
            assert_eq!(height, 30);
        }

        #[test]
        fn test_calculate_resize_dimensions_zero() {
            assert_eq!(calculate_resize_dimensions(0, 0, 80, 40), (0, 0));
        }

        #[test]
        fn test_calculate_resize_dimensions_wide_image() {
            let (width, height) = calculate_resize_dimensions(1600, 400, 80, 40);
            assert_eq!(width, 80);
            assert_eq!(height, 20);
        }

        #[test]
        fn test_calculate_resize_dimensions_tall_image() {
            let (width, height) = calculate_resize_dimensions(400, 1600, 80, 40);
            assert_eq!(width, 10);
            assert_eq!(height, 40);
        }

        #[test]
        fn test_calculate_resize_dimensions_extreme_ratio_keeps_one_pixel() {
            let (width, height) = calculate_resize_dimensions(10_000, 1, 80, 40);
            assert_eq!(width, 80);
            assert_eq!(height, 1);
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_image_to_halfblock_dimensions() {
            let img = DynamicImage::new_rgb8(10, 10);
            let lines = image_to_halfblock_lines(&img, 5, 6);

            assert_eq!(lines.len(), 3);
            for line in &lines {
                assert_eq!(line.spans.len(), 5);
            }
        }

        #[test]
        fn test_image_to_halfblock_odd_height_rounds_up() {
            let img = DynamicImage::new_rgb8(4, 4);
            let lines = image_to_halfblock_lines(&img, 4, 3);

            assert_eq!(lines.len(), 2);
        }

        #[test]
        fn test_halfblock_colors_follow_pixels() {
            let img = image::RgbImage::from_fn(1, 2, |_, y| {
                if y == 0 {
                    image::Rgb([255, 0, 0])
                } else {
                    image::Rgb([0, 0, 255])
                }
            });
            let lines = image_to_halfblock_lines(&DynamicImage::ImageRgb8(img), 1, 2);

            let style = lines[0].spans[0].style;
            match (style.fg, style.bg) {
                (Some(Color::Rgb(fr, _, fb)), Some(Color::Rgb(br, _, bb))) => {
                    assert!(fr > fb, "upper pixel should stay red");
                    assert!(bb > br, "lower pixel should stay blue");
                }
                other => panic!("unexpected colors: {:?}", other),
            }
        }

        #[test]
        fn test_image_view_fits_terminal_area() {
            let view = ImageView {
                path: PathBuf::from("wide.png"),
                name: "wide.png".to_string(),
                size: 0,
                image: Some(DynamicImage::new_rgb8(400, 100)),
            };

            let lines = view.to_lines(40, 30);

            assert_eq!(lines.len(), 5);
            assert!(lines.iter().all(|l| l.spans.len() == 40));
        }

        #[test]
        fn test_image_view_empty_area() {
            let view = ImageView {
                path: PathBuf::from("a.png"),
                name: "a.png".to_string(),
                size: 0,
                image: Some(DynamicImage::new_rgb8(10, 10)),
            };

            assert!(view.to_lines(0, 0).is_empty());
        }

        #[test]
        fn test_image_view_without_decoder_shows_placeholder() {
            let view = ImageView {
                path: PathBuf::from("scan.jp2"),
                name: "scan.jp2".to_string(),
                size: 12,
                image: None,
            };

            let lines = view.to_lines(40, 10);
            let text: String = lines.iter().map(|l| l.to_string()).collect();

            assert!(text.contains("No preview available"));
            assert!(!text.contains('▀'));
            assert_eq!(view.dimensions(), None);
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_load_image_png() {
            let temp_dir = TempDir::new().unwrap();
            let image_path = temp_dir.path().join("test.png");
            let img = image::RgbImage::from_fn(10, 10, |_, _| image::Rgb([255, 0, 0]));
            img.save(&image_path).unwrap();

            let loaded = load_image(&image_path).unwrap();
            assert_eq!(loaded.dimensions(), (10, 10));
        }

        #[test]
        fn test_load_image_jpg() {
            let temp_dir = TempDir::new().unwrap();
            let image_path = temp_dir.path().join("test.jpg");
            let img = image::RgbImage::from_fn(10, 10, |_, _| image::Rgb([0, 0, 255]));
            img.save(&image_path).unwrap();

            let loaded = load_image(&image_path).unwrap();
            assert_eq!(loaded.dimensions(), (10, 10));
        }

        #[test]
        fn test_load_image_nonexistent() {
            let result = load_image(Path::new("/nonexistent/image.png"));
            assert!(matches!(result, Err(ImgSortError::Decode { .. })));
        }

        #[test]
        fn test_load_image_corrupt() {
            let temp_dir = TempDir::new().unwrap();
            let image_path = temp_dir.path().join("broken.png");
            fs::write(&image_path, b"definitely not a png").unwrap();

            let result = load_image(&image_path);
            assert!(matches!(result, Err(ImgSortError::Decode { path, .. }) if path == image_path));
        }

        #[test]
        fn test_load_image_sniffs_content_over_extension() {
            let temp_dir = TempDir::new().unwrap();
            let image_path = temp_dir.path().join("photo.jpg");
            let img = image::RgbImage::from_fn(7, 5, |_, _| image::Rgb([9, 9, 9]));
            img.save_with_format(&image_path, image::ImageFormat::Png)
                .unwrap();

            let loaded = load_image(&image_path).unwrap();
            assert_eq!(loaded.dimensions(), (7, 5));
        }

        #[test]
        fn test_load_image_png_named_jp2() {
            let temp_dir = TempDir::new().unwrap();
            let image_path = temp_dir.path().join("scan.jp2");
            let img = image::RgbImage::from_fn(4, 4, |_, _| image::Rgb([0, 255, 0]));
            img.save_with_format(&image_path, image::ImageFormat::Png)
                .unwrap();

            let loaded = load_image(&image_path).unwrap();
            assert_eq!(loaded.dimensions(), (4, 4));
        }

        #[test]
        fn test_load_image_jpeg2000_is_unsupported() {
            let temp_dir = TempDir::new().unwrap();
            let image_path = temp_dir.path().join("scan.jp2");
            fs::write(&image_path, b"\0\0\0\x0cjP  \r\n\x87\n").unwrap();

            let result = load_image(&image_path);
            assert!(
                matches!(result, Err(ImgSortError::UnsupportedFormat { ref path, .. }) if *path == image_path),
                "unexpected result: {:?}",
                result
            );
        }

        #[test]
        fn test_image_view_new_reads_metadata() {
            let temp_dir = TempDir::new().unwrap();
            let image_path = temp_dir.path().join("photo.png");
            let img = image::RgbImage::from_fn(8, 6, |_, _| image::Rgb([1, 2, 3]));
            img.save(&image_path).unwrap();

            let view = ImageView::new(&image_path, Some(load_image(&image_path).unwrap()));

            assert_eq!(view.name, "photo.png");
            assert_eq!(view.size, fs::metadata(&image_path).unwrap().len());
            assert_eq!(view.dimensions(), Some((8, 6)));
        }
    }
}
