use image::{GrayImage, Luma};

use crate::builder::QR;

// Renderers read modules through the public accessor and pad the quiet zone
// around the symbol
impl QR {
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = 4 * module_sz;
        let qr_sz = self.width() * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1));
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push(' ');
                    continue;
                }
                let y = ((i - qz_sz) / module_sz) as i16;
                let x = ((j - qz_sz) / module_sz) as i16;
                canvas.push(if self.get_module(x, y) { '█' } else { ' ' });
            }
            canvas.push('\n');
        }

        canvas
    }

    pub fn to_svg(&self, border: usize) -> String {
        let w = self.width();
        let dimension = w + border * 2;

        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        svg.push_str("<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ");
        svg.push_str("\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n");
        svg.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" ");
        svg.push_str(&format!("viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n", dimension));
        svg.push_str("\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n");
        svg.push_str("\t<path d=\"");
        let mut head = true;
        for y in 0..w as i16 {
            for x in 0..w as i16 {
                if !self.get_module(x, y) {
                    continue;
                }
                if head {
                    head = false;
                } else {
                    svg.push(' ');
                }
                svg.push_str(&format!("M{},{}", x as usize + border, y as usize + border));
                svg.push_str("h1v1h-1z");
            }
        }
        svg.push_str("\" fill=\"#000000\"/>\n");
        svg.push_str("</svg>\n");

        svg
    }

    pub fn to_image(&self, scale: u32, border: u32) -> GrayImage {
        debug_assert!(scale > 0, "Scale must be non-zero");

        let qz_sz = border * scale;
        let qr_sz = self.width() as u32 * scale;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::new(total_sz, total_sz);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.put_pixel(j, i, Luma([255]));
                    continue;
                }
                let y = ((i - qz_sz) / scale) as i16;
                let x = ((j - qz_sz) / scale) as i16;
                let pixel = if self.get_module(x, y) { Luma([0]) } else { Luma([255]) };
                canvas.put_pixel(j, i, pixel);
            }
        }

        canvas
    }
}
