//! Bitmap font demo
//!
//! Draws `Test` and the full printable character set on a grey 320x240
//! canvas. The native build slices the sheet and logs the layout.

use spacegame::font::GlyphSheet;
use spacegame::renderer::Frame;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

fn log_layout(sheet: &GlyphSheet, frame: &Frame) {
    let (w, h) = sheet.cell_size();
    log::info!(
        "{} glyphs of {}x{}, {} quads in a {}x{} view",
        sheet.glyphs().len(),
        w,
        h,
        frame.text.len(),
        frame.view.x,
        frame.view.y
    );
    for quad in &frame.text {
        log::debug!(
            "glyph {:>2} at ({}, {})",
            quad.glyph,
            quad.origin.x,
            quad.origin.y
        );
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use spacegame::Settings;
    use spacegame::consts::{FONT_DEMO_HEIGHT, FONT_DEMO_WIDTH};
    use spacegame::font::GlyphSheet;
    use spacegame::platform::{self, web};
    use spacegame::renderer::{Frame, RenderState, font_demo_frame};

    struct Demo {
        render_state: RenderState,
        frame: Frame,
    }

    pub async fn run() {
        platform::init_logging();
        log::info!("Font demo starting...");

        let settings = Settings::load();

        let (canvas, width, height) =
            match web::canvas("canvas", FONT_DEMO_WIDTH, FONT_DEMO_HEIGHT) {
                Ok(c) => c,
                Err(e) => {
                    log::error!("{}", e);
                    return;
                }
            };

        let sheet = match web::fetch_bytes(&settings.font.path).await {
            Ok(bytes) => {
                GlyphSheet::from_bytes(&bytes, settings.font.cell_width, settings.font.cell_height)
            }
            Err(e) => {
                log::error!("Could not load {}: {}", settings.font.path, e);
                return;
            }
        };
        let sheet = match sheet {
            Ok(sheet) => sheet,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let mut render_state = match web::init_renderer(canvas, width, height).await {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialise WebGPU: {}", e);
                return;
            }
        };
        render_state.upload_glyphs(&sheet);

        let frame = font_demo_frame();
        super::log_layout(&sheet, &frame);

        web::hide_loading();
        request_animation_frame(Rc::new(RefCell::new(Demo {
            render_state,
            frame,
        })));
    }

    fn request_animation_frame(demo: Rc<RefCell<Demo>>) {
        web::request_animation_frame(move |_time| {
            {
                let mut d = demo.borrow_mut();
                let Demo {
                    render_state,
                    frame,
                } = &mut *d;
                render_state.present(frame);
            }
            request_animation_frame(demo);
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_demo::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use spacegame::Settings;
    use spacegame::renderer::font_demo_frame;

    spacegame::platform::init_logging();
    log::info!("Font demo (native) starting...");

    let settings = Settings::load();
    let sheet = match GlyphSheet::open(
        &settings.font.path,
        settings.font.cell_width,
        settings.font.cell_height,
    ) {
        Ok(sheet) => sheet,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    log_layout(&sheet, &font_demo_frame());
}

#[cfg(target_arch = "wasm32")]
fn main() {}
