//! Scene snapshots and the renderers that present them.
//!
//! [`Scene::compose`] reads the world once per tick; renderers only ever see
//! the snapshot and keep no game state of their own.

use crate::config::DisplayConfig;
use crate::error::GameError;
use ab_glyph::FontRef;
use game_core::{Aabb, Ball, Config, Paddle, Score};
use glam::Vec2;
use hand_tracker::annotate::label_font;
use hand_tracker::{Frame, Rect};
use hecs::World;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_text_mut, text_size};
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything drawn for one tick
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub paddle: Aabb,
    pub paddle_color: [u8; 3],
    pub ball_center: Vec2,
    pub ball_radius: f32,
    pub score: u32,
    /// Annotated camera frame, shown scaled down in the top-left corner
    pub overlay: Option<Frame>,
}

impl Scene {
    pub fn compose(world: &World, config: &Config, score: &Score, overlay: Option<Frame>) -> Self {
        let (paddle, paddle_color) = world
            .query::<&Paddle>()
            .iter()
            .next()
            .map(|(_e, paddle)| (paddle.rect(), paddle.color.rgb()))
            .unwrap_or_else(|| {
                let paddle = Paddle::new(config);
                (paddle.rect(), paddle.color.rgb())
            });
        let (ball_center, ball_radius) = world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| (ball.pos, ball.radius))
            .unwrap_or((config.field().center(), config.ball_radius));

        Self {
            width: config.screen_width as u32,
            height: config.screen_height as u32,
            paddle,
            paddle_color,
            ball_center,
            ball_radius,
            score: score.points,
            overlay,
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

pub trait Renderer {
    fn present(&mut self, scene: &Scene) -> Result<(), GameError>;

    /// Polled at the top of every tick
    fn quit_requested(&mut self) -> bool;
}

const SCORE_SCALE: f32 = 20.0;
/// Score text centre, measured from the top-right corner
const SCORE_INSET: i32 = 100;
const SCORE_TOP: i32 = 20;

/// Scale `frame` and alpha-blend it over the top-left corner
fn blend_overlay(canvas: &mut Frame, frame: &Frame, scale: f32, opacity: u8) {
    let width = ((frame.width() as f32 * scale) as u32).min(canvas.width());
    let height = ((frame.height() as f32 * scale) as u32).min(canvas.height());
    if width == 0 || height == 0 {
        return;
    }
    let scaled = imageops::resize(frame, width, height, FilterType::Triangle);
    let mut layer = DynamicImage::ImageRgb8(scaled).into_rgba8();
    for p in layer.pixels_mut() {
        p[3] = opacity;
    }

    let under = imageops::crop_imm(canvas, 0, 0, width, height).to_image();
    let mut region = DynamicImage::ImageRgb8(under).into_rgba8();
    imageops::overlay(&mut region, &layer, 0, 0);
    imageops::replace(canvas, &DynamicImage::ImageRgba8(region).into_rgb8(), 0, 0);
}

/// Rasterise `scene` into `canvas`, resizing the canvas to the scene if needed
pub fn draw_scene(canvas: &mut Frame, scene: &Scene, style: &DisplayConfig, font: &FontRef) {
    if canvas.dimensions() != (scene.width, scene.height) {
        *canvas = Frame::new(scene.width, scene.height);
    }
    for p in canvas.pixels_mut() {
        *p = Rgb(style.background);
    }

    let paddle = scene.paddle;
    let (width, height) = (paddle.width().round() as u32, paddle.height().round() as u32);
    if width > 0 && height > 0 {
        let rect = Rect::at(paddle.min.x.round() as i32, paddle.min.y.round() as i32)
            .of_size(width, height);
        draw_filled_rect_mut(canvas, rect, Rgb(scene.paddle_color));
    }
    draw_filled_circle_mut(
        canvas,
        (scene.ball_center.x.round() as i32, scene.ball_center.y.round() as i32),
        scene.ball_radius.round() as i32,
        Rgb(style.ball_color),
    );

    let text = scene.score_text();
    let (text_w, text_h) = text_size(SCORE_SCALE, font, &text);
    draw_text_mut(
        canvas,
        Rgb(style.text_color),
        scene.width as i32 - SCORE_INSET - text_w as i32 / 2,
        SCORE_TOP - text_h as i32 / 2,
        SCORE_SCALE,
        font,
        &text,
    );

    if let Some(frame) = &scene.overlay {
        blend_overlay(canvas, frame, style.overlay_scale, style.overlay_opacity);
    }
}

struct Recorder {
    dir: PathBuf,
    every: u32,
}

/// Software renderer: draws into an in-memory canvas, optionally saving PNGs
pub struct CanvasRenderer {
    style: DisplayConfig,
    font: FontRef<'static>,
    canvas: Frame,
    recorder: Option<Recorder>,
    presented: u64,
}

impl CanvasRenderer {
    pub fn new(style: &DisplayConfig) -> Result<Self, GameError> {
        let recorder = match &style.record_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                info!("Recording every {} frame(s) to {}", style.record_every, dir.display());
                Some(Recorder {
                    dir: dir.clone(),
                    every: style.record_every.max(1),
                })
            }
            None => None,
        };
        Ok(Self {
            style: style.clone(),
            font: label_font()?,
            canvas: Frame::new(0, 0),
            recorder,
            presented: 0,
        })
    }

    /// The last presented image
    pub fn canvas(&self) -> &Frame {
        &self.canvas
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Renderer for CanvasRenderer {
    fn present(&mut self, scene: &Scene) -> Result<(), GameError> {
        draw_scene(&mut self.canvas, scene, &self.style, &self.font);

        if let Some(recorder) = &self.recorder {
            if self.presented % recorder.every as u64 == 0 {
                let path = recorder.dir.join(format!("frame_{:06}.png", self.presented));
                self.canvas
                    .save(&path)
                    .map_err(|e| GameError::Render(format!("{}: {}", path.display(), e)))?;
                debug!("Saved {}", path.display());
            }
        }
        self.presented += 1;
        Ok(())
    }

    fn quit_requested(&mut self) -> bool {
        false
    }
}

#[cfg(feature = "camera")]
pub use highgui_window::HighGuiRenderer;

#[cfg(feature = "camera")]
mod highgui_window {
    use super::{draw_scene, Renderer, Scene};
    use crate::config::DisplayConfig;
    use crate::error::GameError;
    use ab_glyph::FontRef;
    use hand_tracker::annotate::label_font;
    use hand_tracker::Frame;
    use opencv::{
        core::{self, Mat, Scalar},
        highgui, imgproc,
        prelude::*,
    };

    const KEY_ESC: i32 = 27;

    fn render_error(e: opencv::Error) -> GameError {
        GameError::Render(e.to_string())
    }

    /// On-screen window through OpenCV HighGUI; ESC, `q` or closing the window quits
    pub struct HighGuiRenderer {
        style: DisplayConfig,
        font: FontRef<'static>,
        canvas: Frame,
        quit: bool,
    }

    impl HighGuiRenderer {
        pub fn new(style: &DisplayConfig) -> Result<Self, GameError> {
            highgui::named_window(&style.window_title, highgui::WINDOW_AUTOSIZE)
                .map_err(render_error)?;
            Ok(Self {
                style: style.clone(),
                font: label_font()?,
                canvas: Frame::new(0, 0),
                quit: false,
            })
        }

        fn show(&mut self) -> Result<(), opencv::Error> {
            let (width, height) = self.canvas.dimensions();
            let mut rgb = Mat::new_rows_cols_with_default(
                height as i32,
                width as i32,
                core::CV_8UC3,
                Scalar::all(0.0),
            )?;
            rgb.data_bytes_mut()?.copy_from_slice(self.canvas.as_raw());
            let mut bgr = Mat::default();
            imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
            highgui::imshow(&self.style.window_title, &bgr)?;

            let key = highgui::wait_key(1)?;
            let visible =
                highgui::get_window_property(&self.style.window_title, highgui::WND_PROP_VISIBLE)?;
            if key == KEY_ESC || key == 'q' as i32 || visible < 1.0 {
                self.quit = true;
            }
            Ok(())
        }
    }

    impl Renderer for HighGuiRenderer {
        fn present(&mut self, scene: &Scene) -> Result<(), GameError> {
            draw_scene(&mut self.canvas, scene, &self.style, &self.font);
            self.show().map_err(render_error)
        }

        fn quit_requested(&mut self) -> bool {
            self.quit
        }
    }

    impl Drop for HighGuiRenderer {
        fn drop(&mut self) {
            let _ = highgui::destroy_all_windows();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{create_ball, create_paddle, PaddleColor};

    fn world_with(config: &Config) -> World {
        let mut world = World::new();
        create_paddle(&mut world, config);
        create_ball(&mut world, config.field().center(), config);
        world
    }

    #[test]
    fn test_compose_reads_world() {
        let config = Config::new();
        let mut world = world_with(&config);
        for (_e, paddle) in world.query_mut::<&mut Paddle>() {
            paddle.y = 120.0;
            paddle.color = PaddleColor::Blue;
        }
        let mut score = Score::new();
        score.points = 4;

        let scene = Scene::compose(&world, &config, &score, None);
        assert_eq!((scene.width, scene.height), (900, 600));
        assert_eq!(scene.paddle, Aabb::from_rect(870.0, 120.0, 10.0, 100.0));
        assert_eq!(scene.paddle_color, [0, 0, 255]);
        assert_eq!(scene.ball_center, Vec2::new(450.0, 300.0));
        assert_eq!(scene.score_text(), "Score: 4");
    }

    #[test]
    fn test_canvas_draws_paddle_ball_and_score() {
        let config = Config::new();
        let world = world_with(&config);
        let scene = Scene::compose(&world, &config, &Score::new(), None);
        let mut renderer = CanvasRenderer::new(&DisplayConfig::default()).expect("renderer");
        renderer.present(&scene).expect("present");

        let canvas = renderer.canvas();
        assert_eq!(canvas.dimensions(), (900, 600));
        assert_eq!(*canvas.get_pixel(875, 50), Rgb([0, 255, 0]), "Paddle");
        assert_eq!(*canvas.get_pixel(450, 300), Rgb([255, 255, 255]), "Ball");
        assert_eq!(*canvas.get_pixel(450, 310), Rgb([0, 0, 0]));
        let text_pixels = canvas
            .enumerate_pixels()
            .filter(|(x, y, p)| (740..860).contains(x) && *y < 40 && p[0] > 0)
            .count();
        assert!(text_pixels > 0, "Score text near the top-right corner");
        assert_eq!(*canvas.get_pixel(100, 20), Rgb([0, 0, 0]));
        assert!(!renderer.quit_requested());
    }

    #[test]
    fn test_overlay_is_scaled_and_blended() {
        let config = Config::new();
        let world = world_with(&config);
        let camera = Frame::from_pixel(200, 100, Rgb([255, 255, 255]));
        let scene = Scene::compose(&world, &config, &Score::new(), Some(camera));

        let font = label_font().expect("font");
        let mut canvas = Frame::new(0, 0);
        draw_scene(&mut canvas, &scene, &DisplayConfig::default(), &font);

        // 75/255 of white over black
        let blended = |x, y| canvas.get_pixel(x, y)[0];
        assert!((74..=76).contains(&blended(10, 10)));
        assert!((74..=76).contains(&blended(99, 49)));
        assert_eq!(*canvas.get_pixel(100, 50), Rgb([0, 0, 0]), "Overlay is half size");
    }

    #[test]
    fn test_recording_writes_every_nth_frame() {
        let dir = tempfile::tempdir().expect("tempdir");
        let style = DisplayConfig {
            record_dir: Some(dir.path().join("out")),
            record_every: 2,
            ..DisplayConfig::default()
        };
        let config = Config::new();
        let world = world_with(&config);
        let scene = Scene::compose(&world, &config, &Score::new(), None);

        let mut renderer = CanvasRenderer::new(&style).expect("renderer");
        for _ in 0..5 {
            renderer.present(&scene).expect("present");
        }
        assert_eq!(renderer.presented(), 5);
        let saved = std::fs::read_dir(dir.path().join("out")).expect("dir").count();
        assert_eq!(saved, 3);
        assert!(dir.path().join("out/frame_000004.png").exists());
    }
}
