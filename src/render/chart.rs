//! Draws one frame of the animated line chart with plotters.

use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontStyle};

use crate::error::RenderError;
use crate::render::frame::Frame;
use crate::render::plan::FrameState;

const FONT_FAMILY: &str = "sans-serif";

const FIGURE_BG: RGBColor = RGBColor(0xf4, 0xf9, 0xff);
const PLOT_BG: RGBColor = RGBColor(0xff, 0xff, 0xff);
const AXIS_COLOR: RGBColor = RGBColor(0x33, 0x33, 0x33);
const TEXT_COLOR: RGBColor = RGBColor(0x22, 0x22, 0x22);
const LINE_COLOR: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);
const MARKER_COLOR: RGBColor = RGBColor(0xff, 0x57, 0x22);

const LINE_WIDTH: u32 = 3;
const MARKER_RADIUS: u32 = 5;
const MARKER_OPACITY: f64 = 0.8;

const TITLE_SIZE: u32 = 28;
const LABEL_SIZE: u32 = 20;
const AXIS_DESC_SIZE: u32 = 22;
const COUNTER_SIZE: u32 = 42;
const COUNTER_PADDING: i32 = 16;

/// Fixed text for every frame of one video
#[derive(Debug, Clone)]
pub struct ChartText {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

/// Read `path` and register it with plotters as the sans-serif `style` face
pub fn register_font(path: &Path, style: FontStyle) -> Result<(), RenderError> {
    let font_error = |reason: String| RenderError::Font {
        path: path.display().to_string(),
        reason,
    };
    let bytes = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;

    // plotters keeps registered fonts for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font(FONT_FAMILY, style, bytes)
        .map_err(|_| font_error("invalid TTF data".to_string()))
}

/// Sans-serif font in the registered `style` face
///
/// `FontDesc::style` keeps the already resolved glyphs, so the style goes in here.
fn font(size: u32, style: FontStyle) -> FontDesc<'static> {
    (FONT_FAMILY, size, style).into_font()
}

/// Rasterise a single frame at `width` x `height`
pub fn draw_frame(
    state: &FrameState<'_>,
    text: &ChartText,
    width: u32,
    height: u32,
) -> Result<Frame, RenderError> {
    let frame = state.index;
    let draw_err = |e: &dyn Display| RenderError::Draw {
        frame,
        reason: e.to_string(),
    };

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&FIGURE_BG).map_err(|e| draw_err(&e))?;

        let (x0, x1) = state.x_bounds;
        let (y0, y1) = state.y_bounds;

        let mut chart = ChartBuilder::on(&root)
            .caption(&text.title, font(TITLE_SIZE, FontStyle::Bold).color(&TEXT_COLOR))
            .margin(24)
            .margin_top(48)
            .x_label_area_size(70)
            .y_label_area_size(80)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(|e| draw_err(&e))?;

        chart
            .plotting_area()
            .fill(&PLOT_BG)
            .map_err(|e| draw_err(&e))?;

        let label_style = font(LABEL_SIZE, FontStyle::Normal).color(&AXIS_COLOR);
        let desc_style = font(AXIS_DESC_SIZE, FontStyle::Normal).color(&TEXT_COLOR);
        let year_format = |x: &f64| format!("{}", x.round() as i64);

        chart
            .configure_mesh()
            .disable_mesh()
            .axis_style(AXIS_COLOR.stroke_width(1))
            .label_style(label_style)
            .axis_desc_style(desc_style)
            .x_desc(text.x_label.as_str())
            .y_desc(text.y_label.as_str())
            .x_labels(6)
            .x_label_formatter(&year_format)
            .draw()
            .map_err(|e| draw_err(&e))?;

        chart
            .draw_series(LineSeries::new(
                state.line.iter().map(|p| (p.x, p.y)),
                LINE_COLOR.stroke_width(LINE_WIDTH),
            ))
            .map_err(|e| draw_err(&e))?;

        chart
            .draw_series(state.markers().map(|p| {
                Circle::new(
                    (p.x, p.y),
                    MARKER_RADIUS,
                    MARKER_COLOR.mix(MARKER_OPACITY).filled(),
                )
            }))
            .map_err(|e| draw_err(&e))?;

        // Year counter, centred near the top of the plot area
        let (px, py) = chart.plotting_area().get_pixel_range();
        let center_x = (px.start + px.end) / 2;
        let center_y = py.start + (py.end - py.start) * 8 / 100;

        let counter_style = font(COUNTER_SIZE, FontStyle::Bold)
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let label = state.year_label();
        let (text_w, text_h) = root
            .estimate_text_size(&label, &counter_style)
            .map_err(|e| draw_err(&e))?;
        let half_w = text_w as i32 / 2 + COUNTER_PADDING;
        let half_h = text_h as i32 / 2 + COUNTER_PADDING;

        root.draw(&Rectangle::new(
            [
                (center_x - half_w, center_y - half_h),
                (center_x + half_w, center_y + half_h),
            ],
            BLACK.mix(0.5).filled(),
        ))
        .map_err(|e| draw_err(&e))?;
        root.draw(&Text::new(label, (center_x, center_y), counter_style))
            .map_err(|e| draw_err(&e))?;

        root.present().map_err(|e| draw_err(&e))?;
    }

    Frame::from_rgb_bytes(width, height, buffer).ok_or_else(|| RenderError::Draw {
        frame,
        reason: "frame buffer size mismatch".to_string(),
    })
}
