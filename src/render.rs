//! PNG rendering of free-classroom results.
//!
//! Shapes are drawn with `imageproc`, text with an `ab_glyph` font found by
//! [`font::discover`]. Without any font the picture keeps its layout, markers
//! and border but carries no text. Sizes and colors come from [`RenderConfig`].

use crate::config::RenderConfig;
use crate::date;
use crate::error::Result;
use crate::font;
use crate::model::structs::{Building, ClassroomInfo};
use ab_glyph::{FontVec, PxScale};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::io::Cursor;

const BORDER_INSET: u32 = 10;
const BORDER_WIDTH: u32 = 2;
/// Vertical gap between title, list header and first row
const LIST_GAP: u32 = 40;
const FOOTER_BASELINE_OFFSET: u32 = 20;
const SOURCE_NOTE: &str = "数据来源: 东北大学秦皇岛分校教务系统";

/// What the picture is about; drawn in the title and footer.
#[derive(Debug, Clone)]
pub struct RenderMeta {
    pub building: Building,
    pub date: String,
    pub period: u8,
    pub generated_at: String,
}

impl RenderMeta {
    pub fn new(building: Building, date: impl Into<String>, period: u8) -> Self {
        Self {
            building,
            date: date.into(),
            period,
            generated_at: date::now_timestamp(),
        }
    }

    pub fn title(&self) -> String {
        format!(
            "{}空教室查询 - {} 第{}节",
            self.building.label(),
            self.date,
            self.period
        )
    }

    pub fn footer(&self) -> String {
        format!("{SOURCE_NOTE} | 生成时间: {}", self.generated_at)
    }
}

struct Tile<'a> {
    name: &'a str,
    color: Rgba<u8>,
}

/// Grid the room list is laid out on. `y` values are text baselines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListLayout {
    header_y: u32,
    first_row_y: u32,
    columns: u32,
    column_w: u32,
    capacity: usize,
}

impl ListLayout {
    fn new(config: &RenderConfig) -> Self {
        let header_y = config.padding + config.title_font_size as u32 + LIST_GAP;
        let first_row_y = header_y + LIST_GAP;
        let last_row_y = config.height.saturating_sub(config.padding + 60);
        let line_height = config.line_height.max(1);
        let rows = if first_row_y > last_row_y {
            0
        } else {
            (last_row_y - first_row_y) / line_height + 1
        };
        let columns = config.columns.max(1);

        Self {
            header_y,
            first_row_y,
            columns,
            column_w: config.width.saturating_sub(2 * config.padding) / columns,
            capacity: (rows * columns) as usize,
        }
    }

    /// Top-left x and baseline y of slot `index`.
    fn slot(&self, index: usize, config: &RenderConfig) -> (u32, u32) {
        let row = index as u32 / self.columns;
        let col = index as u32 % self.columns;
        (
            config.padding + col * self.column_w,
            self.first_row_y + row * config.line_height,
        )
    }

    /// Baseline of the count line under the last used row.
    fn summary_y(&self, used: usize, config: &RenderConfig) -> u32 {
        let rows = (used as u32).div_ceil(self.columns);
        (self.first_row_y + rows * config.line_height + 20)
            .min(config.height.saturating_sub(config.padding + 40))
    }
}

/// Number of tiles drawn and whether the slot after them holds `...`.
fn plan_list(total: usize, capacity: usize) -> (usize, bool) {
    if total <= capacity {
        (total, false)
    } else {
        (capacity.saturating_sub(1), capacity > 0)
    }
}

fn rect(x: u32, y: u32, w: u32, h: u32) -> Option<Rect> {
    (w > 0 && h > 0).then(|| Rect::at(x as i32, y as i32).of_size(w, h))
}

/// Draws result pictures. Holds the font so it is parsed once.
pub struct Renderer {
    config: RenderConfig,
    font: Option<FontVec>,
}

impl Renderer {
    /// Looks up a font per `config.font_path`, `NEUQ_FONT` or the system.
    pub fn new(config: RenderConfig) -> Result<Self> {
        let font = font::discover(config.font_path.as_deref())?;
        match &font {
            None => tracing::warn!(
                "no font found, images will carry no text; set {} to a CJK font",
                font::FONT_ENV
            ),
            Some(f) if !font::supports_cjk(f) => {
                tracing::warn!("font has no CJK glyphs, Chinese text will not be legible")
            }
            Some(_) => {}
        }
        Ok(Self::with_font(config, font))
    }

    pub fn with_font(config: RenderConfig, font: Option<FontVec>) -> Self {
        Self { config, font }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Text with its baseline at `baseline` and left edge at `x`.
    fn draw_text(&self, img: &mut RgbaImage, x: u32, baseline: u32, size: f32, color: Rgba<u8>, text: &str) {
        if let Some(font) = &self.font {
            let top = baseline as i32 - size as i32;
            draw_text_mut(img, color, x as i32, top, PxScale::from(size), font, text);
        }
    }

    fn draw_centered(&self, img: &mut RgbaImage, baseline: u32, size: f32, color: Rgba<u8>, text: &str) {
        if let Some(font) = &self.font {
            let (w, _) = text_size(PxScale::from(size), font, text);
            let x = img.width().saturating_sub(w) / 2;
            self.draw_text(img, x, baseline, size, color, text);
        }
    }

    fn draw_tiles(&self, img: &mut RgbaImage, tiles: &[Tile<'_>], layout: &ListLayout) -> usize {
        let config = &self.config;
        let (shown, ellipsis) = plan_list(tiles.len(), layout.capacity);
        let marker = (config.font_size * 0.5).max(1.0) as u32;

        for (index, tile) in tiles.iter().take(shown).enumerate() {
            let (x, y) = layout.slot(index, config);
            let marker_top = y.saturating_sub(marker + config.font_size as u32 / 5);
            if let Some(r) = rect(x, marker_top, marker, marker) {
                draw_filled_rect_mut(img, r, tile.color);
            }
            self.draw_text(img, x + marker + 6, y, config.font_size, config.text, tile.name);
        }

        if ellipsis {
            tracing::debug!(shown, total = tiles.len(), "classroom list cut off");
            let (x, y) = layout.slot(shown, config);
            self.draw_text(img, x, y, config.font_size, config.text, "...");
            shown + 1
        } else {
            shown
        }
    }

    fn draw_frame(&self, img: &mut RgbaImage, meta: &RenderMeta) {
        let config = &self.config;
        self.draw_centered(
            img,
            config.padding + config.title_font_size as u32,
            config.title_font_size,
            config.header,
            &meta.title(),
        );

        for i in 0..BORDER_WIDTH {
            let inset = BORDER_INSET + i;
            let w = config.width.saturating_sub(2 * inset);
            let h = config.height.saturating_sub(2 * inset);
            if let Some(r) = rect(inset, inset, w, h) {
                draw_hollow_rect_mut(img, r, config.border);
            }
        }

        self.draw_centered(
            img,
            config.height.saturating_sub(FOOTER_BASELINE_OFFSET),
            config.footer_font_size,
            config.footer,
            &meta.footer(),
        );
    }

    fn render_list(&self, tiles: &[Tile<'_>], summary: String, meta: &RenderMeta) -> RgbaImage {
        let config = &self.config;
        let mut img = RgbaImage::from_pixel(config.width, config.height, config.background);
        let layout = ListLayout::new(config);

        if tiles.is_empty() {
            self.draw_centered(
                &mut img,
                layout.header_y + 50,
                config.font_size + 2.0,
                config.empty_notice,
                "暂无空教室",
            );
        } else {
            self.draw_text(&mut img, config.padding, layout.header_y, config.font_size, config.header, "空教室列表:");
            let used = self.draw_tiles(&mut img, tiles, &layout);
            let y = layout.summary_y(used, config);
            self.draw_text(&mut img, config.padding, y, config.font_size, config.header, &summary);
        }

        self.draw_frame(&mut img, meta);
        img
    }

    /// One tile per free classroom, in result order.
    pub fn render_free_classrooms(&self, names: &[String], meta: &RenderMeta) -> RgbaImage {
        let tiles: Vec<Tile<'_>> = names
            .iter()
            .map(|name| Tile {
                name: name.as_str(),
                color: self.config.free,
            })
            .collect();
        self.render_list(&tiles, format!("共找到 {} 间空教室", names.len()), meta)
    }

    /// Every room of the building, marked free or occupied.
    pub fn render_classroom_info(&self, infos: &[ClassroomInfo], meta: &RenderMeta) -> RgbaImage {
        let tiles: Vec<Tile<'_>> = infos
            .iter()
            .map(|info| Tile {
                name: info.name.as_str(),
                color: if info.is_free {
                    self.config.free
                } else {
                    self.config.occupied
                },
            })
            .collect();
        let free = infos.iter().filter(|i| i.is_free).count();
        let summary = format!("共 {} 间教室，其中 {} 间空闲", infos.len(), free);
        self.render_list(&tiles, summary, meta)
    }
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
