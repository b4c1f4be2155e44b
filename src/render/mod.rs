use parley::{Alignment, AlignmentOptions, Layout, PositionedLayoutItem, StyleProperty};
use vello::{
  kurbo::{Affine, Point, Shape, Stroke, Vec2},
  peniko::{Brush, Color, Fill},
  wgpu::{self, TextureDescriptor},
};

use crate::{
  Plot,
  error::{Error, Result},
};

mod window;

pub(crate) struct Render {
  pub scene:      vello::Scene,
  pub background: Color,
  font:           parley::FontContext,
  layout:         parley::LayoutContext<Brush>,
}

pub(crate) struct GpuHandle {
  pub device: wgpu::Device,
  pub queue:  wgpu::Queue,
  /// Target of the vello renderer, blitted onto the window surface.
  pub view:   wgpu::TextureView,
}

/// Size of the texture the scene is rendered into.
pub(crate) struct RenderConfig {
  pub width:  u32,
  pub height: u32,
}

#[derive(Clone, Copy, PartialEq)]
pub(crate) enum Align {
  Start,
  Center,
  End,
}

pub(crate) struct DrawText<'a> {
  pub text:             &'a str,
  pub size:             f32,
  pub brush:            Brush,
  pub position:         Point,
  pub horizontal_align: Align,
  pub vertical_align:   Align,
}

impl Plot {
  /// Opens a window showing the plot, and blocks until it is closed.
  pub fn show(&self) -> Result<()> { window::show(self) }
}

impl Render {
  pub fn new() -> Self {
    Render {
      scene:      vello::Scene::new(),
      background: Color::WHITE,
      font:       parley::FontContext::new(),
      layout:     parley::LayoutContext::new(),
    }
  }

  pub fn fill(&mut self, shape: &impl Shape, brush: &Brush) {
    self.scene.fill(Fill::NonZero, Affine::IDENTITY, brush, None, shape);
  }

  pub fn stroke(&mut self, shape: &impl Shape, brush: &Brush, stroke: &Stroke) {
    self.scene.stroke(stroke, Affine::IDENTITY, brush, None, shape);
  }

  pub fn layout_text(&mut self, text: &DrawText) -> Layout<Brush> {
    let mut builder = self.layout.ranged_builder(&mut self.font, text.text, 1.0, true);
    builder.push_default(StyleProperty::FontSize(text.size));
    builder.push_default(StyleProperty::Brush(text.brush.clone()));

    let mut layout = builder.build(text.text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, AlignmentOptions::default());
    layout
  }

  pub fn draw_text(&mut self, text: DrawText) {
    let layout = self.layout_text(&text);
    self.draw_text_layout(layout, text);
  }

  pub fn draw_text_layout(&mut self, layout: Layout<Brush>, text: DrawText) {
    let offset = |align: Align, size: f32| match align {
      Align::Start => 0.0,
      Align::Center => f64::from(size) / 2.0,
      Align::End => f64::from(size),
    };
    let origin = text.position
      - Vec2::new(
        offset(text.horizontal_align, layout.width()),
        offset(text.vertical_align, layout.height()),
      );

    for line in layout.lines() {
      for item in line.items() {
        let PositionedLayoutItem::GlyphRun(glyph_run) = item else { continue };

        let run = glyph_run.run();
        let mut x = origin.x as f32 + glyph_run.offset();
        let baseline = (origin.y as f32 + glyph_run.baseline()).round();

        self
          .scene
          .draw_glyphs(run.font())
          .brush(&glyph_run.style().brush)
          .hint(true)
          .transform(Affine::IDENTITY)
          .glyph_transform(
            run.synthesis().skew().map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0)),
          )
          .font_size(run.font_size())
          .normalized_coords(run.normalized_coords())
          .draw(
            Fill::NonZero,
            glyph_run.glyphs().map(|glyph| {
              let gx = x + glyph.x;
              let gy = baseline + glyph.y;
              x += glyph.advance;
              vello::Glyph { id: glyph.id.into(), x: gx, y: gy }
            }),
          );
      }
    }
  }
}

impl GpuHandle {
  pub fn new(config: &RenderConfig, adapter: &wgpu::Adapter) -> Result<Self> {
    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
      label:             None,
      required_features: wgpu::Features::empty(),
      required_limits:   wgpu::Limits::defaults(),
      memory_hints:      wgpu::MemoryHints::MemoryUsage,
      trace:             wgpu::Trace::Off,
    }))
    .map_err(Error::display)?;

    let view = create_texture_view(&device, config);
    Ok(GpuHandle { device, queue, view })
  }

  pub fn resize(&mut self, config: &RenderConfig) {
    self.view = create_texture_view(&self.device, config);
  }
}

fn create_texture_view(device: &wgpu::Device, config: &RenderConfig) -> wgpu::TextureView {
  let texture = device.create_texture(&TextureDescriptor {
    label:           Some("Render Texture"),
    size:            config.extent_3d(),
    mip_level_count: 1,
    sample_count:    1,
    dimension:       wgpu::TextureDimension::D2,
    format:          wgpu::TextureFormat::Rgba8Unorm,
    usage:           wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
    view_formats:    &[],
  });

  texture.create_view(&wgpu::TextureViewDescriptor::default())
}

impl RenderConfig {
  fn extent_3d(&self) -> wgpu::Extent3d {
    wgpu::Extent3d {
      width:                 self.width,
      height:                self.height,
      depth_or_array_layers: 1,
    }
  }
}
