// File: crates/wind-chart-window/src/main.rs
// Summary: Windowed host: feeds winit pointer/touch/wheel events into a ChartInstance, wakes for its
// timers, and blits the CPU raster into a softbuffer surface.

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wind_chart_core::{
    parse_envelope, render_to_rgba8, theme, ChartConfig, ChartInstance, ChartLayout, MarkKind, Point, PointerHub,
    PointerKind, Rect, RenderOptions,
};
use winit::event::{
    ElementState, Event, KeyboardInput, MouseButton, MouseScrollDelta, StartCause, TouchPhase, VirtualKeyCode,
    WindowEvent,
};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Pixels scrolled per wheel line.
const LINE_SCROLL_PX: f32 = 40.0;

#[derive(Parser, Debug)]
#[command(name = "wind-chart-window")]
#[command(about = "Interactive wind chart window")]
struct Args {
    /// JSON payload with a `data` array.
    input: PathBuf,

    /// Chart kind: bar, line, scatter or arrow.
    #[arg(short, long, default_value = "line")]
    kind: MarkKind,

    /// Theme name (light, dark).
    #[arg(long, default_value = "light")]
    theme: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let kind = args.kind;
    let body = std::fs::read_to_string(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let rows = parse_envelope(&body).with_context(|| format!("parsing {}", args.input.display()))?;
    info!(kind = kind.name(), rows = rows.len(), "payload loaded");

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(format!("Wind chart ({})", kind.name()))
        .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 480.0))
        .build(&event_loop)
        .context("build window")?;
    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let hub = PointerHub::new();
    let mut chart = ChartInstance::new(ChartConfig::for_kind(kind));
    chart.mount(&hub);
    let opts = RenderOptions { theme: theme::find(&args.theme), ..RenderOptions::default() };

    let mut size = window.inner_size();
    let now = Instant::now();
    chart.begin_loading();
    chart.set_layout(layout_for(size.width as f32, 0.0), now);
    let dropped = chart.set_rows(&rows, now);
    if dropped > 0 {
        warn!(dropped, "rows dropped by the adapter");
    }
    chart.set_layout(layout_for(size.width as f32, chart.scene().axis.height), now);
    let mut cursor = Point::default();

    event_loop.run(move |event, _, cf| {
        let now = Instant::now();
        match event {
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                if chart.tick(now) {
                    window.request_redraw();
                }
            }
            Event::WindowEvent { event, .. } => {
                let dirty = match event {
                    WindowEvent::CloseRequested => {
                        chart.teardown();
                        *cf = ControlFlow::Exit;
                        return;
                    }
                    WindowEvent::Resized(new_size) => {
                        size = new_size;
                        chart.set_layout(layout_for(size.width as f32, chart.scene().axis.height), now);
                        true
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = Point::new(position.x as f32, position.y as f32);
                        chart.pointer_move(cursor, PointerKind::Mouse, now);
                        true
                    }
                    WindowEvent::CursorLeft { .. } => {
                        chart.pointer_leave();
                        true
                    }
                    WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                        press(&hub, &mut chart, cursor);
                        true
                    }
                    WindowEvent::Touch(touch) => {
                        let at = Point::new(touch.location.x as f32, touch.location.y as f32);
                        match touch.phase {
                            TouchPhase::Started => {
                                press(&hub, &mut chart, at);
                                chart.pointer_move(at, PointerKind::Touch, now);
                            }
                            TouchPhase::Moved => chart.pointer_move(at, PointerKind::Touch, now),
                            TouchPhase::Ended | TouchPhase::Cancelled => chart.touch_end(),
                        }
                        true
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let dx = match delta {
                            MouseScrollDelta::LineDelta(x, y) => -(if x != 0.0 { x } else { y }) * LINE_SCROLL_PX,
                            MouseScrollDelta::PixelDelta(p) => -(if p.x != 0.0 { p.x } else { p.y }) as f32,
                        };
                        chart.scroll_by(dx);
                        true
                    }
                    WindowEvent::KeyboardInput {
                        input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                        ..
                    } => match key {
                        VirtualKeyCode::Home => {
                            chart.navigate();
                            true
                        }
                        VirtualKeyCode::Left => {
                            chart.scroll_by(-LINE_SCROLL_PX);
                            true
                        }
                        VirtualKeyCode::Right => {
                            chart.scroll_by(LINE_SCROLL_PX);
                            true
                        }
                        VirtualKeyCode::Escape => {
                            chart.pointer_leave();
                            true
                        }
                        _ => false,
                    },
                    _ => false,
                };
                if dirty {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(e) = present(&mut surface, &chart, &opts, size.width, size.height) {
                    error!(error = %e, "frame failed");
                }
            }
            _ => {}
        }
        *cf = match chart.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    });
}

/// The chart container spans the window width at the top-left corner.
fn layout_for(window_width: f32, height: f32) -> ChartLayout {
    ChartLayout::new(Rect::from_ltwh(0.0, 0.0, window_width, height), window_width)
}

/// A press reaches every mounted chart through the hub, then this chart's own handler.
fn press(hub: &PointerHub, chart: &mut ChartInstance, at: Point) {
    let notified = hub.dispatch_pointer_down(at);
    debug!(x = at.x, y = at.y, notified, "pointer down");
    chart.pointer_down(at);
}

fn present(
    surface: &mut softbuffer::Surface,
    chart: &ChartInstance,
    opts: &RenderOptions,
    width: u32,
    height: u32,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow!("resize surface: {e}"))?;
    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("map buffer: {e}"))?;

    let bg = opts.theme.background;
    let bg = (u32::from(bg.r()) << 16) | (u32::from(bg.g()) << 8) | u32::from(bg.b());
    frame.fill(bg);

    if chart.layout().measured_width().is_some() {
        let (rgba, cw, ch, stride) = render_to_rgba8(chart, opts)?;
        let cols = (cw.max(0) as usize).min(width as usize);
        let rows = (ch.max(0) as usize).min(height as usize);
        for y in 0..rows {
            let src = &rgba[y * stride..y * stride + cols * 4];
            let dst = &mut frame[y * width as usize..y * width as usize + cols];
            for (out, px) in dst.iter_mut().zip(src.chunks_exact(4)) {
                *out = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
            }
        }
    }
    frame.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_parsed_by_clap() {
        let args = Args::try_parse_from(["wind-chart-window", "wind.json", "-k", "arrow"]).unwrap();
        assert_eq!(args.kind, MarkKind::Arrow);
        assert!(Args::try_parse_from(["wind-chart-window", "wind.json", "-k", "pie"]).is_err());
    }
}
