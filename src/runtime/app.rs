use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use softbuffer::{Context, Surface};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use fieldline::input::{field_key_from_winit, FieldKey, Modifiers, DELETE};
use fieldline::view::{FontFace, Frame, FrameCanvas, GlyphCache, TextPainter};

use super::page::{Page, PageAction, STEPS_PER_SECOND};

/// Steps run at most per wakeup; anything beyond is dropped
const MAX_CATCH_UP_STEPS: u32 = 10;

pub struct App {
    page: Page,
    font: FontFace,
    glyph_cache: GlyphCache,
    window: Option<Rc<Window>>,
    surface: Option<Surface<Rc<Window>, Rc<Window>>>,
    size: (u32, u32),
    modifiers: ModifiersState,
    mouse_position: Option<(f64, f64)>,
    last_step: Instant,
}

impl App {
    pub fn new(page: Page, font: FontFace) -> Self {
        Self {
            page,
            font,
            glyph_cache: GlyphCache::new(),
            window: None,
            surface: None,
            size: (1, 1),
            modifiers: ModifiersState::default(),
            mouse_position: None,
            last_step: Instant::now(),
        }
    }

    fn step_duration() -> Duration {
        Duration::from_secs(1) / STEPS_PER_SECOND
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("fieldline")
            .with_inner_size(LogicalSize::new(720, 320));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create graphics context: {}", e))?;
        let surface = Surface::new(&context, Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create surface: {}", e))?;

        self.window = Some(window.clone());
        self.surface = Some(surface);

        let size = window.inner_size();
        self.resize(size.width, size.height)?;
        window.request_redraw();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };

        if let Some(surface) = self.surface.as_mut() {
            surface
                .resize(width, height)
                .map_err(|e| anyhow!("Failed to resize surface: {}", e))?;
        }

        self.size = (width.get(), height.get());
        self.page.layout(width.get() as f32, height.get() as f32);
        tracing::debug!(width = width.get(), height = height.get(), "resized");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let Self {
            page,
            font,
            glyph_cache,
            surface,
            size,
            ..
        } = self;
        let Some(surface) = surface.as_mut() else {
            return Ok(());
        };

        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| anyhow!("Failed to get surface buffer: {}", e))?;

        {
            let mut frame = Frame::new(&mut buffer[..], size.0 as usize, size.1 as usize);
            frame.clear(page.theme().background.to_argb_u32());
            let mut canvas = FrameCanvas::new(&mut frame, TextPainter::new(font, glyph_cache));
            page.draw(font, &mut canvas);
        }

        buffer
            .present()
            .map_err(|e| anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Result<PageAction> {
        let action = match event {
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height)?;
                PageAction::Redraw
            }
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                PageAction::None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let Some(key) = field_key_from_winit(&event.logical_key) else {
                    return Ok(PageAction::None);
                };
                match event.state {
                    // Delete and arrows repeat on the simulation clock
                    ElementState::Pressed
                        if event.repeat
                            && matches!(key, FieldKey::Special(_) | FieldKey::Char(DELETE)) =>
                    {
                        PageAction::None
                    }
                    ElementState::Pressed => self
                        .page
                        .key_down(key, Modifiers::from_winit(self.modifiers)),
                    ElementState::Released => {
                        self.page.key_up(key);
                        PageAction::None
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some((position.x, position.y));
                PageAction::None
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => match self.mouse_position {
                Some((x, y)) if self.page.pointer_up(&self.font, x as f32, y as f32) => {
                    PageAction::Redraw
                }
                _ => PageAction::None,
            },
            WindowEvent::RedrawRequested => {
                self.render()?;
                PageAction::None
            }
            _ => PageAction::None,
        };
        Ok(action)
    }

    /// Run the simulation steps that are due
    fn run_due_steps(&mut self) -> bool {
        let step = Self::step_duration();
        let mut due = 0;
        while self.last_step.elapsed() >= step && due < MAX_CATCH_UP_STEPS {
            self.last_step += step;
            due += 1;
        }
        if self.last_step.elapsed() >= step {
            tracing::debug!("simulation fell behind, dropping steps");
            self.last_step = Instant::now();
        }

        let mut redraw = false;
        for _ in 0..due {
            redraw |= self.page.step();
        }
        redraw
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to open window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        match self.handle_event(&event) {
            Ok(PageAction::Exit) => event_loop.exit(),
            Ok(PageAction::Redraw) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Ok(PageAction::None) => {}
            Err(e) => tracing::warn!("Event handling failed: {:#}", e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.run_due_steps() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(
            self.last_step + Self::step_duration(),
        ));
    }
}
