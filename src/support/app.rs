use anyhow::Result;
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use crate::{Renderer, Viewport};

pub trait Application {
    fn initialize(&mut self, _renderer: &mut Renderer) -> Result<()> {
        Ok(())
    }

    fn render(
        &mut self,
        _view: &wgpu::TextureView,
        _encoder: &mut wgpu::CommandEncoder,
    ) -> Result<()> {
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }
}

pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

pub fn run(mut application: impl Application + 'static, config: AppConfig) -> Result<()> {
    env_logger::init();
    log::info!("App started");

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(false)
        .build(&event_loop)?;

    let mut renderer = Renderer::new(
        &window,
        &Viewport {
            width: config.width,
            height: config.height,
            ..Default::default()
        },
    )?;

    application.initialize(&mut renderer)?;

    event_loop.run(move |event, _, control_flow| {
        if let Err(error) = run_loop(&mut application, &mut renderer, &window, &event, control_flow)
        {
            log::error!("Application error: {}", error);
        }
    });
}

fn run_loop(
    application: &mut impl Application,
    renderer: &mut Renderer,
    window: &Window,
    event: &Event<()>,
    control_flow: &mut ControlFlow,
) -> Result<()> {
    match event {
        Event::MainEventsCleared => {
            renderer.render_frame(|view, encoder| application.render(view, encoder))?;
        }
        Event::WindowEvent {
            ref event,
            window_id,
        } if *window_id == window.id() => {
            if should_exit(event) {
                *control_flow = ControlFlow::Exit;
            }
        }
        Event::LoopDestroyed => {
            application.cleanup()?;
        }
        _ => {}
    }

    Ok(())
}

fn should_exit(event: &WindowEvent) -> bool {
    matches!(event, WindowEvent::CloseRequested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_request_exits_loop() {
        assert!(should_exit(&WindowEvent::CloseRequested));
    }

    #[test]
    fn test_other_window_events_keep_running() {
        assert!(!should_exit(&WindowEvent::Focused(true)));
        assert!(!should_exit(&WindowEvent::CursorLeft {
            device_id: unsafe { winit::event::DeviceId::dummy() },
        }));
    }
}
