use anyhow::Result;
use support::{run, AppConfig, Application};

const BACKGROUND_COLOR: wgpu::Color = wgpu::Color {
    r: 0.07,
    g: 0.13,
    b: 0.17,
    a: 1.0,
};

#[derive(Default)]
struct App;

impl Application for App {
    fn render(
        &mut self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
    ) -> Result<()> {
        encoder.insert_debug_marker("Render scene");

        // The pass has no draws; ending it records the clear.
        let _renderpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(BACKGROUND_COLOR),
                    store: true,
                },
            })],
            depth_stencil_attachment: None,
        });

        Ok(())
    }
}

fn main() -> Result<()> {
    run(
        App,
        AppConfig {
            title: "Solid Color".to_string(),
            width: 800,
            height: 800,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_color_is_opaque_and_in_range() {
        for channel in [BACKGROUND_COLOR.r, BACKGROUND_COLOR.g, BACKGROUND_COLOR.b] {
            assert!((0.0..=1.0).contains(&channel));
        }
        assert_eq!(BACKGROUND_COLOR.a, 1.0);
    }
}
