use anyhow::Result;
use std::{borrow::Cow, mem};
use support::{run, AppConfig, Application, Geometry, Renderer};
use wgpu::{vertex_attr_array, Device, RenderPass, RenderPipeline, TextureFormat, VertexAttribute};

const BACKGROUND_COLOR: wgpu::Color = wgpu::Color {
    r: 0.07,
    g: 0.13,
    b: 0.17,
    a: 1.0,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
}

impl Vertex {
    pub fn vertex_attributes() -> Vec<VertexAttribute> {
        vertex_attr_array![0 => Float32x3].to_vec()
    }

    pub fn description<'a>(attributes: &'a [VertexAttribute]) -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

/// One equilateral triangle with a unit base, centered on the origin,
/// in normalized device coordinates.
fn triangle_vertices() -> [Vertex; 3] {
    let height = 3.0_f32.sqrt() / 2.0;
    [
        Vertex {
            position: [-0.5, -height / 3.0, 0.0],
        },
        Vertex {
            position: [0.5, -height / 3.0, 0.0],
        },
        Vertex {
            position: [0.0, height * 2.0 / 3.0, 0.0],
        },
    ]
}

const SHADER_SOURCE: &str = "
@vertex
fn vertex_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}

@fragment
fn fragment_main() -> @location(0) vec4<f32> {
    return vec4<f32>(0.8, 0.3, 0.02, 1.0);
}
";

struct Scene {
    pub geometry: Geometry,
    pub pipeline: RenderPipeline,
}

impl Scene {
    pub fn new(device: &Device, surface_format: TextureFormat) -> Self {
        let geometry = Geometry::new(device, &triangle_vertices());
        let pipeline = Self::create_pipeline(device, surface_format);

        Self { geometry, pipeline }
    }

    pub fn render<'rpass>(&'rpass self, renderpass: &mut RenderPass<'rpass>) {
        renderpass.set_pipeline(&self.pipeline);
        renderpass.set_vertex_buffer(0, self.geometry.vertex_slice());
        renderpass.draw(0..3, 0..1);
    }

    fn create_pipeline(device: &Device, surface_format: TextureFormat) -> RenderPipeline {
        // The pipeline retains the compiled stages; the module binding
        // is not kept past this function.
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: None,
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(SHADER_SOURCE)),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: None,
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vertex_main",
                buffers: &[Vertex::description(&Vertex::vertex_attributes())],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fragment_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        })
    }
}

#[derive(Default)]
struct App {
    scene: Option<Scene>,
}

impl Application for App {
    fn initialize(&mut self, renderer: &mut Renderer) -> Result<()> {
        self.scene = Some(Scene::new(&renderer.device, renderer.config.format));
        Ok(())
    }

    fn render(
        &mut self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
    ) -> Result<()> {
        encoder.insert_debug_marker("Render scene");

        let mut renderpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
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

        if let Some(scene) = self.scene.as_ref() {
            scene.render(&mut renderpass);
        }

        Ok(())
    }
}

fn main() -> Result<()> {
    run(
        App::default(),
        AppConfig {
            title: "Triangle".to_string(),
            width: 800,
            height: 800,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: &Vertex, b: &Vertex) -> f32 {
        let [ax, ay, az] = a.position;
        let [bx, by, bz] = b.position;
        ((ax - bx).powi(2) + (ay - by).powi(2) + (az - bz).powi(2)).sqrt()
    }

    #[test]
    fn test_triangle_is_equilateral() {
        let [a, b, c] = triangle_vertices();
        let ab = distance(&a, &b);
        let bc = distance(&b, &c);
        let ca = distance(&c, &a);

        assert!((ab - bc).abs() < 1e-6);
        assert!((bc - ca).abs() < 1e-6);
        assert!((ab - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_is_centered() {
        let vertices = triangle_vertices();
        for axis in 0..3 {
            let sum: f32 = vertices.iter().map(|v| v.position[axis]).sum();
            assert!((sum / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_vertices_are_inside_ndc() {
        for vertex in triangle_vertices() {
            for coordinate in vertex.position {
                assert!((-1.0..=1.0).contains(&coordinate));
            }
        }
    }

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        let attributes = Vertex::vertex_attributes();
        let layout = Vertex::description(&attributes);

        assert_eq!(layout.array_stride, 3 * mem::size_of::<f32>() as u64);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].shader_location, 0);
    }

    #[test]
    fn test_shader_validates_with_both_stages() {
        let module = naga::front::wgsl::parse_str(SHADER_SOURCE).expect("shader should parse");

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .expect("shader should validate");

        let stages: Vec<_> = module
            .entry_points
            .iter()
            .map(|entry_point| (entry_point.name.as_str(), entry_point.stage))
            .collect();
        assert_eq!(
            stages,
            vec![
                ("vertex_main", naga::ShaderStage::Vertex),
                ("fragment_main", naga::ShaderStage::Fragment),
            ]
        );
    }
}
