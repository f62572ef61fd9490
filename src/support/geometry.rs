use wgpu::{
    util::{BufferInitDescriptor, DeviceExt},
    Buffer, Device,
};

pub struct Geometry {
    pub vertex_buffer: Buffer,
}

impl Geometry {
    pub fn new<T: bytemuck::Pod>(device: &Device, vertices: &[T]) -> Self {
        Self {
            vertex_buffer: Self::create_vertex_buffer(device, vertices),
        }
    }

    pub fn vertex_slice(&self) -> wgpu::BufferSlice {
        self.vertex_buffer.slice(..)
    }

    fn create_vertex_buffer(device: &Device, vertices: &[impl bytemuck::Pod]) -> Buffer {
        device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        })
    }
}
