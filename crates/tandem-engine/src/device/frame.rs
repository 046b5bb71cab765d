/// A surface texture acquired for one frame, with its view and encoder.
///
/// Finalize with `Gpu::submit`, which presents the texture. Holding it longer
/// blocks acquisition of the next frame.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
