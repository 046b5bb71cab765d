use crate::device::Gpu;
use crate::paint::Color;

/// Device handles a renderer needs to create and update its resources.
#[derive(Copy, Clone)]
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    pub fn from_gpu(gpu: &'a Gpu<'_>) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
        }
    }

    /// Stride granularity for dynamic uniform offsets.
    pub fn uniform_offset_alignment(&self) -> u64 {
        (self.device.limits().min_uniform_buffer_offset_alignment as u64).max(1)
    }
}

/// The frame's color attachment and the encoder recording into it.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// Records a pass that only clears the target to `color`.
    pub fn clear(&mut self, color: Color) {
        let _pass = self.begin_pass("tandem clear pass", wgpu::LoadOp::Clear(color.to_wgpu()));
    }

    /// Begins a pass that draws over what the target already holds.
    pub fn load_pass(&mut self, label: &str) -> wgpu::RenderPass<'_> {
        self.begin_pass(label, wgpu::LoadOp::Load)
    }

    fn begin_pass(&mut self, label: &str, load: wgpu::LoadOp<wgpu::Color>) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
