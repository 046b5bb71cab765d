/// Device and surface preferences, applied once when the window opens.
#[derive(Debug, Clone)]
pub struct GpuInit {
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,

    /// Pick an `*Srgb` surface format when one is offered.
    ///
    /// Off by default: textures and the clear color hold display values and
    /// reach the surface unconverted.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Used only if the surface supports it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub limits: wgpu::Limits,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::default(),
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: Some(wgpu::CompositeAlphaMode::Opaque),
            // Two sprites need nothing beyond what every backend offers.
            limits: wgpu::Limits::downlevel_webgl2_defaults(),
        }
    }
}
