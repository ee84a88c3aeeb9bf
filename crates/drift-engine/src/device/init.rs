/// GPU setup parameters.
///
/// The compositor does its work on the CPU, so the defaults ask for nothing
/// beyond a presentable surface.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface so uploaded display-encoded bytes show unchanged.
    pub prefer_srgb: bool,
    pub present_mode: wgpu::PresentMode,
    /// Falls back to the first supported mode when unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    pub power_preference: wgpu::PowerPreference,
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::LowPower,
            desired_maximum_frame_latency: 2,
        }
    }
}
