use dynlights_core::LightSourceRegistry;
use glam::IVec3;

/// Which slice of the world to draw.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Block at the centre of the slice; the slice lies at `center.y`.
    pub center: IVec3,
    /// Half-width of the slice in blocks.
    pub radius: i32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            center: IVec3::new(0, 64, 0),
            radius: 8,
        }
    }
}

/// Renderer-agnostic interface over the dynamic light state.
///
/// Renderers read the registry; they never mutate it.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    fn render(&self, lights: &LightSourceRegistry, view: &RenderView) -> Self::Output;
}

/// Prints a horizontal lightmap slice, one hex digit per block.
///
/// `.` marks blocks without dynamic light.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, lights: &LightSourceRegistry, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Dynamic lights (sources={}) ===\n",
            lights.len()
        ));
        out.push_str(&format!(
            "Slice: y={} center=({}, {}) radius={}\n",
            view.center.y, view.center.x, view.center.z, view.radius
        ));

        for dz in -view.radius..=view.radius {
            for dx in -view.radius..=view.radius {
                let block = view.center + IVec3::new(dx, 0, dz);
                let level = lights.block_light_with_dynamic(block, 0);
                if level == 0 {
                    out.push('.');
                } else {
                    out.push_str(&format!("{level:x}"));
                }
            }
            out.push('\n');
        }

        out
    }
}
