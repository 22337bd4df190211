use crate::scene::Visualization;

/// Per-particle data uploaded to the instance buffer.
///
/// Layout matches the vertex attributes in `particles.wgsl`:
/// location(0) pos, location(1) size, location(2) color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

/// Uniforms for the particle pass.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniforms {
    pub view_proj: [[f32; 4]; 4],
}

/// Fill `out` with world-space instances for the current frame.
///
/// Reuses `out`'s allocation; after the first frame this does not allocate.
pub fn pack_instances(vis: &Visualization, out: &mut Vec<ParticleInstance>) {
    let model = vis.model_matrix();
    let size = vis.point_size();
    let alpha = vis.opacity();
    let field = vis.field();
    out.clear();
    out.extend(
        field
            .positions()
            .iter()
            .zip(field.scales())
            .zip(field.colors())
            .map(|((p, scale), c)| ParticleInstance {
                pos: model.transform_point3(*p).to_array(),
                size: size * scale,
                color: [c[0], c[1], c[2], alpha],
            }),
    );
}
