//! GPU side of the globe scene.
//!
//! Owns the pipelines, uniform buffers, meshes, texture, and depth buffer.
//! Each frame the uniforms are refreshed from the [`GlobeScene`] and the
//! scene is drawn in one pass: globe, atmosphere, stars.

use orbis_render::{
    CameraUniform, DepthBuffer, FrameEncoder, GpuTexture, MeshBuffer, MeshUniform, PointBuffer,
    RenderContext, RenderPassBuilder, ShaderError, ShaderLibrary, SurfaceError, TextureImage,
    UniformBuffer, uniform_bind_group,
};
use orbis_scene::{AtmospherePipeline, GlobePipeline, GlobeScene, SceneLayouts, StarPipeline};
use tracing::info;

/// A mesh transform uniform and its bind group.
struct MeshBinding {
    uniform: UniformBuffer<MeshUniform>,
    bind_group: wgpu::BindGroup,
}

impl MeshBinding {
    fn new(device: &wgpu::Device, label: &str, layout: &wgpu::BindGroupLayout) -> Self {
        let uniform = UniformBuffer::new(
            device,
            &format!("{label}-mesh-uniform"),
            &MeshUniform::new(glam::Mat4::IDENTITY, glam::Mat4::IDENTITY),
        );
        let bind_group =
            uniform_bind_group(device, &format!("{label}-mesh-bind-group"), layout, &uniform);
        Self {
            uniform,
            bind_group,
        }
    }
}

pub struct SceneRenderer {
    shaders: ShaderLibrary,
    globe_pipeline: GlobePipeline,
    atmosphere_pipeline: AtmospherePipeline,
    star_pipeline: StarPipeline,
    camera_uniform: UniformBuffer<CameraUniform>,
    camera_bind_group: wgpu::BindGroup,
    globe: MeshBinding,
    atmosphere: MeshBinding,
    stars: MeshBinding,
    sphere_mesh: MeshBuffer,
    star_points: PointBuffer,
    texture: GpuTexture,
    depth: DepthBuffer,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(
        gpu: &RenderContext,
        scene: &GlobeScene,
        texture: &TextureImage,
        clear_color: [f64; 3],
    ) -> Result<Self, ShaderError> {
        let device = &gpu.device;
        let layouts = SceneLayouts::new(device);
        let mut shaders = ShaderLibrary::new();

        let globe_pipeline = GlobePipeline::new(device, &mut shaders, &layouts, gpu.surface_format)?;
        let atmosphere_pipeline =
            AtmospherePipeline::new(device, &mut shaders, &layouts, gpu.surface_format)?;
        let star_pipeline = StarPipeline::new(device, &mut shaders, &layouts, gpu.surface_format)?;

        let camera_uniform =
            UniformBuffer::new(device, "camera-uniform", &scene.camera.to_uniform());
        let camera_bind_group = uniform_bind_group(
            device,
            "camera-bind-group",
            &layouts.camera,
            &camera_uniform,
        );

        let sphere_mesh = MeshBuffer::new(
            device,
            "sphere",
            &scene.sphere.vertices,
            &scene.sphere.indices,
        );
        let star_points = PointBuffer::new(device, "stars", &scene.stars.vertices());
        let texture = GpuTexture::upload(device, &gpu.queue, "globe-texture", texture, &layouts.texture);

        let (width, height) = gpu.surface_size();
        let depth = DepthBuffer::new(device, width, height);

        info!(
            "Scene renderer ready: {} shader programs, {} sphere indices, {} stars, texture {}x{}",
            shaders.len(),
            sphere_mesh.index_count,
            star_points.vertex_count,
            texture.dimensions.0,
            texture.dimensions.1
        );

        Ok(Self {
            globe: MeshBinding::new(device, "globe", &layouts.mesh),
            atmosphere: MeshBinding::new(device, "atmosphere", &layouts.mesh),
            stars: MeshBinding::new(device, "stars", &layouts.mesh),
            shaders,
            globe_pipeline,
            atmosphere_pipeline,
            star_pipeline,
            camera_uniform,
            camera_bind_group,
            sphere_mesh,
            star_points,
            texture,
            depth,
            clear_color: opaque(clear_color),
        })
    }

    pub fn set_clear_color(&mut self, clear_color: [f64; 3]) {
        self.clear_color = opaque(clear_color);
    }

    /// Follow the surface to a new physical size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.resize(device, width, height);
    }

    /// Write the camera and per-mesh transforms for this frame.
    pub fn update(&self, queue: &wgpu::Queue, scene: &GlobeScene) {
        let view = scene.camera.view_matrix();
        self.camera_uniform.write(queue, &scene.camera.to_uniform());
        self.globe
            .uniform
            .write(queue, &MeshUniform::new(scene.globe_world_matrix(), view));
        self.atmosphere
            .uniform
            .write(queue, &MeshUniform::new(scene.atmosphere_world_matrix(), view));
        self.stars
            .uniform
            .write(queue, &MeshUniform::new(scene.stars_world_matrix(), view));
    }

    /// Draw one frame and present it.
    pub fn render(&self, gpu: &RenderContext) -> Result<(), SurfaceError> {
        let surface_texture = gpu.get_current_texture()?;
        let mut frame = FrameEncoder::new(&gpu.device, surface_texture);

        let builder = RenderPassBuilder::new()
            .clear_color(self.clear_color)
            .depth(DepthBuffer::CLEAR_VALUE)
            .label("globe-scene-pass");
        {
            let mut pass = frame.begin_render_pass(&builder, Some(&self.depth.view));
            pass.set_bind_group(0, &self.camera_bind_group, &[]);

            pass.set_pipeline(&self.globe_pipeline.pipeline);
            pass.set_bind_group(1, &self.globe.bind_group, &[]);
            pass.set_bind_group(2, &self.texture.bind_group, &[]);
            self.sphere_mesh.bind(&mut pass);
            self.sphere_mesh.draw(&mut pass);

            pass.set_pipeline(&self.atmosphere_pipeline.pipeline);
            pass.set_bind_group(1, &self.atmosphere.bind_group, &[]);
            self.sphere_mesh.draw(&mut pass);

            pass.set_pipeline(&self.star_pipeline.pipeline);
            pass.set_bind_group(1, &self.stars.bind_group, &[]);
            self.star_points.draw(&mut pass);
        }

        frame.submit(&gpu.queue);
        Ok(())
    }

    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }
}

fn opaque([r, g, b]: [f64; 3]) -> wgpu::Color {
    wgpu::Color { r, g, b, a: 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_is_opaque() {
        assert_eq!(
            opaque([0.1, 0.2, 0.3]),
            wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0
            }
        );
    }
}
