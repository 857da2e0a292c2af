use crate::shaders;
use bytemuck::{Pod, Zeroable};
use duocube_scene::{CUBE_VERTEX_COUNT, FrameState, cube_vertices};
use glam::{Mat3, Mat4, Vec3};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    light_position: [f32; 4],
    light_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    /// Inverse-transpose of the model's upper 3x3, widened back to 4x4 for
    /// uniform layout. Keeps normals correct under non-uniform scale.
    normal: [[f32; 4]; 4],
    color: [f32; 4],
}

impl ObjectUniforms {
    fn new(model: Mat4, color: Vec3) -> Self {
        let normal = Mat4::from_mat3(Mat3::from_mat4(model).inverse().transpose());
        Self {
            model: model.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
        }
    }
}

/// Create a shader module, capturing any validation diagnostic instead of
/// letting it hit the uncaptured-error handler.
///
/// Failure is non-fatal: the diagnostic is logged and the degraded module
/// is returned anyway. Draws through it will render nothing useful, but
/// the process keeps running.
pub fn compile_shader(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> (wgpu::ShaderModule, Option<String>) {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let error = pollster::block_on(device.pop_error_scope()).map(|e| e.to_string());
    if let Some(msg) = &error {
        tracing::error!("shader '{label}' failed validation: {msg}");
    }
    (module, error)
}

/// Per-cube uniform binding: one small buffer and its bind group. Two of
/// these reference the one shared vertex buffer, one per draw, so each
/// cube carries its own model matrix and color.
struct ObjectBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ObjectBinding {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&ObjectUniforms::new(Mat4::IDENTITY, Vec3::ONE)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }
}

fn uniform_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// wgpu renderer for the two cubes.
pub struct CubeRenderer {
    pipeline: wgpu::RenderPipeline,
    frame_uniform_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    objects: [ObjectBinding; 2],
    depth_texture: wgpu::TextureView,
}

impl CubeRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let frame_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_uniform_buffer"),
            contents: bytemuck::bytes_of(&FrameUniforms {
                view: Mat4::IDENTITY.to_cols_array_2d(),
                projection: Mat4::IDENTITY.to_cols_array_2d(),
                light_position: [0.0; 4],
                light_color: [1.0; 4],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_layout = uniform_bind_group_layout(device, "frame_bind_group_layout");
        let object_layout = uniform_bind_group_layout(device, "object_bind_group_layout");

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let (shader, _shader_error) = compile_shader(device, "cube_shader", shaders::CUBE_SHADER);

        // A broken shader surfaces again here; keep the error captured so a
        // degraded pipeline stays non-fatal.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<duocube_scene::Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // The mesh's winding is mixed (inherited geometry); depth
                // testing alone handles occlusion.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        if let Some(e) = pollster::block_on(device.pop_error_scope()) {
            tracing::error!("cube pipeline failed validation: {e}");
        }

        // The one shared geometry buffer, uploaded once.
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let objects = [
            ObjectBinding::new(device, &object_layout, "cube_a_uniforms"),
            ObjectBinding::new(device, &object_layout, "cube_b_uniforms"),
        ];

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            frame_uniform_buffer,
            frame_bind_group,
            vertex_buffer,
            objects,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame: clear, then one draw per cube against the shared
    /// vertex buffer.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &FrameState,
        light: &duocube_scene::PointLight,
    ) {
        queue.write_buffer(
            &self.frame_uniform_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms {
                view: frame.view.to_cols_array_2d(),
                projection: frame.projection.to_cols_array_2d(),
                light_position: light.position.extend(1.0).to_array(),
                light_color: light.color.extend(1.0).to_array(),
            }),
        );

        for (binding, object) in self.objects.iter().zip(frame.objects.iter()) {
            queue.write_buffer(
                &binding.buffer,
                0,
                bytemuck::bytes_of(&ObjectUniforms::new(object.model, object.color)),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.2,
                            g: 0.3,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for binding in &self.objects {
                pass.set_bind_group(1, &binding.bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..CUBE_VERTEX_COUNT, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duocube_scene::Scene;

    /// Headless device for GPU-backed tests. Hosts without any adapter
    /// (bare CI containers) skip these tests rather than fail them.
    fn request_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))?;
        pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default(), None)).ok()
    }

    #[test]
    fn malformed_shader_is_diagnosed_without_aborting() {
        let Some((device, _queue)) = request_test_device() else {
            eprintln!("no GPU adapter available, skipping");
            return;
        };
        let (_module, error) = compile_shader(&device, "bad_shader", "this is not wgsl");
        let msg = error.expect("malformed source must produce a diagnostic");
        assert!(!msg.is_empty());
        // Still here: the failure was non-fatal.
    }

    #[test]
    fn valid_shader_compiles_cleanly() {
        let Some((device, _queue)) = request_test_device() else {
            eprintln!("no GPU adapter available, skipping");
            return;
        };
        let (_module, error) = compile_shader(&device, "cube_shader", shaders::CUBE_SHADER);
        assert_eq!(error, None);
    }

    #[test]
    fn renders_a_frame_offscreen() {
        let Some((device, queue)) = request_test_device() else {
            eprintln!("no GPU adapter available, skipping");
            return;
        };
        let format = wgpu::TextureFormat::Rgba8UnormSrgb;
        let renderer = CubeRenderer::new(&device, format, 800, 600);

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen_target"),
            size: wgpu::Extent3d {
                width: 800,
                height: 600,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = target.create_view(&Default::default());

        let scene = Scene::default();
        renderer.render(&device, &queue, &view, &scene.frame(0.5), &scene.light);
        let _ = device.poll(wgpu::Maintain::Wait);
    }

    #[test]
    fn object_uniforms_embed_model_and_color() {
        let model = Mat4::from_translation(Vec3::new(-1.0, 0.0, 0.0));
        let u = ObjectUniforms::new(model, Vec3::new(1.0, 1.0, 0.2));
        assert_eq!(u.model, model.to_cols_array_2d());
        assert_eq!(u.color, [1.0, 1.0, 0.2, 1.0]);
        // Pure translation: the normal matrix is the identity.
        assert_eq!(u.normal, Mat4::IDENTITY.to_cols_array_2d());
    }
}
