/// WGSL shader for the two Phong-lit cubes.
///
/// The lighting math mirrors `duocube_scene::shade`: ambient 0.1 x light
/// color, diffuse max(0, N.L) x light color, both modulated by the object
/// color. The normal matrix (inverse-transpose of the model's upper 3x3)
/// is computed on the CPU and uploaded per object, since WGSL has no
/// matrix inverse.
pub const CUBE_SHADER: &str = r#"
struct FrameUniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_position: vec4<f32>,
    light_color: vec4<f32>,
};

struct ObjectUniforms {
    model: mat4x4<f32>,
    normal: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: FrameUniforms;

@group(1) @binding(0)
var<uniform> object: ObjectUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = object.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = frame.projection * frame.view * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = (object.normal * vec4<f32>(vertex.normal, 0.0)).xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let ambient = 0.1 * frame.light_color.rgb;

    let n = normalize(in.world_normal);
    let light_dir = normalize(frame.light_position.xyz - in.world_pos);
    let diffuse = max(dot(n, light_dir), 0.0) * frame.light_color.rgb;

    let result = (ambient + diffuse) * object.color.rgb;
    return vec4<f32>(result, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_declares_both_entry_points() {
        assert!(CUBE_SHADER.contains("fn vs_main"));
        assert!(CUBE_SHADER.contains("fn fs_main"));
    }

    #[test]
    fn ambient_strength_matches_the_reference() {
        let needle = format!("{} * frame.light_color.rgb", duocube_scene::AMBIENT_STRENGTH);
        assert!(CUBE_SHADER.contains(&needle));
    }
}
