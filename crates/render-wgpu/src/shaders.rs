/// WGSL program for every carousel mesh: flat colour, headlight diffuse shading.
pub const CAROUSEL_SHADER: &str = r#"
struct DrawUniforms {
    projection: mat4x4<f32>,
    model_view: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: DrawUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) eye_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let eye_pos = uniforms.model_view * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.projection * eye_pos;
    out.eye_normal = (uniforms.model_view * vec4<f32>(vertex.normal, 0.0)).xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let len = length(in.eye_normal);
    let n = select(vec3<f32>(0.0, 0.0, 1.0), in.eye_normal / len, len > 0.0);
    // Light travels along the view direction; both faces are lit.
    let diffuse = abs(n.z);
    let lighting = 0.25 + diffuse * 0.75;
    return vec4<f32>(uniforms.color.rgb * lighting, uniforms.color.a);
}
"#;
