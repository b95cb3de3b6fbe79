//! `SceneRenderer` drawing the particle field as WebGL2 point sprites

use hanami_particles::{ParticleVertex, SceneFrame, SceneRenderer};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

const VERTEX_SHADER: &str = r#"#version 300 es
uniform mat4 u_model_view;
uniform mat4 u_projection;
uniform float u_size;
uniform float u_scale;

in vec3 a_position;
in vec3 a_color;
out vec3 v_color;

void main() {
    vec4 mv = u_model_view * vec4(a_position, 1.0);
    gl_Position = u_projection * mv;
    // Size attenuation: world-space point size scaled by distance
    gl_PointSize = u_size * (u_scale / -mv.z);
    v_color = a_color;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

uniform float u_opacity;

in vec3 v_color;
out vec4 out_color;

void main() {
    out_color = vec4(v_color, u_opacity);
}
"#;

struct Uniforms {
    model_view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    size: Option<WebGlUniformLocation>,
    scale: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
}

/// WebGL2 renderer bound to the particle canvas
pub struct WebGlScene {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
    uniforms: Uniforms,
    /// Half the drawing-buffer height, in device pixels
    scale: f32,
}

impl WebGlScene {
    /// Acquire a WebGL2 context and build the point program.
    /// Fails if WebGL2 is unavailable or the shaders do not compile.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(|_| "WebGL2 context request failed".to_string())?
            .ok_or("WebGL2 not supported")?
            .dyn_into()
            .map_err(|_| "Context is not WebGL2".to_string())?;

        let vert = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let frag = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vert, &frag)?;

        let vao = gl.create_vertex_array().ok_or("Failed to create VAO")?;
        let buffer = gl.create_buffer().ok_or("Failed to create buffer")?;

        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let stride = std::mem::size_of::<ParticleVertex>() as i32;
        for (name, offset) in [("a_position", 0), ("a_color", 12)] {
            let location = gl.get_attrib_location(&program, name);
            if location < 0 {
                return Err(format!("Attribute {name} missing from program"));
            }
            let location = location as u32;
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, 3, GL::FLOAT, false, stride, offset);
        }
        gl.bind_vertex_array(None);

        let uniforms = Uniforms {
            model_view: gl.get_uniform_location(&program, "u_model_view"),
            projection: gl.get_uniform_location(&program, "u_projection"),
            size: gl.get_uniform_location(&program, "u_size"),
            scale: gl.get_uniform_location(&program, "u_scale"),
            opacity: gl.get_uniform_location(&program, "u_opacity"),
        };

        let scale = canvas.height() as f32 / 2.0;
        Ok(Self {
            canvas,
            gl,
            program,
            vao,
            buffer,
            uniforms,
            scale,
        })
    }
}

impl SceneRenderer for WebGlScene {
    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        let buffer_width = (width as f32 * pixel_ratio) as u32;
        let buffer_height = (height as f32 * pixel_ratio) as u32;
        self.canvas.set_width(buffer_width);
        self.canvas.set_height(buffer_height);

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));

        self.gl
            .viewport(0, 0, buffer_width as i32, buffer_height as i32);
        self.scale = buffer_height as f32 / 2.0;
    }

    fn render(&mut self, frame: &SceneFrame<'_>) {
        let gl = &self.gl;
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        if frame.vertices.is_empty() {
            return;
        }

        gl.use_program(Some(&self.program));
        gl.enable(GL::BLEND);
        if frame.material.additive {
            gl.blend_func(GL::SRC_ALPHA, GL::ONE);
        } else {
            gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);
        }
        gl.depth_mask(frame.material.depth_write);

        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffer));
        gl.buffer_data_with_u8_array(
            GL::ARRAY_BUFFER,
            bytemuck::cast_slice(frame.vertices),
            GL::DYNAMIC_DRAW,
        );

        let model_view = frame.camera.view * frame.model;
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.model_view.as_ref(),
            false,
            &model_view.to_cols_array(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.projection.as_ref(),
            false,
            &frame.camera.projection.to_cols_array(),
        );
        gl.uniform1f(self.uniforms.size.as_ref(), frame.material.size);
        gl.uniform1f(self.uniforms.scale.as_ref(), self.scale);
        gl.uniform1f(self.uniforms.opacity.as_ref(), frame.material.opacity);

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::POINTS, 0, frame.vertices.len() as i32);
        gl.bind_vertex_array(None);
    }
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, String> {
    let shader = gl
        .create_shader(kind)
        .ok_or("Unable to create shader object")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        Err(gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "Unknown error creating shader".to_string()))
    }
}

fn link_program(gl: &GL, vert: &WebGlShader, frag: &WebGlShader) -> Result<WebGlProgram, String> {
    let program = gl
        .create_program()
        .ok_or("Unable to create program object")?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "Unknown error creating program".to_string()))
    }
}
