use glium::{program, Display, Program};
use glutin::surface::WindowSurface;

use crate::error::ViewerError;

/// Disassembles each mesh in the vertex stage and lights it with one directional,
/// four point and one spot light in the fragment stage.
pub fn car_program(display: &Display<WindowSurface>) -> Result<Program, ViewerError> {
    Ok(program! (display,
        140 => { vertex: "
                    #version 140

                    uniform mat4 projection;
                    uniform mat4 view;
                    uniform mat4 model;

                    uniform float time;
                    uniform float disassembleDistance;

                    uniform vec3 meshCenter;
                    uniform vec3 meshDirection;
                    uniform vec3 meshRotationAxis;
                    uniform float meshRotationAmount;
                    uniform float meshPhaseOffset;
                    uniform float meshTravelScale;

                    in vec3 position;
                    in vec3 normal;
                    in vec2 tex_coords;

                    out vec3 v_position;
                    out vec3 v_normal;
                    out vec2 v_tex_coords;

                    const float PI = 3.14159265;

                    vec3 rotate(vec3 v, vec3 axis, float angle) {
                        float c = cos(angle);
                        float s = sin(angle);
                        return v * c + cross(axis, v) * s + axis * dot(axis, v) * (1.0 - c);
                    }

                    void main() {
                        // 0 assembled, 1 fully apart
                        float cycle = 0.5 - 0.5 * cos(time * 0.6 + meshPhaseOffset * PI);
                        float apart = smoothstep(0.0, 1.0, cycle);

                        float angle = meshRotationAmount * PI * apart;
                        vec3 local = rotate(position - meshCenter, meshRotationAxis, angle);
                        vec3 travel = meshDirection * disassembleDistance * meshTravelScale * apart;
                        vec4 world = model * vec4(meshCenter + local + travel, 1.0);

                        v_position = world.xyz;
                        v_normal = mat3(transpose(inverse(model))) * rotate(normal, meshRotationAxis, angle);
                        v_tex_coords = tex_coords;
                        gl_Position = projection * view * world;
                    }
                ",

        fragment: "
                    #version 140

                    struct DirLight {
                        vec3 direction;
                        vec3 ambient;
                        vec3 diffuse;
                        vec3 specular;
                    };

                    struct PointLight {
                        vec3 position;
                        vec3 ambient;
                        vec3 diffuse;
                        vec3 specular;
                        float constant;
                        float linear;
                        float quadratic;
                    };

                    struct SpotLight {
                        vec3 position;
                        vec3 direction;
                        vec3 ambient;
                        vec3 diffuse;
                        vec3 specular;
                        float constant;
                        float linear;
                        float quadratic;
                        float cutOff;
                        float outerCutOff;
                    };

                    #define POINT_LIGHTS 4

                    in vec3 v_position;
                    in vec3 v_normal;
                    in vec2 v_tex_coords;
                    out vec4 f_color;

                    uniform vec3 viewPos;
                    uniform float ambientStrength;
                    uniform float materialShininess;
                    uniform sampler2D texture_diffuse1;

                    uniform DirLight dirLight;
                    uniform PointLight pointLights[POINT_LIGHTS];
                    uniform SpotLight spotLight;

                    float specularTerm(vec3 lightDir, vec3 normal, vec3 viewDir) {
                        vec3 reflectDir = reflect(-lightDir, normal);
                        return pow(max(dot(viewDir, reflectDir), 0.0), materialShininess);
                    }

                    float attenuation(float distance, float constant, float linear, float quadratic) {
                        return 1.0 / (constant + linear * distance + quadratic * distance * distance);
                    }

                    vec3 dirLighting(DirLight light, vec3 normal, vec3 viewDir, vec3 albedo) {
                        vec3 lightDir = normalize(-light.direction);
                        float diff = max(dot(normal, lightDir), 0.0);
                        return light.ambient * albedo
                            + light.diffuse * diff * albedo
                            + light.specular * specularTerm(lightDir, normal, viewDir);
                    }

                    vec3 pointLighting(PointLight light, vec3 normal, vec3 viewDir, vec3 albedo) {
                        vec3 lightDir = normalize(light.position - v_position);
                        float diff = max(dot(normal, lightDir), 0.0);
                        float att = attenuation(length(light.position - v_position),
                            light.constant, light.linear, light.quadratic);
                        return att * (light.ambient * albedo
                            + light.diffuse * diff * albedo
                            + light.specular * specularTerm(lightDir, normal, viewDir));
                    }

                    vec3 spotLighting(SpotLight light, vec3 normal, vec3 viewDir, vec3 albedo) {
                        vec3 lightDir = normalize(light.position - v_position);
                        float diff = max(dot(normal, lightDir), 0.0);
                        float att = attenuation(length(light.position - v_position),
                            light.constant, light.linear, light.quadratic);
                        float theta = dot(lightDir, normalize(-light.direction));
                        float epsilon = light.cutOff - light.outerCutOff;
                        float intensity = clamp((theta - light.outerCutOff) / epsilon, 0.0, 1.0);
                        return att * (light.ambient * albedo
                            + intensity * (light.diffuse * diff * albedo
                                + light.specular * specularTerm(lightDir, normal, viewDir)));
                    }

                    void main() {
                        vec3 albedo = texture(texture_diffuse1, v_tex_coords).rgb;
                        vec3 normal = normalize(v_normal);
                        vec3 viewDir = normalize(viewPos - v_position);

                        vec3 color = ambientStrength * albedo;
                        color += dirLighting(dirLight, normal, viewDir, albedo);
                        for (int i = 0; i < POINT_LIGHTS; i++) {
                            color += pointLighting(pointLights[i], normal, viewDir, albedo);
                        }
                        color += spotLighting(spotLight, normal, viewDir, albedo);

                        f_color = vec4(color, 1.0);
                    }
                ",
    })?)
}

/// Flat-colored marker cubes for the point lights.
pub fn lamp_program(display: &Display<WindowSurface>) -> Result<Program, ViewerError> {
    Ok(program! (display,
        140 => { vertex: "
                    #version 140

                    uniform mat4 projection;
                    uniform mat4 view;
                    uniform mat4 model;

                    in vec3 position;

                    void main() {
                        gl_Position = projection * view * model * vec4(position, 1.0);
                    }
                ",

        fragment: "
                    #version 140

                    uniform vec3 lightColor;
                    out vec4 f_color;

                    void main() {
                        f_color = vec4(lightColor, 1.0);
                    }
                ",
    })?)
}

pub struct Programs {
    pub car: Program,
    pub lamp: Program,
}

impl Programs {
    pub fn new(display: &Display<WindowSurface>) -> Result<Self, ViewerError> {
        Ok(Self {
            car: car_program(display)?,
            lamp: lamp_program(display)?,
        })
    }
}
