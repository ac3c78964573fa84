//! Built-in scene rendered when no scene file is given.

use lumen_core::{MaterialDescription, SceneDescription};

const HALF: f64 = 1.5;
const BACK: f64 = 4.5;
const FRONT: f64 = 0.0;

/// A Cornell-style box in front of the camera: red and green side walls,
/// a ceiling light, a mirror sphere and a diffuse sphere.
pub fn cornell_box() -> SceneDescription {
    let mut scene = SceneDescription::new();

    scene.add_material(MaterialDescription::diffuse("white", [0.73, 0.73, 0.73]));
    scene.add_material(MaterialDescription::diffuse("red", [0.65, 0.05, 0.05]));
    scene.add_material(MaterialDescription::diffuse("green", [0.12, 0.45, 0.15]));
    scene.add_material(MaterialDescription::light("light", [1.0, 0.9, 0.8], 8.0));
    scene.add_material(
        MaterialDescription::diffuse("mirror", [0.9, 0.9, 0.9]).with_specular([0.95, 0.95, 0.95], 1.0, 0.0),
    );
    scene.add_material(
        MaterialDescription::diffuse("glossy", [0.2, 0.3, 0.8]).with_specular([1.0, 1.0, 1.0], 0.1, 0.3),
    );

    let (h, b, f) = (HALF, BACK, FRONT);
    // floor, ceiling, back
    scene.add_quad([[-h, -h, f], [h, -h, f], [h, -h, b], [-h, -h, b]], "white");
    scene.add_quad([[-h, h, f], [-h, h, b], [h, h, b], [h, h, f]], "white");
    scene.add_quad([[-h, -h, b], [h, -h, b], [h, h, b], [-h, h, b]], "white");
    // left, right
    scene.add_quad([[-h, -h, f], [-h, -h, b], [-h, h, b], [-h, h, f]], "red");
    scene.add_quad([[h, -h, f], [h, h, f], [h, h, b], [h, -h, b]], "green");
    // light, just under the ceiling
    let ly = h - 0.01;
    scene.add_quad(
        [[-0.5, ly, 2.5], [0.5, ly, 2.5], [0.5, ly, 3.5], [-0.5, ly, 3.5]],
        "light",
    );

    scene.add_sphere([-0.6, -h + 0.5, 3.3], 0.5, "mirror");
    scene.add_sphere([0.65, -h + 0.4, 2.6], 0.4, "glossy");

    scene
}
