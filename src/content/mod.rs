pub mod cafe;
pub mod controller;
#[cfg(test)]
mod tests;

pub use cafe::{build_cafe, CafeHandles};
pub use controller::spawn_controller_visual;

/// Café color palette, sRGB components in 0..1.
pub mod palette {
    pub const DARK_BROWN: [f32; 3] = [0.290, 0.216, 0.157]; // table wood
    pub const LIGHT_BROWN: [f32; 3] = [0.545, 0.451, 0.333]; // chairs
    pub const BLACK: [f32; 3] = [0.173, 0.173, 0.173];
    pub const LIGHT_GRAY: [f32; 3] = [0.910, 0.910, 0.910]; // character
    pub const DARK_GRAY: [f32; 3] = [0.627, 0.627, 0.627];
    pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
    pub const FLOOR: [f32; 3] = [0.502, 0.502, 0.502];
    pub const LAMP_GOLD: [f32; 3] = [0.812, 0.710, 0.231];
    pub const LAMP_SHADE: [f32; 3] = [1.0, 0.973, 0.906]; // warm white
    pub const PLANT_GREEN: [f32; 3] = [0.208, 0.369, 0.231];
    pub const PLANT_LIGHT_GREEN: [f32; 3] = [0.565, 0.933, 0.565];
    pub const POT_BROWN: [f32; 3] = [0.361, 0.251, 0.200];
    pub const WALL: [f32; 3] = [0.961, 0.961, 0.961];
    pub const FRAME: [f32; 3] = [0.545, 0.271, 0.075];
    pub const ROSE_RED: [f32; 3] = [1.0, 0.012, 0.243];
    pub const ROSE_GREEN: [f32; 3] = [0.133, 0.545, 0.133];
    pub const NAME_TAG_GOLD: [f32; 3] = [1.0, 0.843, 0.0];
    pub const BLONDE_HAIR: [f32; 3] = [1.0, 0.894, 0.710];
    pub const COFFEE: [f32; 3] = [0.290, 0.173, 0.165];
    pub const WATER: [f32; 3] = [0.678, 0.847, 0.902];
    pub const PAGE_EDGE: [f32; 3] = [0.961, 0.961, 0.863]; // beige
    pub const BOOK_COVERS: [[f32; 3]; 10] = [
        [0.545, 0.271, 0.075], // saddle brown
        [0.627, 0.322, 0.176], // sienna
        [0.420, 0.267, 0.137], // dark brown
        [0.502, 0.0, 0.0],     // maroon
        [0.545, 0.0, 0.0],     // dark red
        [0.0, 0.392, 0.0],     // dark green
        [0.098, 0.098, 0.439], // midnight blue
        [0.294, 0.0, 0.510],   // indigo
        [0.400, 0.200, 0.600], // rebecca purple
        [0.545, 0.0, 0.545],   // dark magenta
    ];
}
