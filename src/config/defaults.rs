//! Default values for serde-deserialized config sections.

pub fn n_cells_width() -> usize {
    40
}

pub fn n_cells_height() -> usize {
    30
}

pub fn cell_width() -> f64 {
    30.0
}

pub fn cell_height() -> f64 {
    30.0
}

pub fn frame_margin() -> f64 {
    10.0
}

pub fn angle_epsilon() -> f64 {
    1e-4
}

pub fn max_range() -> f64 {
    1e6
}

pub fn num_rays() -> u32 {
    360
}
