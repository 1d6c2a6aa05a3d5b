use rand::Rng;

/// Linearly remaps `value` from `[from, to]` into `[new_from, new_to]`.
/// A degenerate source range collapses to `to`.
pub fn map_range(value: f32, from: f32, to: f32, new_from: f32, new_to: f32) -> f32 {
    if to == from {
        return to;
    }
    (value - from) / (to - from) * (new_to - new_from) + new_from
}

pub fn random_in_range<R: Rng>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    rng.gen_range(min..=max)
}

/// Samples uniformly from one of two ranges, picking the range by coin flip.
/// Used to bias particle spawns away from the screen center.
pub fn random_in_two_ranges<R: Rng>(rng: &mut R, one: (f32, f32), two: (f32, f32)) -> f32 {
    if rng.gen::<f32>() < 0.5 {
        random_in_range(rng, one)
    } else {
        random_in_range(rng, two)
    }
}
