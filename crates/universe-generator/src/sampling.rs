use rand::Rng;

/// Uniform draw over `[min, max]`, redrawn until finite.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    loop {
        let v = rng.gen_range(min..=max);
        if v.is_finite() {
            return v;
        }
    }
}

/// Uniform draw rounded to `decimals` places, redrawn until finite.
pub(crate) fn rounded<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    loop {
        let v = (uniform(rng, min, max) * scale).round() / scale;
        if v.is_finite() {
            return v;
        }
    }
}
