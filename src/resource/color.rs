//! Dual-representation color state shared by tintable resource types

/// Synchronized pair of color representations: premultiplied RGBA and
/// base-color-plus-opacity.
///
/// Setting either representation recomputes the other so that
/// `rgba == base * opacity` component-wise. The reverse mapping is
/// ill-defined for additive-blend colors (alpha zero with non-zero RGB);
/// in that degenerate case the base color degrades to all-zero instead of
/// dividing by zero. That information loss is a documented limitation
/// carried over from the reference behavior, not something this type tries
/// to repair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    rgba: [f32; 4],
    base: [f32; 3],
    opacity: f32,
}

impl ColorState {
    /// Opaque white.
    pub fn new() -> Self {
        Self {
            rgba: [1.0, 1.0, 1.0, 1.0],
            base: [1.0, 1.0, 1.0],
            opacity: 1.0,
        }
    }

    pub fn rgba(&self) -> [f32; 4] {
        self.rgba
    }

    pub fn base_color(&self) -> [f32; 3] {
        self.base
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Sets the premultiplied representation and derives base + opacity.
    pub fn set_rgba(&mut self, rgba: [f32; 4]) {
        self.rgba = rgba;
        self.opacity = rgba[3];
        self.base = if rgba[3] != 0.0 {
            [rgba[0] / rgba[3], rgba[1] / rgba[3], rgba[2] / rgba[3]]
        } else {
            // Additive-blend color: the base is unrecoverable.
            [0.0, 0.0, 0.0]
        };
    }

    /// Sets the base color, keeping opacity, and re-premultiplies.
    pub fn set_base_color(&mut self, base: [f32; 3]) {
        self.base = base;
        self.premultiply();
    }

    /// Sets the opacity, keeping the base color, and re-premultiplies.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.premultiply();
    }

    fn premultiply(&mut self) {
        self.rgba = [
            self.base[0] * self.opacity,
            self.base[1] * self.opacity,
            self.base[2] * self.opacity,
            self.opacity,
        ];
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability for types carrying a [`ColorState`], with a post-update hook.
///
/// Concrete types compose a `ColorState` value and expose it through
/// [`color_state`](Self::color_state)/[`color_state_mut`](Self::color_state_mut);
/// the provided setters re-establish the premultiplication invariant and
/// then invoke [`color_changed`](Self::color_changed), which concrete types
/// override to propagate the new color to their native handle.
pub trait Colorable {
    fn color_state(&self) -> &ColorState;
    fn color_state_mut(&mut self) -> &mut ColorState;

    /// Invoked after every setter, once the representations are back in
    /// sync. Default: no-op.
    fn color_changed(&mut self) {
        // Default: no-op
    }

    fn rgba(&self) -> [f32; 4] {
        self.color_state().rgba()
    }

    fn base_color(&self) -> [f32; 3] {
        self.color_state().base_color()
    }

    fn opacity(&self) -> f32 {
        self.color_state().opacity()
    }

    fn set_rgba(&mut self, rgba: [f32; 4]) {
        self.color_state_mut().set_rgba(rgba);
        self.color_changed();
    }

    fn set_base_color(&mut self, base: [f32; 3]) {
        self.color_state_mut().set_base_color(base);
        self.color_changed();
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.color_state_mut().set_opacity(opacity);
        self.color_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn assert_close(a: [f32; 4], b: [f32; 4]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < EPS, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_premultiply_invariant_after_base_and_opacity() {
        let mut color = ColorState::new();
        color.set_base_color([0.5, 0.25, 1.0]);
        color.set_opacity(0.5);
        assert_close(color.rgba(), [0.25, 0.125, 0.5, 0.5]);
    }

    #[test]
    fn test_rgba_round_trip_is_idempotent() {
        let mut color = ColorState::new();
        color.set_rgba([0.2, 0.4, 0.6, 0.8]);

        let base = color.base_color();
        let opacity = color.opacity();

        let mut again = ColorState::new();
        again.set_base_color(base);
        again.set_opacity(opacity);
        assert_close(again.rgba(), [0.2, 0.4, 0.6, 0.8]);
    }

    #[test]
    fn test_zero_opacity_degrades_base_to_black() {
        let mut color = ColorState::new();
        // Additive-blend color: non-zero RGB with zero alpha.
        color.set_rgba([0.7, 0.3, 0.1, 0.0]);
        assert_eq!(color.base_color(), [0.0, 0.0, 0.0]);
        assert_eq!(color.opacity(), 0.0);
    }

    struct Tinted {
        color: ColorState,
        pushed: usize,
    }

    impl Colorable for Tinted {
        fn color_state(&self) -> &ColorState {
            &self.color
        }
        fn color_state_mut(&mut self) -> &mut ColorState {
            &mut self.color
        }
        fn color_changed(&mut self) {
            self.pushed += 1;
        }
    }

    #[test]
    fn test_hook_runs_after_every_setter() {
        let mut tinted = Tinted {
            color: ColorState::new(),
            pushed: 0,
        };
        tinted.set_rgba([0.1, 0.2, 0.3, 1.0]);
        tinted.set_base_color([1.0, 0.0, 0.0]);
        tinted.set_opacity(0.5);
        assert_eq!(tinted.pushed, 3);
        assert_close(tinted.rgba(), [0.5, 0.0, 0.0, 0.5]);
    }
}
